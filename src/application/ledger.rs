use serde::Serialize;

use crate::domain::{parse_amount, Amount, ExpenseRecord, IncomeRecord};
use crate::storage::{FileFormat, LoadFailure, Repository, Snapshot};

use super::{LedgerError, ValidationError};

/// Where the ledger's starting state came from.
#[derive(Debug)]
pub enum LoadStatus {
    /// Non-persisting ledger; nothing was read.
    InMemory,
    Loaded(FileFormat),
    /// Both files were unusable; the ledger started empty.
    Failed(LoadFailure),
}

/// The income and expense ledger. Sole owner of both record sequences.
pub struct Ledger {
    incomes: Vec<IncomeRecord>,
    expenses: Vec<ExpenseRecord>,
    repo: Option<Repository>,
    autosave: bool,
    status: LoadStatus,
}

/// Raw income form input.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeRequest {
    pub source: String,
    pub amount: Amount,
}

/// Raw expense form input. A blank `date` means today.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRequest {
    pub description: String,
    pub category: String,
    pub amount: Amount,
    pub date: String,
}

/// Aggregate figures shown under the lists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub balance: Amount,
}

/// Everything a presentation layer needs to render the ledger.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LedgerView<'a> {
    pub incomes: &'a [IncomeRecord],
    pub expenses: &'a [ExpenseRecord],
    pub totals: Totals,
}

impl IncomeRequest {
    /// Build a request from form text. The source is trimmed and the amount
    /// parsed; the ledger validates again when the request is recorded.
    pub fn from_form(source: &str, amount: &str) -> Result<Self, ValidationError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ValidationError::new("Source is required."));
        }
        Ok(Self {
            source: source.to_string(),
            amount: parse_amount(amount, "Amount")?,
        })
    }
}

impl ExpenseRequest {
    pub fn from_form(
        description: &str,
        category: &str,
        amount: &str,
        date: &str,
    ) -> Result<Self, ValidationError> {
        let description = description.trim();
        let category = category.trim();
        if description.is_empty() {
            return Err(ValidationError::new("Description is required."));
        }
        if category.is_empty() {
            return Err(ValidationError::new("Category is required."));
        }
        Ok(Self {
            description: description.to_string(),
            category: category.to_string(),
            amount: parse_amount(amount, "Amount")?,
            date: date.trim().to_string(),
        })
    }
}

impl Ledger {
    /// Open a persisted ledger. Never fails: if neither file can be loaded the
    /// ledger starts empty and [`Ledger::load_failed`] reports it.
    pub fn open(repo: Repository) -> Self {
        Self::load(repo, true)
    }

    /// Load from disk like [`Ledger::open`], but never write back. Mutations
    /// only change the in-memory lists.
    pub fn open_read_only(repo: Repository) -> Self {
        Self::load(repo, false)
    }

    /// A ledger that neither loads nor saves.
    pub fn in_memory() -> Self {
        Self {
            incomes: Vec::new(),
            expenses: Vec::new(),
            repo: None,
            autosave: false,
            status: LoadStatus::InMemory,
        }
    }

    fn load(repo: Repository, autosave: bool) -> Self {
        let (snapshot, status) = match repo.load() {
            Ok(loaded) => {
                tracing::info!(
                    incomes = loaded.snapshot.incomes.len(),
                    expenses = loaded.snapshot.expenses.len(),
                    format = ?loaded.format,
                    "loaded ledger"
                );
                (loaded.snapshot, LoadStatus::Loaded(loaded.format))
            }
            Err(failure) => {
                if failure.is_missing() {
                    tracing::info!("no saved ledger found, starting empty");
                } else {
                    tracing::warn!("{failure}");
                }
                (Snapshot::default(), LoadStatus::Failed(failure))
            }
        };

        Self {
            incomes: snapshot.incomes,
            expenses: snapshot.expenses,
            repo: Some(repo),
            autosave,
            status,
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn load_failed(&self) -> bool {
        matches!(self.status, LoadStatus::Failed(_))
    }

    pub fn load_failure(&self) -> Option<&LoadFailure> {
        match &self.status {
            LoadStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Whether mutations are written to disk.
    pub fn is_persistent(&self) -> bool {
        self.autosave && self.repo.is_some()
    }

    // ========================
    // Mutations
    // ========================

    /// Append an income entry and persist.
    pub fn add_income(&mut self, source: &str, amount: Amount) -> Result<(), LedgerError> {
        let income = IncomeRecord::new(source, amount)?;
        tracing::info!(source = income.source(), amount, "adding income");
        self.incomes.push(income);
        self.persist()
    }

    /// Append an expense entry and persist. A blank `date` records today.
    pub fn add_expense(
        &mut self,
        description: &str,
        category: &str,
        amount: Amount,
        date: &str,
    ) -> Result<(), LedgerError> {
        let expense = ExpenseRecord::new(description, category, amount, date)?;
        tracing::info!(
            description = expense.description(),
            category = expense.category(),
            amount,
            date = expense.date(),
            "adding expense"
        );
        self.expenses.push(expense);
        self.persist()
    }

    pub fn record_income(&mut self, request: IncomeRequest) -> Result<(), LedgerError> {
        self.add_income(&request.source, request.amount)
    }

    pub fn record_expense(&mut self, request: ExpenseRequest) -> Result<(), LedgerError> {
        self.add_expense(
            &request.description,
            &request.category,
            request.amount,
            &request.date,
        )
    }

    /// Remove the income at a zero-based position and persist.
    pub fn delete_income(&mut self, index: usize) -> Result<IncomeRecord, LedgerError> {
        check_index(index, self.incomes.len())?;
        let removed = self.incomes.remove(index);
        tracing::info!(index, source = removed.source(), "deleted income");
        self.persist()?;
        Ok(removed)
    }

    /// Remove the expense at a zero-based position and persist.
    pub fn delete_expense(&mut self, index: usize) -> Result<ExpenseRecord, LedgerError> {
        check_index(index, self.expenses.len())?;
        let removed = self.expenses.remove(index);
        tracing::info!(index, description = removed.description(), "deleted expense");
        self.persist()?;
        Ok(removed)
    }

    // ========================
    // Queries
    // ========================

    pub fn incomes(&self) -> &[IncomeRecord] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn total_income(&self) -> Amount {
        self.incomes.iter().map(IncomeRecord::amount).sum()
    }

    pub fn total_expenses(&self) -> Amount {
        self.expenses.iter().map(ExpenseRecord::amount).sum()
    }

    pub fn balance(&self) -> Amount {
        self.total_income() - self.total_expenses()
    }

    pub fn totals(&self) -> Totals {
        Totals {
            total_income: self.total_income(),
            total_expenses: self.total_expenses(),
            balance: self.balance(),
        }
    }

    pub fn view(&self) -> LedgerView<'_> {
        LedgerView {
            incomes: &self.incomes,
            expenses: &self.expenses,
            totals: self.totals(),
        }
    }

    /// Copy of the current state, as it would be saved.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.incomes.clone(), self.expenses.clone())
    }

    fn persist(&self) -> Result<(), LedgerError> {
        let Some(repo) = self.repo.as_ref().filter(|_| self.autosave) else {
            return Ok(());
        };
        repo.save(&self.snapshot()).map_err(|err| {
            tracing::error!("failed to save ledger: {err:#}");
            LedgerError::Storage(err)
        })
    }
}

fn check_index(index: usize, len: usize) -> Result<(), LedgerError> {
    if index >= len {
        return Err(LedgerError::IndexOutOfRange { index, len });
    }
    Ok(())
}
