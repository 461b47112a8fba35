use serde::{Deserialize, Serialize};

use super::{is_valid_amount, parse_date, Amount, ValidationError};

/// A single income entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawIncome")]
pub struct IncomeRecord {
    source: String,
    amount: Amount,
}

impl IncomeRecord {
    pub fn new(source: impl Into<String>, amount: Amount) -> Result<Self, ValidationError> {
        let source = source.into();
        if !is_valid_amount(amount) {
            return Err(ValidationError::new("Income amount can't be negative"));
        }
        if is_blank(&source) {
            return Err(ValidationError::new("Income source must be non-empty"));
        }
        check_storable("Income source", &source)?;
        Ok(Self { source, amount })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// A single expense entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExpense")]
pub struct ExpenseRecord {
    description: String,
    category: String,
    amount: Amount,
    date: String,
}

impl ExpenseRecord {
    /// Validates every field. `date` goes through [`parse_date`], so a blank
    /// date becomes today's date.
    pub fn new(
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Amount,
        date: &str,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        let category = category.into();

        if is_blank(&description) {
            return Err(ValidationError::new("Description must be non-empty"));
        }
        if is_blank(&category) {
            return Err(ValidationError::new("Category must be non-empty"));
        }
        check_storable("Description", &description)?;
        check_storable("Category", &category)?;
        if !is_valid_amount(amount) {
            return Err(ValidationError::new("Expense amount can't be negative"));
        }
        let date = parse_date(date)?;

        Ok(Self {
            description,
            category,
            amount,
            date,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Always a valid `YYYY-MM-DD` date.
    pub fn date(&self) -> &str {
        &self.date
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// `|` and line breaks delimit the line-oriented file.
fn check_storable(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.contains(['|', '\n', '\r']) {
        return Err(ValidationError::new(format!(
            "{} can't contain '|' or line breaks",
            field
        )));
    }
    Ok(())
}

// Wire shapes; deserialized records are re-validated through `new`.

#[derive(Deserialize)]
struct RawIncome {
    source: String,
    amount: Amount,
}

impl TryFrom<RawIncome> for IncomeRecord {
    type Error = ValidationError;

    fn try_from(raw: RawIncome) -> Result<Self, Self::Error> {
        IncomeRecord::new(raw.source, raw.amount)
    }
}

#[derive(Deserialize)]
struct RawExpense {
    description: String,
    category: String,
    amount: Amount,
    date: String,
}

impl TryFrom<RawExpense> for ExpenseRecord {
    type Error = ValidationError;

    fn try_from(raw: RawExpense) -> Result<Self, Self::Error> {
        // A stored date is never blank; don't let it silently become today.
        if is_blank(&raw.date) {
            return Err(ValidationError::new("Expense date is missing"));
        }
        ExpenseRecord::new(raw.description, raw.category, raw.amount, &raw.date)
    }
}
