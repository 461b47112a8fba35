use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{ExpenseRequest, IncomeRequest, Ledger, Totals};
use crate::domain::{format_amount, ExpenseRecord, IncomeRecord};
use crate::storage::Repository;

/// Suggested expense categories; the first one is the default.
pub const EXPENSE_CATEGORIES: [&str; 10] = [
    "Housing",
    "Utilities",
    "Food",
    "Transportation",
    "Healthcare",
    "Insurance",
    "Personal & Lifestyle",
    "Debt & Financial",
    "Entertainment & Recreation",
    "Savings & Investments",
];

/// fintrack - Personal Income and Expense Tracker
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Track income and expenses with running totals, stored in local files")]
#[command(version)]
pub struct Cli {
    /// Directory holding finance_data.json and finance_data.txt
    #[arg(short = 'D', long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Income management commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// List the suggested expense categories
    Categories,

    /// Show all entries with total income, total expenses and balance
    Summary,
}

#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record an income
    Add {
        /// Where the money came from (e.g., "salary")
        source: String,

        /// Amount (e.g., "1123" or "10.24")
        #[arg(allow_negative_numbers = true)]
        amount: String,
    },

    /// List incomes
    List,

    /// Delete an income by its row number in `income list`
    Delete {
        /// Row number (starting at 1)
        row: usize,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// What the money was spent on
        description: String,

        /// Amount (e.g., "500" or "12.99")
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// Category (see `fintrack categories`)
        #[arg(short, long, default_value = EXPENSE_CATEGORIES[0])]
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List expenses
    List,

    /// Delete an expense by its row number in `expense list`
    Delete {
        /// Row number (starting at 1)
        row: usize,
    },
}

impl Commands {
    /// Whether the command reads or changes the saved ledger.
    pub fn needs_ledger(&self) -> bool {
        !matches!(self, Commands::Categories)
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if !self.command.needs_ledger() {
            for category in EXPENSE_CATEGORIES {
                println!("{category}");
            }
            return Ok(());
        }

        let mut ledger = self.open_ledger();
        match self.command {
            Commands::Income(cmd) => run_income_command(&mut ledger, cmd)?,
            Commands::Expense(cmd) => run_expense_command(&mut ledger, cmd)?,
            Commands::Categories => {}
            Commands::Summary => {
                print!("{}", render_incomes(ledger.incomes()));
                println!();
                print!("{}", render_expenses(ledger.expenses()));
                println!();
                print!("{}", render_totals(ledger.totals()));
            }
        }

        Ok(())
    }

    fn open_ledger(&self) -> Ledger {
        let ledger = Ledger::open(Repository::in_dir(&self.data_dir));
        if let Some(failure) = ledger.load_failure() {
            if failure.is_missing() {
                eprintln!(
                    "No saved data in {}, starting a new ledger",
                    self.data_dir.display()
                );
            } else {
                eprintln!("Warning: failed to load incomes and expenses from file");
                if self.verbose {
                    eprintln!("  {failure}");
                }
            }
        }
        ledger
    }
}

fn run_income_command(ledger: &mut Ledger, cmd: IncomeCommands) -> Result<()> {
    match cmd {
        IncomeCommands::Add { source, amount } => {
            let request = IncomeRequest::from_form(&source, &amount)?;
            ledger.record_income(request)?;
            println!("Recorded income: {}", source.trim());
        }
        IncomeCommands::List => {}
        IncomeCommands::Delete { row } => {
            let removed = ledger.delete_income(row_to_index(row)?)?;
            println!(
                "Deleted income: {} ({})",
                removed.source(),
                format_amount(removed.amount())
            );
        }
    }

    print!("{}", render_incomes(ledger.incomes()));
    print!("{}", render_totals(ledger.totals()));
    Ok(())
}

fn run_expense_command(ledger: &mut Ledger, cmd: ExpenseCommands) -> Result<()> {
    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let request = ExpenseRequest::from_form(
                &description,
                &category,
                &amount,
                date.as_deref().unwrap_or_default(),
            )?;
            ledger.record_expense(request)?;
            println!("Recorded expense: {}", description.trim());
        }
        ExpenseCommands::List => {}
        ExpenseCommands::Delete { row } => {
            let removed = ledger.delete_expense(row_to_index(row)?)?;
            println!(
                "Deleted expense: {} ({})",
                removed.description(),
                format_amount(removed.amount())
            );
        }
    }

    print!("{}", render_expenses(ledger.expenses()));
    print!("{}", render_totals(ledger.totals()));
    Ok(())
}

/// Rows are shown starting at 1; row 0 is the header and never a record.
fn row_to_index(row: usize) -> Result<usize> {
    row.checked_sub(1)
        .context("Row numbers start at 1 (row 0 is the header)")
}

fn render_incomes(incomes: &[IncomeRecord]) -> String {
    let mut out = String::from("  #  Income Source  |  Amount\n");
    for (i, income) in incomes.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {}  |  {}",
            i + 1,
            income.source(),
            format_amount(income.amount())
        );
    }
    out
}

fn render_expenses(expenses: &[ExpenseRecord]) -> String {
    let mut out = String::from("  #  Date  |  Description  |  Category  |  Amount\n");
    for (i, expense) in expenses.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {}  |  {}  |  {}  |  {}",
            i + 1,
            expense.date(),
            expense.description(),
            expense.category(),
            format_amount(expense.amount())
        );
    }
    out
}

fn render_totals(totals: Totals) -> String {
    format!(
        "Total Income: {}  Total Expenses: {}  Balance: {}\n",
        format_amount(totals.total_income),
        format_amount(totals.total_expenses),
        format_amount(totals.balance)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_to_index() {
        assert_eq!(row_to_index(1).unwrap(), 0);
        assert_eq!(row_to_index(3).unwrap(), 2);
        assert!(row_to_index(0).is_err());
    }

    #[test]
    fn test_render_incomes() {
        let incomes = vec![
            IncomeRecord::new("job", 1123.0).unwrap(),
            IncomeRecord::new("stocks", 10.5).unwrap(),
        ];
        assert_eq!(
            render_incomes(&incomes),
            "  #  Income Source  |  Amount\n  1  job  |  $1123.00\n  2  stocks  |  $10.50\n"
        );
    }

    #[test]
    fn test_render_expenses() {
        let expenses =
            vec![ExpenseRecord::new("car lease", "Transportation", 500.0, "2024-01-20").unwrap()];
        assert_eq!(
            render_expenses(&expenses),
            "  #  Date  |  Description  |  Category  |  Amount\n  1  2024-01-20  |  car lease  |  Transportation  |  $500.00\n"
        );
    }

    #[test]
    fn test_render_totals() {
        let totals = Totals {
            total_income: 1123.0,
            total_expenses: 500.0,
            balance: 623.0,
        };
        assert_eq!(
            render_totals(totals),
            "Total Income: $1123.00  Total Expenses: $500.00  Balance: $623.00\n"
        );
    }

    #[test]
    fn test_only_categories_skips_the_ledger() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;
        assert!(!parse(&["fintrack", "categories"]).needs_ledger());
        assert!(parse(&["fintrack", "summary"]).needs_ledger());
        assert!(parse(&["fintrack", "income", "list"]).needs_ledger());
        assert!(parse(&["fintrack", "expense", "delete", "1"]).needs_ledger());
    }

    #[test]
    fn test_parse_expense_add_defaults() {
        let cli = Cli::try_parse_from(["fintrack", "expense", "add", "bread", "3.20"]).unwrap();
        match cli.command {
            Commands::Expense(ExpenseCommands::Add {
                description,
                amount,
                category,
                date,
            }) => {
                assert_eq!(description, "bread");
                assert_eq!(amount, "3.20");
                assert_eq!(category, "Housing");
                assert_eq!(date, None);
            }
            _ => panic!("expected expense add"),
        }
        assert_eq!(cli.data_dir, PathBuf::from("."));
    }
}
