// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use fintrack::application::Ledger;
use fintrack::storage::Repository;
use tempfile::TempDir;

/// Helper to create a persisting ledger backed by a temporary directory
pub fn test_ledger() -> Result<(Ledger, TempDir)> {
    let temp_dir = TempDir::new()?;
    let ledger = Ledger::open(Repository::in_dir(temp_dir.path()));
    Ok((ledger, temp_dir))
}

/// Re-open the ledger stored in `dir`, as a new process run would.
pub fn reopen(dir: &TempDir) -> Ledger {
    Ledger::open(Repository::in_dir(dir.path()))
}

/// Test fixture: the three incomes used across scenarios
pub fn add_standard_incomes(ledger: &mut Ledger) -> Result<()> {
    ledger.add_income("job", 1123.0)?;
    ledger.add_income("stocks", 1000.0)?;
    ledger.add_income("side hustle", 100.0)?;
    Ok(())
}

/// Test fixture: two dated expenses
pub fn add_standard_expenses(ledger: &mut Ledger) -> Result<()> {
    ledger.add_expense("car lease", "transportation", 500.0, "2024-01-20")?;
    ledger.add_expense("rent", "housing", 2000.0, "2024-01-01")?;
    Ok(())
}
