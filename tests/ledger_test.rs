mod common;

use anyhow::Result;
use fintrack::application::{Ledger, LedgerError};
use fintrack::domain::{parse_amount, parse_date, today, IncomeRecord};

use common::{add_standard_expenses, add_standard_incomes};

#[test]
fn test_income_addition() -> Result<()> {
    let mut ledger = Ledger::in_memory();
    ledger.add_income("job", 1123.0)?;

    assert_eq!(ledger.incomes(), &[IncomeRecord::new("job", 1123.0)?]);
    assert_eq!(ledger.total_income(), 1123.0);
    Ok(())
}

#[test]
fn test_income_addition_rejects_invalid_input() {
    let mut ledger = Ledger::in_memory();

    let err = ledger.add_income("job", -1.0).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Income amount can't be negative");

    let err = ledger.add_income("   ", 100.0).unwrap_err();
    assert_eq!(err.to_string(), "Income source must be non-empty");

    assert!(ledger.incomes().is_empty());
    assert_eq!(ledger.total_income(), 0.0);
}

#[test]
fn test_expense_addition() -> Result<()> {
    let mut ledger = Ledger::in_memory();
    ledger.add_expense("car lease", "transportation", 500.0, "2024-01-20")?;

    let expense = &ledger.expenses()[0];
    assert_eq!(ledger.expenses().len(), 1);
    assert_eq!(expense.description(), "car lease");
    assert_eq!(expense.category(), "transportation");
    assert_eq!(expense.amount(), 500.0);
    assert_eq!(expense.date(), "2024-01-20");
    assert_eq!(ledger.total_expenses(), 500.0);
    Ok(())
}

#[test]
fn test_expense_blank_date_records_today() -> Result<()> {
    let mut ledger = Ledger::in_memory();
    let before = today();
    ledger.add_expense("coffee", "Food", 3.5, "  ")?;
    let after = today();

    let date = ledger.expenses()[0].date();
    assert!(date == before || date == after);
    Ok(())
}

#[test]
fn test_expense_addition_rejects_invalid_input() {
    let mut ledger = Ledger::in_memory();

    for (description, category, amount, date) in [
        ("   ", "transportation", 10.0, "2024-01-01"),
        ("car lease", "   ", 10.0, "2024-01-01"),
        ("car lease", "transportation", -10.0, "2024-01-01"),
        ("car lease", "transportation", 10.0, "not-a-date"),
    ] {
        let err = ledger
            .add_expense(description, category, amount, date)
            .unwrap_err();
        assert!(err.is_validation(), "{description:?} {category:?} {amount} {date:?}");
    }

    assert!(ledger.expenses().is_empty());
    assert_eq!(ledger.total_expenses(), 0.0);
}

#[test]
fn test_balance() -> Result<()> {
    let mut ledger = Ledger::in_memory();
    assert_eq!(ledger.balance(), 0.0);

    ledger.add_income("job", 1123.0)?;
    ledger.add_expense("car lease", "transportation", 500.0, "2024-01-20")?;

    assert_eq!(ledger.total_income(), 1123.0);
    assert_eq!(ledger.total_expenses(), 500.0);
    assert_eq!(ledger.balance(), 623.0);
    Ok(())
}

#[test]
fn test_totals() -> Result<()> {
    let mut ledger = Ledger::in_memory();
    add_standard_incomes(&mut ledger)?;
    add_standard_expenses(&mut ledger)?;

    assert_eq!(ledger.total_income(), 2223.0);
    assert_eq!(ledger.total_expenses(), 2500.0);
    assert_eq!(ledger.balance(), ledger.total_income() - ledger.total_expenses());

    let totals = ledger.view().totals;
    assert_eq!(totals.balance, -277.0);
    Ok(())
}

#[test]
fn test_delete_keeps_order() -> Result<()> {
    let mut ledger = Ledger::in_memory();
    add_standard_incomes(&mut ledger)?;

    let removed = ledger.delete_income(1)?;
    assert_eq!(removed.source(), "stocks");

    let sources: Vec<&str> = ledger.incomes().iter().map(|i| i.source()).collect();
    assert_eq!(sources, ["job", "side hustle"]);
    assert_eq!(ledger.total_income(), 1223.0);

    add_standard_expenses(&mut ledger)?;
    let removed = ledger.delete_expense(0)?;
    assert_eq!(removed.description(), "car lease");
    assert_eq!(ledger.expenses()[0].description(), "rent");
    Ok(())
}

#[test]
fn test_delete_out_of_range() -> Result<()> {
    let mut ledger = Ledger::in_memory();
    ledger.add_income("job", 5.0)?;

    let err = ledger.delete_income(1).unwrap_err();
    assert!(matches!(err, LedgerError::IndexOutOfRange { index: 1, len: 1 }));
    assert!(matches!(
        ledger.delete_expense(0),
        Err(LedgerError::IndexOutOfRange { index: 0, len: 0 })
    ));
    assert_eq!(ledger.incomes().len(), 1);
    Ok(())
}

#[test]
fn test_parse_helpers() {
    assert_eq!(parse_amount("10.24", "Amount"), Ok(10.24));
    assert!(parse_amount("-1", "Amount").is_err());
    assert!(parse_amount("abc", "Amount").is_err());

    assert_eq!(parse_date("2024-01-20").unwrap(), "2024-01-20");
    assert!(parse_date("20222-123-123").is_err());
}
