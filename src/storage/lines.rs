use std::io::{Read, Write};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use thiserror::Error;

use super::Snapshot;
use crate::domain::{Amount, ExpenseRecord, IncomeRecord, ValidationError};

pub const EXPENSE_TAG: &str = "Expense";
pub const INCOME_TAG: &str = "Income";

const EXPENSE_FIELDS: usize = 5;
const INCOME_FIELDS: usize = 3;
const DELIMITER: u8 = b'|';

/// Reasons a line-oriented file is rejected. Lines are 1-based.
#[derive(Error, Debug)]
pub enum LineFormatError {
    #[error("line {line}: unknown record tag `{tag}`")]
    UnknownTag { line: u64, tag: String },

    #[error("line {line}: {tag} record needs {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        tag: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid amount `{value}`")]
    InvalidAmount { line: u64, value: String },

    #[error("line {line}: {source}")]
    InvalidRecord { line: u64, source: ValidationError },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Write every expense line, then every income line.
///
/// Fields are written as-is, never quoted. Records cannot hold `|` or line
/// breaks, so a plain split on `|` always reads them back.
pub fn write_lines<W: Write>(snapshot: &Snapshot, writer: W) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    for expense in &snapshot.expenses {
        writer.write_record([
            EXPENSE_TAG,
            expense.description(),
            expense.category(),
            &expense.amount().to_string(),
            expense.date(),
        ])?;
    }
    for income in &snapshot.incomes {
        writer.write_record([INCOME_TAG, income.source(), &income.amount().to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn read_lines<R: Read>(reader: R) -> Result<Snapshot, LineFormatError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut snapshot = Snapshot::default();
    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        match &record[0] {
            EXPENSE_TAG => {
                expect_fields(&record, line, EXPENSE_TAG, EXPENSE_FIELDS)?;
                let amount = parse_amount(&record[3], line)?;
                if record[4].trim().is_empty() {
                    return Err(LineFormatError::InvalidRecord {
                        line,
                        source: ValidationError::new("Expense date is missing"),
                    });
                }
                let expense = ExpenseRecord::new(&record[1], &record[2], amount, &record[4])
                    .map_err(|source| LineFormatError::InvalidRecord { line, source })?;
                snapshot.expenses.push(expense);
            }
            INCOME_TAG => {
                expect_fields(&record, line, INCOME_TAG, INCOME_FIELDS)?;
                let amount = parse_amount(&record[2], line)?;
                let income = IncomeRecord::new(&record[1], amount)
                    .map_err(|source| LineFormatError::InvalidRecord { line, source })?;
                snapshot.incomes.push(income);
            }
            tag => {
                return Err(LineFormatError::UnknownTag {
                    line,
                    tag: tag.to_string(),
                });
            }
        }
    }

    Ok(snapshot)
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}

fn expect_fields(
    record: &StringRecord,
    line: u64,
    tag: &'static str,
    expected: usize,
) -> Result<(), LineFormatError> {
    if record.len() != expected {
        return Err(LineFormatError::FieldCount {
            line,
            tag,
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

fn parse_amount(value: &str, line: u64) -> Result<Amount, LineFormatError> {
    value
        .trim()
        .parse()
        .map_err(|_| LineFormatError::InvalidAmount {
            line,
            value: value.to_string(),
        })
}
