use thiserror::Error;

pub use crate::domain::ValidationError;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No record at index {index} (ledger holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}
