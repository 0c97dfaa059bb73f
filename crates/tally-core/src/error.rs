use tally_domain::Money;
use thiserror::Error;

/// Reasons a ledger operation is rejected before it touches any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("amount must not exceed {max}")]
    AmountTooLarge { max: Money },
    #[error("category `{0}` already exists")]
    DuplicateCategory(String),
    #[error("category `{0}` not found")]
    UnknownCategory(String),
    #[error("at least one category must remain")]
    LastCategory,
    #[error("no transaction at index {index} (ledger holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures raised by storage backends.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Backup not found: {0}")]
    BackupNotFound(String),
}
