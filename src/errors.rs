use rustyline::error::ReadlineError;
use tally_config::ConfigError;
use tally_core::{CoreError, ValidationError};
use thiserror::Error;

/// Failure of a ledger operation.
///
/// `Validation` means the ledger was left untouched. `Persistence` means the
/// in-memory change was applied but could not be written to disk.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Persistence failure: {0}")]
    Persistence(#[from] CoreError),
}

impl LedgerError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            LedgerError::Validation(err) => Some(err),
            LedgerError::Persistence(_) => None,
        }
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, LedgerError::Persistence(_))
    }
}

/// Fatal errors that end a CLI session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] CoreError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
}
