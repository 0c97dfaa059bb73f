//! tally-core
//!
//! Ledger operations, aggregation, and the storage contract.
//! Depends on tally-domain. No CLI, no terminal I/O, no direct file access.

pub mod category_service;
pub mod change;
pub mod error;
pub mod storage;
pub mod summary_service;
pub mod transaction_service;

pub use category_service::*;
pub use change::LedgerChange;
pub use error::{CoreError, ValidationError};
pub use summary_service::*;
pub use transaction_service::*;

#[cfg(test)]
mod tests;
