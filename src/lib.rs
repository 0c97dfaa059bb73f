#![doc(test(attr(deny(warnings))))]

//! Tally keeps a personal income/expense ledger organised by categories,
//! persisted as a single JSON document and summarised as a running balance
//! plus a per-category expense breakdown.

pub mod cli;
pub mod core;
pub mod errors;
pub mod utils;

pub use crate::core::ledger_book::{LedgerBook, OpenReport};
pub use errors::LedgerError;
pub use tally_core::{LedgerChange, ValidationError};
pub use tally_domain::{Ledger, Money, Transaction, TransactionKind};

use std::sync::Once;

use utils::TracingOptions;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init(options: &TracingOptions) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(options);
        tracing::info!("application started");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init(&super::utils::TracingOptions::default());
    }
}
