//! tally-domain
//!
//! Pure domain models (Ledger, Transaction, categories).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod ledger;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use ledger::*;
pub use transaction::*;
