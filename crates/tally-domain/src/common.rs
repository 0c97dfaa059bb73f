//! Shared traits and the monetary type used across the ledger.

use rust_decimal::Decimal;
use uuid::Uuid;

/// Signed decimal amount. Positive values are income, negative values expenses.
pub type Money = Decimal;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}
