//! Domain model for ledger transactions.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// One signed monetary record.
///
/// The sign of `amount` carries the transaction type and is fixed when the
/// record is created; edits only ever replace the magnitude.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Written as an exact JSON number, never rounded through `f64`.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Money,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Builds a transaction from a positive magnitude, applying the sign for `kind`.
    pub fn new(
        magnitude: Money,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: kind.signed(magnitude),
            category: category.into(),
            description: description.into(),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        if self.amount > Decimal::ZERO {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }

    /// Replaces the magnitude while keeping the existing sign.
    ///
    /// A stored zero counts as income unless it carries a negative sign.
    pub fn set_magnitude(&mut self, magnitude: Money) {
        let kind = if self.amount.is_sign_negative() {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        };
        self.amount = kind.signed(magnitude.abs());
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Whether a transaction adds to or draws from the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Applies this kind's sign to a non-negative magnitude.
    pub fn signed(self, magnitude: Money) -> Money {
        match self {
            TransactionKind::Income => magnitude,
            TransactionKind::Expense => -magnitude,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}
