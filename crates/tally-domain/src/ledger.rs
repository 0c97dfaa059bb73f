//! The ledger: ordered transactions plus the ordered category set.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::default_categories, common::Identifiable, transaction::Transaction};

/// Combined transaction sequence and category sequence.
///
/// This is also the persisted document shape. Fields missing from a stored
/// document fall back to an empty transaction list and the default category
/// seed respectively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates an empty ledger seeded with the default categories.
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
        }
    }

    /// Creates an empty ledger with the given category set.
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transactions: Vec::new(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|category| category == name)
    }

    pub fn transaction(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn transaction_mut(&mut self, index: usize) -> Option<&mut Transaction> {
        self.transactions.get_mut(index)
    }

    /// Current position of the transaction with the given id.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.transactions.iter().position(|txn| txn.id() == id)
    }
}
