//! Notifications describing a successful ledger mutation.

use uuid::Uuid;

/// What changed in the ledger, so presentation code knows what to refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerChange {
    TransactionAdded { index: usize, id: Uuid },
    TransactionEdited { index: usize, id: Uuid },
    CategoryAdded { name: String },
    CategoryRemoved {
        name: String,
        reassigned_to: String,
        reassigned: usize,
    },
    /// The whole ledger was replaced, e.g. from a backup.
    Replaced,
}

impl LedgerChange {
    /// Whether the transaction list, balance, or breakdown may differ.
    pub fn affects_transactions(&self) -> bool {
        match self {
            LedgerChange::TransactionAdded { .. }
            | LedgerChange::TransactionEdited { .. }
            | LedgerChange::Replaced => true,
            LedgerChange::CategoryRemoved { reassigned, .. } => *reassigned > 0,
            LedgerChange::CategoryAdded { .. } => false,
        }
    }
}
