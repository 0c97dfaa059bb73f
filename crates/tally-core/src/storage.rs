use std::{collections::HashSet, path::PathBuf};

use tally_domain::Ledger;

use crate::CoreError;

/// Describes a persisted backup artifact for a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerBackupInfo {
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends holding a single ledger document.
pub trait LedgerStorage: Send + Sync {
    /// Loads the stored ledger, or `None` when nothing has been stored yet.
    fn load_ledger(&self) -> Result<Option<Ledger>, CoreError>;
    /// Replaces the stored document with `ledger` in full.
    fn save_ledger(&self, ledger: &Ledger) -> Result<(), CoreError>;
    fn backup_ledger(
        &self,
        ledger: &Ledger,
        note: Option<&str>,
    ) -> Result<LedgerBackupInfo, CoreError>;
    /// Copies whatever is currently stored, readable or not, into a backup.
    fn backup_stored(&self, note: Option<&str>) -> Result<Option<LedgerBackupInfo>, CoreError>;
    /// Lists backups, newest first.
    fn list_backups(&self) -> Result<Vec<LedgerBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &LedgerBackupInfo) -> Result<Ledger, CoreError>;
    /// Human-readable location of the stored document.
    fn location(&self) -> String;
}

/// Detects dangling references and other anomalies within a ledger snapshot.
pub fn ledger_warnings(ledger: &Ledger) -> Vec<String> {
    let mut warnings = Vec::new();
    if ledger.categories.is_empty() {
        warnings.push("ledger has no categories".to_string());
    }

    let mut seen = HashSet::new();
    for name in &ledger.categories {
        if !seen.insert(name.as_str()) {
            warnings.push(format!("category `{}` is listed more than once", name));
        }
    }

    for (index, txn) in ledger.transactions.iter().enumerate() {
        if !seen.contains(txn.category.as_str()) {
            warnings.push(format!(
                "transaction {} references unknown category `{}`",
                index + 1,
                txn.category
            ));
        }
    }
    warnings
}
