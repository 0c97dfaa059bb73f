//! Write-through owner of the ledger.

use std::collections::BTreeMap;

use tracing::{error, info, warn};
use uuid::Uuid;

use tally_core::{
    storage::{ledger_warnings, LedgerBackupInfo, LedgerStorage},
    BreakdownSlice, CategoryService, LedgerChange, LedgerTotals, SummaryService,
    TransactionEdit, TransactionService, ValidationError,
};
use tally_domain::{Ledger, Money, Transaction, TransactionKind};

use crate::errors::LedgerError;

/// Callback invoked after every successful mutation.
pub type ChangeListener = Box<dyn FnMut(&LedgerChange, &Ledger) + Send>;

/// What happened while opening the ledger.
#[derive(Debug, Clone, Default)]
pub struct OpenReport {
    /// No usable stored state existed, so a fresh ledger was seeded.
    pub created: bool,
    /// Load failure that forced a fresh ledger.
    pub load_error: Option<String>,
    /// Backup holding the unreadable document, when one was made.
    pub preserved_backup: Option<LedgerBackupInfo>,
    /// Integrity warnings found in the loaded document.
    pub warnings: Vec<String>,
    /// Failure writing the initial state.
    pub save_error: Option<String>,
}

/// Owns the in-memory ledger and writes it through to storage after every
/// successful mutation.
///
/// Validation failures leave the ledger untouched. A failed save after a
/// mutation keeps the in-memory change and is returned as
/// [`LedgerError::Persistence`].
pub struct LedgerBook {
    ledger: Ledger,
    storage: Box<dyn LedgerStorage>,
    listeners: Vec<ChangeListener>,
}

impl LedgerBook {
    /// Loads stored state, or seeds and persists defaults when there is none.
    pub fn open(storage: Box<dyn LedgerStorage>) -> (Self, OpenReport) {
        let mut report = OpenReport::default();
        let mut needs_save = false;

        let ledger = match storage.load_ledger() {
            Ok(Some(mut ledger)) => {
                report.warnings = ledger_warnings(&ledger);
                for warning in &report.warnings {
                    warn!("{warning}");
                }
                if CategoryService::ensure_not_empty(&mut ledger) {
                    warn!("stored ledger had no categories; default categories restored");
                    needs_save = true;
                }
                info!(
                    transactions = ledger.transactions.len(),
                    categories = ledger.categories.len(),
                    "ledger loaded from {}",
                    storage.location()
                );
                ledger
            }
            Ok(None) => {
                info!("no ledger at {}; starting a new one", storage.location());
                report.created = true;
                needs_save = true;
                Ledger::new()
            }
            Err(err) => {
                error!("failed to load ledger from {}: {err}", storage.location());
                report.load_error = Some(err.to_string());
                match storage.backup_stored(Some("unreadable")) {
                    Ok(Some(backup)) => {
                        warn!("unreadable ledger preserved as {}", backup.id);
                        report.preserved_backup = Some(backup);
                    }
                    Ok(None) => {}
                    Err(backup_err) => error!("failed to preserve unreadable ledger: {backup_err}"),
                }
                report.created = true;
                needs_save = true;
                Ledger::new()
            }
        };

        let book = Self {
            ledger,
            storage,
            listeners: Vec::new(),
        };
        if needs_save {
            if let Err(err) = book.persist() {
                report.save_error = Some(err.to_string());
            }
        }
        (book, report)
    }

    /// Registers a callback for change notifications.
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    pub fn categories(&self) -> &[String] {
        &self.ledger.categories
    }

    pub fn transaction(&self, index: usize) -> Option<&Transaction> {
        self.ledger.transaction(index)
    }

    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.ledger.position_of(id)
    }

    pub fn storage_location(&self) -> String {
        self.storage.location()
    }

    pub fn add_transaction(
        &mut self,
        amount_input: &str,
        category: &str,
        description: &str,
        kind: TransactionKind,
    ) -> Result<Transaction, LedgerError> {
        let transaction = TransactionService::add(
            &mut self.ledger,
            amount_input,
            category,
            description,
            kind,
        )
        .map_err(|err| {
            error!("failed to add transaction: {err}");
            err
        })?;
        info!(
            amount = %transaction.amount,
            category = %transaction.category,
            description = %transaction.description,
            "transaction added"
        );
        let index = self.ledger.transactions.len() - 1;
        self.commit(LedgerChange::TransactionAdded {
            index,
            id: transaction.id,
        })?;
        Ok(transaction)
    }

    pub fn add_category(&mut self, name: &str) -> Result<LedgerChange, LedgerError> {
        CategoryService::add(&mut self.ledger, name).map_err(|err| {
            error!("failed to add category: {err}");
            err
        })?;
        info!("category added: {name}");
        let change = LedgerChange::CategoryAdded {
            name: name.to_string(),
        };
        self.commit(change.clone())?;
        Ok(change)
    }

    /// Removes a category, moving its transactions to the first remaining one.
    pub fn delete_category(&mut self, name: &str) -> Result<LedgerChange, LedgerError> {
        let removal = CategoryService::remove(&mut self.ledger, name).map_err(|err| {
            match err {
                ValidationError::LastCategory => warn!("refused to delete `{name}`: {err}"),
                _ => error!("failed to delete category: {err}"),
            }
            err
        })?;
        info!(
            reassigned = removal.reassigned,
            "category deleted: {name}; transactions moved to {}", removal.reassigned_to
        );
        let change = LedgerChange::CategoryRemoved {
            name: name.to_string(),
            reassigned_to: removal.reassigned_to,
            reassigned: removal.reassigned,
        };
        self.commit(change.clone())?;
        Ok(change)
    }

    /// Edits the transaction at the 0-based `index`.
    ///
    /// Returns `Ok(None)` when every requested value matched what was stored,
    /// in which case nothing is saved or notified.
    pub fn edit_transaction(
        &mut self,
        index: usize,
        edit: TransactionEdit,
    ) -> Result<Option<LedgerChange>, LedgerError> {
        let outcome = TransactionService::edit(&mut self.ledger, index, edit).map_err(|err| {
            match err {
                ValidationError::IndexOutOfRange { .. } => {
                    warn!("refused to edit transaction: {err}")
                }
                _ => error!("failed to edit transaction: {err}"),
            }
            err
        })?;
        if let Some(category) = &outcome.ignored_category {
            warn!("category `{category}` does not exist; transaction category left unchanged");
        }
        if !outcome.changed {
            return Ok(None);
        }
        let Some(transaction) = self.ledger.transaction(index) else {
            return Ok(None);
        };
        info!(
            amount = %transaction.amount,
            category = %transaction.category,
            description = %transaction.description,
            "transaction {} edited",
            index + 1
        );
        let change = LedgerChange::TransactionEdited {
            index,
            id: transaction.id,
        };
        self.commit(change.clone())?;
        Ok(Some(change))
    }

    pub fn balance(&self) -> Money {
        SummaryService::balance(&self.ledger)
    }

    pub fn category_breakdown(&self) -> BTreeMap<String, Money> {
        SummaryService::category_breakdown(&self.ledger)
    }

    pub fn breakdown_slices(&self) -> Vec<BreakdownSlice> {
        SummaryService::breakdown_slices(&self.ledger)
    }

    pub fn totals(&self) -> LedgerTotals {
        SummaryService::totals(&self.ledger)
    }

    pub fn backup(&self, note: Option<&str>) -> Result<LedgerBackupInfo, LedgerError> {
        let info = self
            .storage
            .backup_ledger(&self.ledger, note)
            .map_err(|err| {
                error!("backup failed: {err}");
                err
            })?;
        info!("backup created: {}", info.id);
        Ok(info)
    }

    pub fn list_backups(&self) -> Result<Vec<LedgerBackupInfo>, LedgerError> {
        Ok(self.storage.list_backups()?)
    }

    /// Replaces the live ledger with the backup named `backup_id`.
    pub fn restore(&mut self, backup_id: &str) -> Result<LedgerChange, LedgerError> {
        let backups = self.storage.list_backups()?;
        let backup = backups
            .iter()
            .find(|info| info.id == backup_id)
            .ok_or_else(|| tally_core::CoreError::BackupNotFound(backup_id.to_string()))
            .map_err(|err| {
                warn!("restore refused: {err}");
                err
            })?;
        let mut ledger = self.storage.restore_backup(backup).map_err(|err| {
            error!("restore failed: {err}");
            err
        })?;
        let reseeded = CategoryService::ensure_not_empty(&mut ledger);
        self.ledger = ledger;
        info!("ledger restored from {backup_id}");
        let change = LedgerChange::Replaced;
        if reseeded {
            self.commit(change.clone())?;
        } else {
            self.notify(&change);
        }
        Ok(change)
    }

    fn commit(&mut self, change: LedgerChange) -> Result<(), LedgerError> {
        self.notify(&change);
        self.persist()
    }

    fn notify(&mut self, change: &LedgerChange) {
        for listener in self.listeners.iter_mut() {
            listener(change, &self.ledger);
        }
    }

    fn persist(&self) -> Result<(), LedgerError> {
        self.storage.save_ledger(&self.ledger).map_err(|err| {
            error!("failed to save ledger to {}: {err}", self.storage.location());
            LedgerError::Persistence(err)
        })
    }
}
