mod backup;
mod category;
mod report;
mod system;
mod transaction;

use crate::cli::registry::CommandEntry;

/// Every shell command, in the order `help` lists them.
pub(crate) fn all() -> Vec<CommandEntry> {
    let mut entries = Vec::new();
    entries.extend(transaction::definitions());
    entries.extend(category::definitions());
    entries.extend(report::definitions());
    entries.extend(backup::definitions());
    entries.extend(system::definitions());
    entries
}
