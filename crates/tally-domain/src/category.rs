//! Category names and the default seed set.

/// Categories a fresh ledger starts with.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Food", "Transport", "Entertainment", "Utilities", "Other"];

/// Returns the default category seed as owned names.
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect()
}
