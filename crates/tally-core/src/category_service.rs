use tally_domain::{default_categories, Ledger};

use crate::ValidationError;

/// Details of a successful category removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRemoval {
    pub reassigned_to: String,
    pub reassigned: usize,
}

pub struct CategoryService;

impl CategoryService {
    /// Appends `name` to the category set. Matching is exact and case-sensitive.
    pub fn add(ledger: &mut Ledger, name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() || ledger.has_category(name) {
            return Err(ValidationError::DuplicateCategory(name.to_string()));
        }
        ledger.categories.push(name.to_string());
        Ok(())
    }

    /// Removes `name` and moves its transactions to the first remaining category.
    pub fn remove(ledger: &mut Ledger, name: &str) -> Result<CategoryRemoval, ValidationError> {
        if ledger.categories.len() <= 1 {
            return Err(ValidationError::LastCategory);
        }
        let position = ledger
            .categories
            .iter()
            .position(|category| category == name)
            .ok_or_else(|| ValidationError::UnknownCategory(name.to_string()))?;

        ledger.categories.remove(position);
        let fallback = ledger.categories[0].clone();
        let mut reassigned = 0;
        for txn in ledger
            .transactions
            .iter_mut()
            .filter(|txn| txn.category == name)
        {
            txn.category = fallback.clone();
            reassigned += 1;
        }
        Ok(CategoryRemoval {
            reassigned_to: fallback,
            reassigned,
        })
    }

    /// Restores the default seed when a ledger arrives without categories.
    ///
    /// Returns `true` when the set had to be reseeded.
    pub fn ensure_not_empty(ledger: &mut Ledger) -> bool {
        if ledger.categories.is_empty() {
            ledger.categories = default_categories();
            true
        } else {
            false
        }
    }
}
