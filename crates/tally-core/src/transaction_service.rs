//! Creation and editing of ledger transactions.

use std::str::FromStr;

use rust_decimal::Decimal;
use tally_domain::{Ledger, Money, Transaction, TransactionKind};

use crate::ValidationError;

/// Largest accepted magnitude, one quadrillion.
///
/// Keeps every sum a ledger can realistically hold far inside the range of
/// [`Decimal`].
pub const MAX_AMOUNT: Money = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Optional replacements applied by [`TransactionService::edit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionEdit {
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl TransactionEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Result of an accepted edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// At least one attribute now differs from before the edit.
    pub changed: bool,
    /// Requested category that was left alone because it is not in the set.
    pub ignored_category: Option<String>,
}

pub struct TransactionService;

impl TransactionService {
    /// Parses user input into a magnitude in `(0, MAX_AMOUNT]`.
    ///
    /// Accepts a decimal comma as well as a decimal point, and scientific notation.
    pub fn parse_amount(input: &str) -> Result<Money, ValidationError> {
        let value = Self::parse_number(input)?;
        Self::check_magnitude(value)?;
        Ok(value)
    }

    /// Parses user input as a decimal of either sign.
    pub fn parse_number(input: &str) -> Result<Money, ValidationError> {
        let trimmed = input.trim();
        let normalized = trimmed.replace(',', ".");
        Decimal::from_str(&normalized)
            .or_else(|_| Decimal::from_scientific(&normalized))
            .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))
    }

    /// Appends a new transaction and returns a copy of what was stored.
    ///
    /// The category is copied verbatim without checking it against the set.
    pub fn add(
        ledger: &mut Ledger,
        amount_input: &str,
        category: &str,
        description: &str,
        kind: TransactionKind,
    ) -> Result<Transaction, ValidationError> {
        let magnitude = Self::parse_amount(amount_input)?;
        let transaction = Transaction::new(magnitude, kind, category, description);
        ledger.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Applies `edit` to the transaction at the 0-based `index`.
    ///
    /// A new amount replaces only the magnitude. A category that is not in the
    /// current set is ignored and reported through [`EditOutcome`].
    pub fn edit(
        ledger: &mut Ledger,
        index: usize,
        edit: TransactionEdit,
    ) -> Result<EditOutcome, ValidationError> {
        let len = ledger.transactions.len();
        if index >= len {
            return Err(ValidationError::IndexOutOfRange { index, len });
        }
        if let Some(amount) = edit.amount {
            Self::check_magnitude(amount.abs())?;
        }
        let known_category = edit
            .category
            .as_deref()
            .map(|name| ledger.has_category(name));

        let transaction = ledger
            .transaction_mut(index)
            .ok_or(ValidationError::IndexOutOfRange { index, len })?;
        let before = transaction.clone();
        let mut outcome = EditOutcome::default();

        if let Some(amount) = edit.amount {
            transaction.set_magnitude(amount);
        }
        match (edit.category, known_category) {
            (Some(category), Some(true)) => transaction.category = category,
            (Some(category), _) => outcome.ignored_category = Some(category),
            (None, _) => {}
        }
        if let Some(description) = edit.description {
            transaction.description = description;
        }

        outcome.changed = *transaction != before;
        Ok(outcome)
    }

    fn check_magnitude(value: Money) -> Result<(), ValidationError> {
        if value <= Decimal::ZERO {
            Err(ValidationError::NonPositiveAmount)
        } else if value > MAX_AMOUNT {
            Err(ValidationError::AmountTooLarge { max: MAX_AMOUNT })
        } else {
            Ok(())
        }
    }
}
