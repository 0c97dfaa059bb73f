//! Balance and expense breakdown derived from a ledger snapshot.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tally_domain::{Ledger, Money};

/// Income, expense, and balance totals for a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerTotals {
    pub income: Money,
    /// Sum of expense magnitudes, always non-negative.
    pub expenses: Money,
    pub balance: Money,
}

/// One category's share of total expenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownSlice {
    pub category: String,
    pub total: Money,
    /// Share of all expenses in percent, rounded to one decimal place.
    pub percent: Decimal,
}

pub struct SummaryService;

impl SummaryService {
    /// Signed sum of every transaction amount.
    ///
    /// Sums saturate at the bounds of [`Decimal`] instead of overflowing.
    pub fn balance(ledger: &Ledger) -> Money {
        ledger
            .transactions
            .iter()
            .fold(Decimal::ZERO, |sum, txn| sum.saturating_add(txn.amount))
    }

    /// Expense magnitudes grouped by category. Categories without expenses are absent.
    pub fn category_breakdown(ledger: &Ledger) -> BTreeMap<String, Money> {
        let mut breakdown = BTreeMap::new();
        for txn in ledger.transactions.iter().filter(|txn| txn.is_expense()) {
            let total = breakdown
                .entry(txn.category.clone())
                .or_insert(Decimal::ZERO);
            *total = total.saturating_add(txn.magnitude());
        }
        breakdown
    }

    /// Breakdown ordered by descending total (ties by name) with percentage shares.
    pub fn breakdown_slices(ledger: &Ledger) -> Vec<BreakdownSlice> {
        let breakdown = Self::category_breakdown(ledger);
        let grand_total = breakdown
            .values()
            .fold(Decimal::ZERO, |sum, total| sum.saturating_add(*total));
        let mut slices: Vec<BreakdownSlice> = breakdown
            .into_iter()
            .map(|(category, total)| {
                // Dividing first keeps the intermediate within range.
                let percent = total
                    .checked_div(grand_total)
                    .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
                    .map(|percent| percent.round_dp(1))
                    .unwrap_or(Decimal::ZERO);
                BreakdownSlice {
                    category,
                    total,
                    percent,
                }
            })
            .collect();
        slices.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        slices
    }

    pub fn totals(ledger: &Ledger) -> LedgerTotals {
        ledger
            .transactions
            .iter()
            .fold(LedgerTotals::default(), |mut totals, txn| {
                if txn.is_income() {
                    totals.income = totals.income.saturating_add(txn.amount);
                } else {
                    totals.expenses = totals.expenses.saturating_add(txn.magnitude());
                }
                totals.balance = totals.balance.saturating_add(txn.amount);
                totals
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_domain::{Transaction, TransactionKind};

    fn txn(amount: i64, kind: TransactionKind, category: &str) -> Transaction {
        Transaction::new(Decimal::new(amount, 0), kind, category, "")
    }

    #[test]
    fn slices_are_sorted_and_sum_to_hundred() {
        let mut ledger = Ledger::new();
        ledger.transactions.push(txn(25, TransactionKind::Expense, "Transport"));
        ledger.transactions.push(txn(75, TransactionKind::Expense, "Food"));
        ledger.transactions.push(txn(500, TransactionKind::Income, "Other"));

        let slices = SummaryService::breakdown_slices(&ledger);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category, "Food");
        assert_eq!(slices[0].percent, Decimal::new(750, 1));
        assert_eq!(slices[1].percent, Decimal::new(250, 1));
    }

    #[test]
    fn empty_ledger_has_no_slices() {
        let ledger = Ledger::new();
        assert!(SummaryService::breakdown_slices(&ledger).is_empty());
        assert_eq!(SummaryService::totals(&ledger), LedgerTotals::default());
    }

    #[test]
    fn aggregates_saturate_instead_of_overflowing() {
        let mut ledger = Ledger::new();
        ledger.transactions.push(Transaction::new(
            Decimal::from_scientific("1e27").expect("valid"),
            TransactionKind::Expense,
            "Food",
            "",
        ));
        for _ in 0..2 {
            ledger
                .transactions
                .push(Transaction::new(Decimal::MAX, TransactionKind::Income, "Other", ""));
        }

        assert_eq!(SummaryService::balance(&ledger), Decimal::MAX);
        assert_eq!(SummaryService::totals(&ledger).income, Decimal::MAX);

        let slices = SummaryService::breakdown_slices(&ledger);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].percent, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn thirds_round_to_one_decimal() {
        let mut ledger = Ledger::new();
        ledger.transactions.push(txn(1, TransactionKind::Expense, "Food"));
        ledger.transactions.push(txn(2, TransactionKind::Expense, "Other"));

        let slices = SummaryService::breakdown_slices(&ledger);
        assert_eq!(slices[0].percent, Decimal::new(667, 1));
        assert_eq!(slices[1].percent, Decimal::new(333, 1));
    }

    #[test]
    fn totals_split_income_and_expenses() {
        let mut ledger = Ledger::new();
        ledger.transactions.push(txn(100, TransactionKind::Income, "Food"));
        ledger.transactions.push(txn(30, TransactionKind::Expense, "Food"));
        ledger.transactions.push(txn(20, TransactionKind::Expense, "Other"));

        let totals = SummaryService::totals(&ledger);
        assert_eq!(totals.income, Decimal::new(100, 0));
        assert_eq!(totals.expenses, Decimal::new(50, 0));
        assert_eq!(totals.balance, Decimal::new(50, 0));
    }
}
