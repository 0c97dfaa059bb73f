//! Text renderings of the ledger: numbered list, balance, and breakdown chart.

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use tally_core::{BreakdownSlice, LedgerTotals};
use tally_domain::{Money, Transaction};

const BAR_CHAR: char = '#';

pub fn format_amount(amount: Money, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if currency.is_empty() {
        format!("{:.2}", rounded)
    } else {
        format!("{:.2} {}", rounded, currency)
    }
}

/// `"<n>. <category>: <description> (<amount>)"` with `n` counted from 1.
pub fn transaction_line(position: usize, txn: &Transaction, currency: &str) -> String {
    format!(
        "{}. {}: {} ({})",
        position,
        txn.category,
        txn.description,
        format_amount(txn.amount, currency)
    )
}

pub fn transaction_lines(transactions: &[Transaction], currency: &str) -> Vec<String> {
    transactions
        .iter()
        .enumerate()
        .map(|(index, txn)| transaction_line(index + 1, txn, currency))
        .collect()
}

pub fn balance_line(balance: Money, currency: &str) -> String {
    format!("Balance: {}", format_amount(balance, currency))
}

pub fn totals_lines(totals: &LedgerTotals, currency: &str) -> Vec<String> {
    vec![
        format!("Income:   {}", format_amount(totals.income, currency)),
        format!("Expenses: {}", format_amount(totals.expenses, currency)),
        balance_line(totals.balance, currency),
    ]
}

/// Horizontal bar chart of expense shares, `width` characters for 100%.
pub fn breakdown_chart(slices: &[BreakdownSlice], currency: &str, width: usize) -> Vec<String> {
    let label_width = slices
        .iter()
        .map(|slice| slice.category.chars().count())
        .max()
        .unwrap_or(0);
    let amounts: Vec<String> = slices
        .iter()
        .map(|slice| format_amount(slice.total, currency))
        .collect();
    let amount_width = amounts.iter().map(String::len).max().unwrap_or(0);

    slices
        .iter()
        .zip(amounts)
        .map(|(slice, amount)| {
            format!(
                "{:<label_width$}  {:>amount_width$}  {:>5.1}%  {}",
                slice.category,
                amount,
                slice.percent,
                bar(slice.percent, width)
            )
        })
        .collect()
}

fn bar(percent: Decimal, width: usize) -> String {
    let scaled = (percent * Decimal::from(width) / Decimal::ONE_HUNDRED).round();
    let mut length = scaled.to_usize().unwrap_or(0).min(width);
    if length == 0 && percent > Decimal::ZERO {
        length = 1;
    }
    BAR_CHAR.to_string().repeat(length)
}
