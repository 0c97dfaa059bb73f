use rust_decimal::Decimal;

use crate::{
    category_service::CategoryService,
    storage::ledger_warnings,
    summary_service::SummaryService,
    transaction_service::{TransactionEdit, TransactionService, MAX_AMOUNT},
    ValidationError,
};
use tally_domain::{Ledger, TransactionKind};

fn dec(value: i64) -> Decimal {
    Decimal::new(value, 0)
}

fn three_entry_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    TransactionService::add(&mut ledger, "100", "Food", "salary", TransactionKind::Income)
        .expect("add income");
    TransactionService::add(&mut ledger, "40", "Food", "coffee", TransactionKind::Expense)
        .expect("add expense");
    TransactionService::add(&mut ledger, "15.50", "Transport", "bus", TransactionKind::Expense)
        .expect("add expense");
    ledger
}

#[test]
fn income_and_expense_drive_balance_and_breakdown() {
    let mut ledger = Ledger::new();
    TransactionService::add(&mut ledger, "100", "Food", "lunch", TransactionKind::Income)
        .expect("add income");
    TransactionService::add(&mut ledger, "40", "Food", "coffee", TransactionKind::Expense)
        .expect("add expense");

    assert_eq!(SummaryService::balance(&ledger), dec(60));
    let breakdown = SummaryService::category_breakdown(&ledger);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown.get("Food"), Some(&dec(40)));
}

#[test]
fn balance_is_signed_sum_of_accepted_amounts() {
    let mut ledger = Ledger::new();
    let inputs = [
        ("10.25", TransactionKind::Income),
        ("abc", TransactionKind::Income),
        ("3", TransactionKind::Expense),
        ("0", TransactionKind::Expense),
        ("7,5", TransactionKind::Expense),
        ("1e2", TransactionKind::Income),
    ];
    let mut expected = Decimal::ZERO;
    for (input, kind) in inputs {
        if let Ok(txn) = TransactionService::add(&mut ledger, input, "Other", "", kind) {
            expected += txn.amount;
        }
        assert_eq!(SummaryService::balance(&ledger), expected);
    }
    assert_eq!(ledger.transactions.len(), 4);
    assert_eq!(expected, Decimal::new(9975, 2));
}

#[test]
fn non_positive_amounts_are_rejected() {
    let mut ledger = Ledger::new();
    let err = TransactionService::add(&mut ledger, "-5", "Food", "", TransactionKind::Expense)
        .expect_err("negative input");
    assert_eq!(err, ValidationError::NonPositiveAmount);
    let err = TransactionService::add(&mut ledger, "0", "Food", "", TransactionKind::Income)
        .expect_err("zero input");
    assert_eq!(err, ValidationError::NonPositiveAmount);
    assert!(ledger.transactions.is_empty());
}

#[test]
fn unparseable_amount_is_not_a_number() {
    let mut ledger = Ledger::new();
    let err = TransactionService::add(&mut ledger, " twelve ", "Food", "", TransactionKind::Income)
        .expect_err("text input");
    assert_eq!(err, ValidationError::NotANumber("twelve".into()));
    assert!(ledger.transactions.is_empty());
}

#[test]
fn amounts_above_the_cap_are_rejected() {
    let mut ledger = Ledger::new();
    let at_cap = TransactionService::add(
        &mut ledger,
        "1000000000000000",
        "Other",
        "",
        TransactionKind::Income,
    )
    .expect("amount at the cap");
    assert_eq!(at_cap.amount, MAX_AMOUNT);

    for input in ["1000000000000000.01", "79228162514264337593543950335", "1e27"] {
        let err = TransactionService::add(&mut ledger, input, "Other", "", TransactionKind::Income)
            .expect_err("amount above the cap");
        assert_eq!(err, ValidationError::AmountTooLarge { max: MAX_AMOUNT });
    }
    assert_eq!(ledger.transactions.len(), 1);
}

#[test]
fn edits_above_the_cap_are_rejected() {
    let mut ledger = three_entry_ledger();
    let before = ledger.clone();
    let err = TransactionService::edit(
        &mut ledger,
        1,
        TransactionEdit::new().amount(-(MAX_AMOUNT + Decimal::ONE)),
    )
    .expect_err("edit above the cap");
    assert_eq!(err, ValidationError::AmountTooLarge { max: MAX_AMOUNT });
    assert_eq!(ledger, before);
}

#[test]
fn balance_at_the_cap_does_not_overflow() {
    let mut ledger = Ledger::new();
    for _ in 0..1000 {
        TransactionService::add(
            &mut ledger,
            "1000000000000000",
            "Other",
            "",
            TransactionKind::Income,
        )
        .expect("add at cap");
    }
    assert_eq!(
        SummaryService::balance(&ledger),
        MAX_AMOUNT * Decimal::from(1000)
    );
}

#[test]
fn add_accepts_category_outside_the_set() {
    let mut ledger = Ledger::new();
    let txn = TransactionService::add(&mut ledger, "5", "Travel", "", TransactionKind::Expense)
        .expect("permissive add");
    assert_eq!(txn.category, "Travel");
    assert_eq!(ledger.transactions.last().map(|t| t.id), Some(txn.id));
}

#[test]
fn duplicate_category_is_rejected_once() {
    let mut ledger = Ledger::new();
    CategoryService::add(&mut ledger, "Health").expect("first add");
    let err = CategoryService::add(&mut ledger, "Health").expect_err("second add");
    assert_eq!(err, ValidationError::DuplicateCategory("Health".into()));
    assert_eq!(
        ledger.categories.iter().filter(|c| *c == "Health").count(),
        1
    );
    // Matching is case-sensitive.
    CategoryService::add(&mut ledger, "health").expect("different case");
}

#[test]
fn empty_category_name_is_rejected() {
    let mut ledger = Ledger::new();
    let before = ledger.clone();
    assert!(matches!(
        CategoryService::add(&mut ledger, ""),
        Err(ValidationError::DuplicateCategory(_))
    ));
    assert_eq!(ledger, before);
}

#[test]
fn deleting_last_category_fails() {
    let mut ledger = Ledger::with_categories(["Only"]);
    let err = CategoryService::remove(&mut ledger, "Only").expect_err("last category");
    assert_eq!(err, ValidationError::LastCategory);
    assert_eq!(ledger.categories, vec!["Only".to_string()]);
}

#[test]
fn deleting_unknown_category_fails() {
    let mut ledger = Ledger::new();
    let before = ledger.clone();
    let err = CategoryService::remove(&mut ledger, "Missing").expect_err("unknown");
    assert_eq!(err, ValidationError::UnknownCategory("Missing".into()));
    assert_eq!(ledger, before);
}

#[test]
fn deleting_category_reassigns_to_new_first() {
    let mut ledger = Ledger::with_categories(["Food", "Transport"]);
    TransactionService::add(&mut ledger, "12", "Transport", "taxi", TransactionKind::Expense)
        .expect("add");

    let removal = CategoryService::remove(&mut ledger, "Transport").expect("remove");
    assert_eq!(ledger.categories, vec!["Food".to_string()]);
    assert_eq!(ledger.transactions[0].category, "Food");
    assert_eq!(removal.reassigned_to, "Food");
    assert_eq!(removal.reassigned, 1);
}

#[test]
fn deleting_first_category_reassigns_to_following_one() {
    let mut ledger = three_entry_ledger();
    CategoryService::remove(&mut ledger, "Food").expect("remove first");
    assert!(ledger.transactions.iter().all(|txn| txn.category != "Food"));
    assert_eq!(ledger.transactions[0].category, "Transport");
    assert_eq!(ledger.transactions[1].category, "Transport");
    assert_eq!(ledger.categories[0], "Transport");
}

#[test]
fn edit_amount_preserves_sign() {
    let mut ledger = three_entry_ledger();
    TransactionService::edit(&mut ledger, 1, TransactionEdit::new().amount(dec(55)))
        .expect("edit expense");
    TransactionService::edit(&mut ledger, 0, TransactionEdit::new().amount(dec(-80)))
        .expect("edit income");

    assert_eq!(ledger.transactions[1].amount, dec(-55));
    assert_eq!(ledger.transactions[0].amount, dec(80));
}

#[test]
fn edit_out_of_range_leaves_ledger_unchanged() {
    let mut ledger = three_entry_ledger();
    let before = ledger.clone();
    let err = TransactionService::edit(
        &mut ledger,
        999,
        TransactionEdit::new().description("nope"),
    )
    .expect_err("out of range");
    assert_eq!(err, ValidationError::IndexOutOfRange { index: 999, len: 3 });
    assert_eq!(ledger, before);
}

#[test]
fn edit_with_zero_amount_is_rejected_without_changes() {
    let mut ledger = three_entry_ledger();
    let before = ledger.clone();
    let err = TransactionService::edit(
        &mut ledger,
        0,
        TransactionEdit::new().amount(Decimal::ZERO).description("changed"),
    )
    .expect_err("zero amount");
    assert_eq!(err, ValidationError::NonPositiveAmount);
    assert_eq!(ledger, before);
}

#[test]
fn edit_ignores_unknown_category() {
    let mut ledger = three_entry_ledger();
    let outcome = TransactionService::edit(
        &mut ledger,
        2,
        TransactionEdit::new()
            .category("Nowhere")
            .description("late bus"),
    )
    .expect("edit");
    assert!(outcome.changed);
    assert_eq!(outcome.ignored_category.as_deref(), Some("Nowhere"));
    assert_eq!(ledger.transactions[2].category, "Transport");
    assert_eq!(ledger.transactions[2].description, "late bus");
}

#[test]
fn edit_with_same_values_reports_no_change() {
    let mut ledger = three_entry_ledger();
    let outcome = TransactionService::edit(
        &mut ledger,
        1,
        TransactionEdit::new().category("Food").amount(dec(40)),
    )
    .expect("edit");
    assert!(!outcome.changed);
    assert!(outcome.ignored_category.is_none());
}

#[test]
fn warnings_flag_unknown_categories() {
    let mut ledger = Ledger::with_categories(["Food", "Food"]);
    TransactionService::add(&mut ledger, "1", "Ghost", "", TransactionKind::Expense).expect("add");
    let warnings = ledger_warnings(&ledger);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("more than once"));
    assert!(warnings[1].contains("Ghost"));
}

#[test]
fn ensure_not_empty_reseeds_defaults() {
    let mut ledger = Ledger::with_categories(Vec::<String>::new());
    assert!(CategoryService::ensure_not_empty(&mut ledger));
    assert_eq!(ledger.categories.len(), 5);
    assert!(!CategoryService::ensure_not_empty(&mut ledger));
}
