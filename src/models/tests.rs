#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Transaction ───────────────────────────────────────────────

fn make_txn(kind: TransactionKind, amount: Decimal) -> Transaction {
    Transaction::new(kind, "Food".into(), amount, "2024-01-15".into())
}

#[test]
fn test_income() {
    let txn = make_txn(TransactionKind::Income, dec!(100.00));
    assert!(txn.is_income());
    assert!(!txn.is_expense());
}

#[test]
fn test_expense() {
    let txn = make_txn(TransactionKind::Expense, dec!(50.00));
    assert!(!txn.is_income());
    assert!(txn.is_expense());
}

#[test]
fn test_new_transaction_defaults() {
    let txn = make_txn(TransactionKind::Expense, dec!(12.34));
    assert!(!txn.id.is_empty());
    assert!(txn.description.is_empty());
    assert!(!txn.created_at.is_empty());
}

#[test]
fn test_new_transactions_get_distinct_ids() {
    let a = make_txn(TransactionKind::Expense, dec!(1));
    let b = make_txn(TransactionKind::Expense, dec!(1));
    assert_ne!(a.id, b.id);
}

#[test]
fn test_transaction_month() {
    let txn = make_txn(TransactionKind::Income, dec!(1));
    assert_eq!(txn.month(), Some("2024-01"));
}

#[test]
fn test_transaction_month_short_date() {
    let mut txn = make_txn(TransactionKind::Income, dec!(1));
    txn.date = "2024".into();
    assert_eq!(txn.month(), None);
}

#[test]
fn test_transaction_month_multibyte_date_does_not_panic() {
    let mut txn = make_txn(TransactionKind::Income, dec!(1));
    txn.date = "2024-0ł-01".into();
    assert_eq!(txn.month(), None);
}

// ── TransactionKind ───────────────────────────────────────────

#[test]
fn test_kind_parse() {
    assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
    assert_eq!(TransactionKind::parse("INCOME"), Some(TransactionKind::Income));
    assert_eq!(TransactionKind::parse(" expense "), Some(TransactionKind::Expense));
    assert_eq!(TransactionKind::parse("transfer"), None);
    assert_eq!(TransactionKind::parse(""), None);
}

#[test]
fn test_kind_as_str_roundtrip() {
    for kind in [TransactionKind::Income, TransactionKind::Expense] {
        assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
    }
}

#[test]
fn test_kind_display() {
    assert_eq!(format!("{}", TransactionKind::Expense), "expense");
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_new() {
    let budget = Budget::new("Food".into(), "2024-01".into(), dec!(500));
    assert!(!budget.id.is_empty());
    assert_eq!(budget.category, "Food");
    assert_eq!(budget.month, "2024-01");
    assert_eq!(budget.limit, dec!(500));
}

// ── round_money ───────────────────────────────────────────────

#[test]
fn test_round_money_half_up() {
    assert_eq!(round_money(dec!(1.005)), dec!(1.01));
    assert_eq!(round_money(dec!(2.345)), dec!(2.35));
}

#[test]
fn test_round_money_negative_half_away_from_zero() {
    assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
}

#[test]
fn test_round_money_already_rounded() {
    assert_eq!(round_money(dec!(42.10)), dec!(42.10));
    assert_eq!(round_money(Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn test_round_money_truncates_long_fraction() {
    assert_eq!(round_money(dec!(66.666666)), dec!(66.67));
}
