#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn txn(kind: TransactionKind, category: &str, amount: Decimal, date: &str) -> Transaction {
    Transaction::new(kind, category.into(), amount, date.into())
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.transactions().unwrap().is_empty());
    assert!(db.budgets().unwrap().is_empty());
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_on_disk_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendwise.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.add_transaction(&txn(TransactionKind::Income, "Salary", dec!(10), "2024-01-01"))
            .unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.transactions().unwrap().len(), 1);
}

#[test]
fn test_reopen_stamps_outdated_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendwise.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.add_transaction(&txn(TransactionKind::Expense, "Food", dec!(5), "2024-01-01"))
            .unwrap();
        db.conn
            .execute("UPDATE schema_version SET version = 0", [])
            .unwrap();
    }
    let db = Database::open(&path).unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
    assert_eq!(db.transactions().unwrap().len(), 1);
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_transaction_roundtrip() {
    let mut db = Database::open_in_memory().unwrap();
    let mut original = txn(TransactionKind::Expense, "Food", dec!(42.99), "2024-01-15");
    original.description = "groceries".into();
    db.add_transaction(&original).unwrap();

    let all = db.transactions().unwrap();
    assert_eq!(all, vec![original]);
}

#[test]
fn test_transactions_newest_first() {
    let mut db = Database::open_in_memory().unwrap();
    db.add_transaction(&txn(TransactionKind::Expense, "A", dec!(1), "2024-01-10"))
        .unwrap();
    db.add_transaction(&txn(TransactionKind::Expense, "B", dec!(1), "2024-03-01"))
        .unwrap();
    db.add_transaction(&txn(TransactionKind::Income, "C", dec!(1), "2023-12-31"))
        .unwrap();

    let dates: Vec<String> = db.transactions().unwrap().into_iter().map(|t| t.date).collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-01-10", "2023-12-31"]);
}

#[test]
fn test_duplicate_transaction_id_rejected() {
    let mut db = Database::open_in_memory().unwrap();
    let t = txn(TransactionKind::Expense, "Food", dec!(1), "2024-01-01");
    db.add_transaction(&t).unwrap();
    assert!(db.add_transaction(&t).is_err());
    assert_eq!(db.get_transaction_count().unwrap(), 1);
}

#[test]
fn test_malformed_amount_reads_as_zero() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO transactions (id, kind, category, amount, date, description, created_at)
             VALUES ('bad', 'expense', 'Food', 'not-a-number', '2024-01-01', '', '')",
            [],
        )
        .unwrap();
    let all = db.transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, Decimal::ZERO);
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_budget_roundtrip() {
    let mut db = Database::open_in_memory().unwrap();
    let budget = Budget::new("Food".into(), "2024-01".into(), dec!(300));
    db.save_budget(&budget).unwrap();

    assert_eq!(db.budgets().unwrap(), vec![budget.clone()]);
    assert_eq!(db.budget(&budget.id).unwrap(), Some(budget));
}

#[test]
fn test_budget_by_id_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.budget("missing").unwrap().is_none());
}

#[test]
fn test_save_budget_updates_by_id() {
    let mut db = Database::open_in_memory().unwrap();
    let mut budget = Budget::new("Food".into(), "2024-01".into(), dec!(300));
    db.save_budget(&budget).unwrap();

    budget.limit = dec!(450.50);
    budget.month = "2024-02".into();
    db.save_budget(&budget).unwrap();

    let all = db.budgets().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].limit, dec!(450.50));
    assert_eq!(all[0].month, "2024-02");
}

#[test]
fn test_duplicate_category_month_allowed() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_budget(&Budget::new("Food".into(), "2024-01".into(), dec!(300)))
        .unwrap();
    db.save_budget(&Budget::new("Food".into(), "2024-01".into(), dec!(100)))
        .unwrap();
    assert_eq!(db.budgets().unwrap().len(), 2);
}

#[test]
fn test_budgets_ordered_by_month_then_category() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_budget(&Budget::new("Rent".into(), "2024-01".into(), dec!(1)))
        .unwrap();
    db.save_budget(&Budget::new("Food".into(), "2024-01".into(), dec!(1)))
        .unwrap();
    db.save_budget(&Budget::new("Zoo".into(), "2024-02".into(), dec!(1)))
        .unwrap();

    let keys: Vec<(String, String)> = db
        .budgets()
        .unwrap()
        .into_iter()
        .map(|b| (b.month, b.category))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("2024-02".to_string(), "Zoo".to_string()),
            ("2024-01".to_string(), "Food".to_string()),
            ("2024-01".to_string(), "Rent".to_string()),
        ]
    );
}

#[test]
fn test_delete_budget() {
    let mut db = Database::open_in_memory().unwrap();
    let budget = Budget::new("Food".into(), "2024-01".into(), dec!(300));
    db.save_budget(&budget).unwrap();

    assert!(db.delete_budget(&budget.id).unwrap());
    assert!(db.budgets().unwrap().is_empty());
    assert!(!db.delete_budget(&budget.id).unwrap());
}

// ── Reset ─────────────────────────────────────────────────────

#[test]
fn test_reset_clears_everything() {
    let mut db = Database::open_in_memory().unwrap();
    db.add_transaction(&txn(TransactionKind::Income, "Salary", dec!(1000), "2024-01-01"))
        .unwrap();
    db.save_budget(&Budget::new("Food".into(), "2024-01".into(), dec!(300)))
        .unwrap();

    db.reset().unwrap();
    assert!(db.transactions().unwrap().is_empty());
    assert!(db.budgets().unwrap().is_empty());
}

// ── Store feeding the aggregator ──────────────────────────────

#[test]
fn test_store_round_trip_into_summary() {
    let mut db = Database::open_in_memory().unwrap();
    db.add_transaction(&txn(TransactionKind::Income, "Salary", dec!(1000), "2024-01-05"))
        .unwrap();
    db.add_transaction(&txn(TransactionKind::Expense, "Food", dec!(200), "2024-01-10"))
        .unwrap();
    db.add_transaction(&txn(TransactionKind::Expense, "Food", dec!(50), "2024-02-01"))
        .unwrap();
    db.save_budget(&Budget::new("Food".into(), "2024-01".into(), dec!(100)))
        .unwrap();

    let summary = crate::summary::summarize(
        &db.transactions().unwrap(),
        &db.budgets().unwrap(),
        "2024-03",
        3,
    );
    assert_eq!(summary.totals.balance, dec!(750));
    assert_eq!(summary.active_budgets.len(), 1);
    assert_eq!(summary.active_budgets[0].remaining, dec!(-100));
}
