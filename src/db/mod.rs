mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::models::*;

/// Persistence seen by the rest of the app. The aggregation code never talks
/// to this directly; callers load both collections and pass them in.
pub(crate) trait Store {
    fn transactions(&self) -> Result<Vec<Transaction>>;
    fn budgets(&self) -> Result<Vec<Budget>>;
    fn budget(&self, id: &str) -> Result<Option<Budget>>;
    fn add_transaction(&mut self, txn: &Transaction) -> Result<()>;
    /// Insert or overwrite by id; last write wins.
    fn save_budget(&mut self, budget: &Budget) -> Result<()>;
    /// Returns false if no budget had that id.
    fn delete_budget(&mut self, id: &str) -> Result<bool>;
    /// Remove every transaction and budget.
    fn reset(&mut self) -> Result<()>;
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    fn count_budgets_for(&self, category: &str, month: &str, excluding_id: &str) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM budgets WHERE category = ?1 AND month = ?2 AND id != ?3",
            params![category, month, excluding_id],
            |row| row.get(0),
        )?)
    }
}

impl Store for Database {
    // ── Transactions ──────────────────────────────────────────

    fn transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, category, amount, date, description, created_at
             FROM transactions
             ORDER BY date DESC, created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let kind_str: String = row.get(1)?;
            let amount_str: String = row.get(3)?;
            Ok(Transaction {
                kind: TransactionKind::parse(&kind_str).unwrap_or_else(|| {
                    warn!(id = %id, kind = %kind_str, "unknown transaction kind, treating as expense");
                    TransactionKind::Expense
                }),
                amount: parse_stored_amount(&amount_str, "transaction", &id),
                id,
                category: row.get(2)?,
                date: row.get(4)?,
                description: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn add_transaction(&mut self, txn: &Transaction) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO transactions (id, kind, category, amount, date, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    txn.id,
                    txn.kind.as_str(),
                    txn.category,
                    txn.amount.to_string(),
                    txn.date,
                    txn.description,
                    txn.created_at,
                ],
            )
            .with_context(|| format!("Failed to insert transaction {}", txn.id))?;
        debug!(id = %txn.id, kind = %txn.kind, category = %txn.category, "transaction added");
        Ok(())
    }

    // ── Budgets ───────────────────────────────────────────────

    fn budgets(&self) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, month, limit_amount, created_at
             FROM budgets
             ORDER BY month DESC, category, created_at",
        )?;
        let rows = stmt.query_map([], budget_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn budget(&self, id: &str) -> Result<Option<Budget>> {
        let result = self.conn.query_row(
            "SELECT id, category, month, limit_amount, created_at FROM budgets WHERE id = ?1",
            params![id],
            budget_from_row,
        );
        match result {
            Ok(b) => Ok(Some(b)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_budget(&mut self, budget: &Budget) -> Result<()> {
        if self.count_budgets_for(&budget.category, &budget.month, &budget.id)? > 0 {
            warn!(
                category = %budget.category,
                month = %budget.month,
                "another budget already exists for this category and month"
            );
        }
        self.conn
            .execute(
                "INSERT INTO budgets (id, category, month, limit_amount, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                    category = ?2, month = ?3, limit_amount = ?4",
                params![
                    budget.id,
                    budget.category,
                    budget.month,
                    budget.limit.to_string(),
                    budget.created_at,
                ],
            )
            .with_context(|| format!("Failed to save budget {}", budget.id))?;
        debug!(id = %budget.id, category = %budget.category, month = %budget.month, "budget saved");
        Ok(())
    }

    fn delete_budget(&mut self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM budgets WHERE id = ?1", params![id])?;
        debug!(id = %id, deleted, "budget delete");
        Ok(deleted > 0)
    }

    fn reset(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM transactions", [])?;
        tx.execute("DELETE FROM budgets", [])?;
        tx.commit().context("Failed to reset storage")?;
        debug!("storage reset");
        Ok(())
    }
}

fn budget_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Budget> {
    let id: String = row.get(0)?;
    let amt_str: String = row.get(3)?;
    Ok(Budget {
        limit: parse_stored_amount(&amt_str, "budget", &id),
        id,
        category: row.get(1)?,
        month: row.get(2)?,
        created_at: row.get(4)?,
    })
}

/// Stored amounts that fail to parse are read as zero and logged.
fn parse_stored_amount(raw: &str, entity: &str, id: &str) -> Decimal {
    Decimal::from_str(raw).unwrap_or_else(|_| {
        warn!(entity, id = %id, value = %raw, "malformed stored amount, reading as zero");
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests;
