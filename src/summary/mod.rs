//! Derived figures over the transaction and budget collections.
//!
//! Everything here is a pure function of its inputs. Callers pass the
//! current month explicitly so nothing reads the clock.
//!
//! Arithmetic saturates at `Decimal::MAX`/`Decimal::MIN` instead of
//! panicking, since stored rows may not have passed input validation.

pub(crate) mod matcher;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{Budget, Transaction};

pub(crate) use matcher::spent_for;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    pub(crate) balance: Decimal,
}

/// A budget together with how much of it has been used.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetStatus {
    pub(crate) budget: Budget,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    /// Unclamped; above 100 when over budget.
    pub(crate) percentage: Decimal,
}

impl BudgetStatus {
    pub(crate) fn is_over_budget(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

/// Dashboard snapshot for one month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Summary {
    pub(crate) month: String,
    pub(crate) totals: Totals,
    pub(crate) top_expenses: Vec<(String, Decimal)>,
    pub(crate) active_budgets: Vec<BudgetStatus>,
}

// ── Totals ────────────────────────────────────────────────────

pub(crate) fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

pub(crate) fn total_income(transactions: &[Transaction]) -> Decimal {
    saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount),
    )
}

pub(crate) fn total_expense(transactions: &[Transaction]) -> Decimal {
    saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount),
    )
}

/// All-time income minus expenses. Not clamped at zero.
pub(crate) fn balance(transactions: &[Transaction]) -> Decimal {
    total_income(transactions).saturating_sub(total_expense(transactions))
}

pub(crate) fn totals(transactions: &[Transaction]) -> Totals {
    Totals {
        income: total_income(transactions),
        expense: total_expense(transactions),
        balance: balance(transactions),
    }
}

// ── Top expenses ──────────────────────────────────────────────

/// The `n` expense categories with the largest summed amounts, largest first.
/// Equal totals keep the order in which their category first appeared.
pub(crate) fn top_expenses(transactions: &[Transaction], n: usize) -> Vec<(String, Decimal)> {
    let mut grouped: Vec<(String, Decimal)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match index.get(txn.category.as_str()) {
            Some(&i) => grouped[i].1 = grouped[i].1.saturating_add(txn.amount),
            None => {
                index.insert(txn.category.as_str(), grouped.len());
                grouped.push((txn.category.clone(), txn.amount));
            }
        }
    }

    // sort_by is stable, which gives the first-seen tie-break
    grouped.sort_by(|a, b| b.1.cmp(&a.1));
    grouped.truncate(n);
    grouped
}

// ── Budgets ───────────────────────────────────────────────────

pub(crate) fn budget_status(budget: &Budget, transactions: &[Transaction]) -> BudgetStatus {
    let spent = spent_for(budget, transactions);
    let (remaining, percentage) = if budget.limit > Decimal::ZERO {
        (
            budget.limit.saturating_sub(spent),
            percentage_of(spent, budget.limit),
        )
    } else {
        (-spent, Decimal::ZERO)
    };
    BudgetStatus {
        budget: budget.clone(),
        spent,
        remaining,
        percentage,
    }
}

/// `spent * 100 / limit` for a positive limit. Multiplying first keeps
/// precision; when that overflows, divide first, and saturate past that.
fn percentage_of(spent: Decimal, limit: Decimal) -> Decimal {
    spent
        .checked_mul(HUNDRED)
        .and_then(|scaled| scaled.checked_div(limit))
        .or_else(|| spent.checked_div(limit).map(|ratio| ratio.saturating_mul(HUNDRED)))
        .unwrap_or(if spent.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Status of every budget, in input order.
pub(crate) fn budget_statuses(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| budget_status(b, transactions))
        .collect()
}

/// Budgets for `current_month`, plus any budget from another month that is
/// over its limit.
pub(crate) fn active_budget_statuses(
    budgets: &[Budget],
    transactions: &[Transaction],
    current_month: &str,
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| budget_status(b, transactions))
        .filter(|s| s.budget.month == current_month || s.is_over_budget())
        .collect()
}

pub(crate) fn summarize(
    transactions: &[Transaction],
    budgets: &[Budget],
    current_month: &str,
    top_n: usize,
) -> Summary {
    Summary {
        month: current_month.to_string(),
        totals: totals(transactions),
        top_expenses: top_expenses(transactions, top_n),
        active_budgets: active_budget_statuses(budgets, transactions, current_month),
    }
}
