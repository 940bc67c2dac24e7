use rust_decimal::Decimal;

use super::saturating_sum;
use crate::models::{Budget, Transaction};

/// Whether a transaction counts against a budget: an expense in exactly the
/// same category (case-sensitive) dated within the budget's month.
pub(crate) fn matches(budget: &Budget, txn: &Transaction) -> bool {
    txn.is_expense()
        && txn.category == budget.category
        && txn.month() == Some(budget.month.as_str())
}

/// Total spend attributed to a budget. Zero when nothing matches.
pub(crate) fn spent_for(budget: &Budget, transactions: &[Transaction]) -> Decimal {
    saturating_sum(
        transactions
            .iter()
            .filter(|t| matches(budget, t))
            .map(|t| t.amount),
    )
}
