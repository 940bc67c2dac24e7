//! Validation of user submissions before they reach the store.
//!
//! Only presence, positivity and an upper bound on amounts are checked,
//! plus date/month shape.
//! Amounts are rounded to two decimals here and never again until display.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{round_money, Budget, Transaction, TransactionKind};

/// Largest accepted amount or limit, in whole currency units.
const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("Category must not be empty")]
    EmptyCategory,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Amount must not exceed {}", MAX_AMOUNT)]
    AmountTooLarge,
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("Invalid month (expected YYYY-MM): {0}")]
    InvalidMonth(String),
    #[error("Invalid transaction type (expected income or expense): {0}")]
    InvalidKind(String),
}

/// Raw fields of a new transaction as typed by the user.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionInput {
    pub(crate) kind: String,
    pub(crate) category: String,
    pub(crate) amount: String,
    pub(crate) date: Option<String>,
    pub(crate) description: Option<String>,
}

impl TransactionInput {
    /// `today` is used when no date was given.
    pub(crate) fn validate(&self, today: NaiveDate) -> Result<Transaction, InputError> {
        let kind = TransactionKind::parse(&self.kind)
            .ok_or_else(|| InputError::InvalidKind(self.kind.clone()))?;
        let category = non_empty_category(&self.category)?;
        let amount = positive_amount(&self.amount)?;
        let date = match self.date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => today,
        };

        let mut txn = Transaction::new(
            kind,
            category,
            amount,
            date.format("%Y-%m-%d").to_string(),
        );
        txn.description = self
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        Ok(txn)
    }
}

/// Raw fields of a budget save. A present `id` means an update.
#[derive(Debug, Clone, Default)]
pub(crate) struct BudgetInput {
    pub(crate) id: Option<String>,
    pub(crate) category: String,
    pub(crate) limit: String,
    pub(crate) month: Option<String>,
}

impl BudgetInput {
    /// `current_month` is used when no month was given.
    pub(crate) fn validate(&self, current_month: &str) -> Result<Budget, InputError> {
        let category = non_empty_category(&self.category)?;
        let limit = positive_amount(&self.limit)?;
        let month = parse_month(self.month.as_deref().unwrap_or(current_month))?;

        let mut budget = Budget::new(category, month, limit);
        if let Some(id) = self.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            budget.id = id.to_string();
        }
        Ok(budget)
    }
}

fn non_empty_category(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyCategory);
    }
    Ok(trimmed.to_string())
}

fn positive_amount(raw: &str) -> Result<Decimal, InputError> {
    let trimmed = raw.trim();
    let value = Decimal::from_str(trimmed)
        .map_err(|_| InputError::InvalidAmount(trimmed.to_string()))?;
    let rounded = round_money(value);
    if rounded <= Decimal::ZERO {
        return Err(InputError::NonPositiveAmount);
    }
    if rounded > Decimal::from(MAX_AMOUNT) {
        return Err(InputError::AmountTooLarge);
    }
    Ok(rounded)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, InputError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(trimmed.to_string()))
}

/// Validate a "YYYY-MM" month, returning it in canonical zero-padded form.
pub(crate) fn parse_month(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m").to_string())
        .map_err(|_| InputError::InvalidMonth(trimmed.to_string()))
}
