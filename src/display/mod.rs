use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::round_money;
use crate::summary::BudgetStatus;

/// Colour bucket for a figure: fine, or in the red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Ok,
    Over,
}

/// Display-ready values for one budget row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetView {
    pub(crate) id: String,
    pub(crate) category: String,
    pub(crate) month: String,
    pub(crate) limit: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    /// Raw percentage, above 100 when over budget.
    pub(crate) percentage: Decimal,
    /// Clamped to [0, 100] for bar widths.
    pub(crate) display_percentage: Decimal,
    pub(crate) is_over_budget: bool,
    pub(crate) tone: Tone,
}

impl BudgetView {
    pub(crate) fn from_status(status: &BudgetStatus) -> Self {
        let is_over_budget = status.is_over_budget();
        Self {
            id: status.budget.id.clone(),
            category: status.budget.category.clone(),
            month: status.budget.month.clone(),
            limit: round_money(status.budget.limit),
            spent: round_money(status.spent),
            remaining: round_money(status.remaining),
            percentage: status.percentage,
            display_percentage: clamp_percentage(status.percentage),
            is_over_budget,
            tone: if is_over_budget { Tone::Over } else { Tone::Ok },
        }
    }

    /// The raw percentage as a whole number, e.g. `"67%"` or `"200%"`.
    pub(crate) fn percentage_label(&self) -> String {
        format!(
            "{}%",
            self.percentage
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        )
    }
}

pub(crate) fn clamp_percentage(pct: Decimal) -> Decimal {
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

pub(crate) fn balance_tone(balance: Decimal) -> Tone {
    if balance >= Decimal::ZERO {
        Tone::Ok
    } else {
        Tone::Over
    }
}

/// Format a decimal amount with thousand separators, 2 decimal places and a
/// currency suffix. e.g. `1234567.89` → `"1,234,567.89 PLN"`
pub(crate) fn format_amount(val: Decimal, currency: &str) -> String {
    let rounded = round_money(val);
    let formatted = format!("{:.2}", rounded.abs());
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    if currency.is_empty() {
        format!("{sign}{with_commas}.{dec_part}")
    } else {
        format!("{sign}{with_commas}.{dec_part} {currency}")
    }
}

/// Text progress bar for a percentage; values outside [0, 100] are clamped.
pub(crate) fn progress_bar(pct: Decimal, width: usize) -> String {
    let filled = (clamp_percentage(pct) * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    let empty = width - filled;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}
