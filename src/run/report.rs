use anyhow::Result;
use std::io::Write;

use crate::config::Settings;
use crate::display::{balance_tone, format_amount, progress_bar, truncate, BudgetView, Tone};
use crate::models::Transaction;
use crate::summary::{BudgetStatus, Summary};

const BAR_WIDTH: usize = 20;

fn rule(out: &mut impl Write, width: usize) -> Result<()> {
    writeln!(out, "{}", "─".repeat(width))?;
    Ok(())
}

fn over_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Ok => "",
        Tone::Over => "  OVER",
    }
}

// ── Dashboard ────────────────────────────────────────────────

pub(crate) fn write_summary(
    out: &mut impl Write,
    summary: &Summary,
    transaction_count: usize,
    budget_count: usize,
    settings: &Settings,
) -> Result<()> {
    let cur = settings.currency.as_str();
    let totals = &summary.totals;

    writeln!(out, "Spendwise — {}", summary.month)?;
    rule(out, 40)?;
    writeln!(out, "  Income:     {}", format_amount(totals.income, cur))?;
    writeln!(out, "  Expenses:   {}", format_amount(totals.expense, cur))?;
    let deficit = match balance_tone(totals.balance) {
        Tone::Ok => "",
        Tone::Over => "  (deficit)",
    };
    writeln!(out, "  Balance:    {}{deficit}", format_amount(totals.balance, cur))?;
    writeln!(out, "  Total Txns: {transaction_count}")?;

    if transaction_count == 0 && budget_count == 0 {
        writeln!(out)?;
        writeln!(out, "Add your first transactions or budgets to see a summary.")?;
        return Ok(());
    }

    if transaction_count > 0 {
        writeln!(out)?;
        writeln!(out, "Top Expenses:")?;
        if summary.top_expenses.is_empty() {
            writeln!(out, "  No expense data.")?;
        }
        for (category, amount) in &summary.top_expenses {
            writeln!(
                out,
                "  {:<24} {}",
                truncate(category, 24),
                format_amount(*amount, cur)
            )?;
        }
    }

    if !summary.active_budgets.is_empty() {
        writeln!(out)?;
        writeln!(out, "Active Budgets ({}):", summary.month)?;
        for status in &summary.active_budgets {
            let view = BudgetView::from_status(status);
            writeln!(
                out,
                "  {:<18} {} / {} {} {:>5}{}",
                truncate(&view.category, 18),
                format_amount(view.spent, ""),
                format_amount(view.limit, cur),
                progress_bar(view.display_percentage, BAR_WIDTH),
                view.percentage_label(),
                over_marker(view.tone),
            )?;
        }
    }

    Ok(())
}

// ── Transactions ─────────────────────────────────────────────

pub(crate) fn write_transactions(
    out: &mut impl Write,
    transactions: &[Transaction],
    settings: &Settings,
) -> Result<()> {
    if transactions.is_empty() {
        writeln!(out, "No transactions to display.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10}  {:<7}  {:<20}  {:>16}  Description",
        "Date", "Type", "Category", "Amount"
    )?;
    rule(out, 72)?;
    for txn in transactions {
        writeln!(
            out,
            "{:<10}  {:<7}  {:<20}  {:>16}  {}",
            txn.date,
            txn.kind.as_str(),
            truncate(&txn.category, 20),
            format_amount(txn.amount, &settings.currency),
            txn.description,
        )?;
    }
    Ok(())
}

// ── Budgets ──────────────────────────────────────────────────

pub(crate) fn write_budgets(
    out: &mut impl Write,
    statuses: &[BudgetStatus],
    settings: &Settings,
) -> Result<()> {
    if statuses.is_empty() {
        writeln!(out, "No budgets defined.")?;
        writeln!(
            out,
            "Use `spendwise budget set <category> <limit>` to add one."
        )?;
        return Ok(());
    }

    let cur = settings.currency.as_str();
    for status in statuses {
        let view = BudgetView::from_status(status);
        writeln!(out, "{} ({}){}", view.category, view.month, over_marker(view.tone))?;
        writeln!(out, "  Limit:     {}", format_amount(view.limit, cur))?;
        writeln!(out, "  Spent:     {}", format_amount(view.spent, cur))?;
        writeln!(out, "  Remaining: {}", format_amount(view.remaining, cur))?;
        if view.is_over_budget {
            writeln!(out, "  Over by:   {}", format_amount(-view.remaining, cur))?;
        }
        writeln!(
            out,
            "  {} {} used",
            progress_bar(view.display_percentage, BAR_WIDTH),
            view.percentage_label()
        )?;
        writeln!(out, "  id: {}", view.id)?;
    }
    Ok(())
}
