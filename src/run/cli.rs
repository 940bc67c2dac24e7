use anyhow::{Context as _, Result};
use std::io::Write;
use tracing::info;

use super::report;
use super::Context;
use crate::db::Store;
use crate::display::format_amount;
use crate::input::{parse_month, BudgetInput, TransactionInput};
use crate::models::TransactionKind;
use crate::summary;

/// Flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &["--date", "--desc", "--month", "--id"];

pub(crate) fn as_cli<S: Store>(
    args: &[String],
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> Result<()> {
    let Some(command) = args.first() else {
        return cli_summary(&[], ctx, out);
    };
    let rest = &args[1..];
    match command.as_str() {
        "summary" | "s" => cli_summary(rest, ctx, out),
        "add" | "a" => cli_add(rest, ctx, out),
        "list" | "ls" => cli_list(ctx, out),
        "budgets" | "b" => cli_budgets(ctx, out),
        "budget" => cli_budget(rest, ctx, out),
        "reset" => cli_reset(rest, ctx, out),
        "--help" | "-h" | "help" => {
            print_usage(out)?;
            Ok(())
        }
        "--version" | "-V" | "version" => {
            writeln!(out, "spendwise {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Spendwise — personal finance tracker")?;
    writeln!(out)?;
    writeln!(out, "Usage: spendwise [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  (none), summary [YYYY-MM]     Dashboard: totals, top expenses, active budgets")?;
    writeln!(out, "  add <income|expense> <category> <amount>")?;
    writeln!(out, "    --date <YYYY-MM-DD>         Transaction date (default: today)")?;
    writeln!(out, "    --desc <text>               Optional description")?;
    writeln!(out, "  list                          List transactions, newest first")?;
    writeln!(out, "  budgets                       List all budgets with their usage")?;
    writeln!(out, "  budget set <category> <limit> Create or update a budget")?;
    writeln!(out, "    --month <YYYY-MM>           Budget month (default: current)")?;
    writeln!(out, "    --id <id>                   Update the budget with this id")?;
    writeln!(out, "  budget delete <id>            Delete a budget")?;
    writeln!(out, "  reset --yes                   Delete all transactions and budgets")?;
    writeln!(out, "  --help, -h                    Show this help")?;
    writeln!(out, "  --version, -V                 Show version")?;
    Ok(())
}

// ── Argument helpers ─────────────────────────────────────────

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Fails when a value flag is the last argument and so has no value.
fn require_flag_values(args: &[String]) -> Result<()> {
    if let Some(last) = args.last() {
        if VALUE_FLAGS.contains(&last.as_str()) {
            anyhow::bail!("Missing value for {last}");
        }
    }
    Ok(())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Arguments that are neither flags nor the values of flags.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut result = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            result.push(arg.as_str());
        }
    }
    result
}

// ── Commands ─────────────────────────────────────────────────

fn cli_summary<S: Store>(args: &[String], ctx: &mut Context<S>, out: &mut impl Write) -> Result<()> {
    let month = match positionals(args).first() {
        Some(m) => parse_month(m)?,
        None => ctx.current_month(),
    };

    let transactions = ctx.store.transactions()?;
    let budgets = ctx.store.budgets()?;
    let summary = summary::summarize(
        &transactions,
        &budgets,
        &month,
        ctx.settings.top_expenses,
    );
    report::write_summary(out, &summary, transactions.len(), budgets.len(), &ctx.settings)
}

fn cli_add<S: Store>(args: &[String], ctx: &mut Context<S>, out: &mut impl Write) -> Result<()> {
    require_flag_values(args)?;
    let pos = positionals(args);
    let [kind, category, amount] = pos.as_slice() else {
        anyhow::bail!(
            "Usage: spendwise add <income|expense> <category> <amount> [--date YYYY-MM-DD] [--desc TEXT]"
        );
    };

    let input = TransactionInput {
        kind: kind.to_string(),
        category: category.to_string(),
        amount: amount.to_string(),
        date: flag_value(args, "--date").map(str::to_string),
        description: flag_value(args, "--desc").map(str::to_string),
    };
    let txn = input.validate(ctx.today)?;
    ctx.store.add_transaction(&txn)?;
    info!(id = %txn.id, "transaction recorded");

    let label = match txn.kind {
        TransactionKind::Income => "Income added",
        TransactionKind::Expense => "Expense added",
    };
    writeln!(
        out,
        "{label}: {} in {} on {}",
        format_amount(txn.amount, &ctx.settings.currency),
        txn.category,
        txn.date
    )?;
    Ok(())
}

fn cli_list<S: Store>(ctx: &mut Context<S>, out: &mut impl Write) -> Result<()> {
    let transactions = ctx.store.transactions()?;
    report::write_transactions(out, &transactions, &ctx.settings)
}

fn cli_budgets<S: Store>(ctx: &mut Context<S>, out: &mut impl Write) -> Result<()> {
    let transactions = ctx.store.transactions()?;
    let budgets = ctx.store.budgets()?;
    let statuses = summary::budget_statuses(&budgets, &transactions);
    report::write_budgets(out, &statuses, &ctx.settings)
}

fn cli_budget<S: Store>(args: &[String], ctx: &mut Context<S>, out: &mut impl Write) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("set") => cli_budget_set(&args[1..], ctx, out),
        Some("delete" | "rm") => cli_budget_delete(&args[1..], ctx, out),
        _ => anyhow::bail!("Usage: spendwise budget <set|delete> ..."),
    }
}

fn cli_budget_set<S: Store>(
    args: &[String],
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> Result<()> {
    require_flag_values(args)?;
    let pos = positionals(args);
    let [category, limit] = pos.as_slice() else {
        anyhow::bail!("Usage: spendwise budget set <category> <limit> [--month YYYY-MM] [--id ID]");
    };

    let input = BudgetInput {
        id: flag_value(args, "--id").map(str::to_string),
        category: category.to_string(),
        limit: limit.to_string(),
        month: flag_value(args, "--month").map(str::to_string),
    };
    let existing = match input.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => ctx.store.budget(id)?,
        _ => None,
    };
    // An update without --month keeps the budget's month.
    let default_month = existing
        .as_ref()
        .map(|b| b.month.clone())
        .unwrap_or_else(|| ctx.current_month());
    let mut budget = input.validate(&default_month)?;
    if let Some(prev) = &existing {
        budget.created_at = prev.created_at.clone();
    }

    ctx.store.save_budget(&budget)?;
    info!(id = %budget.id, updated = existing.is_some(), "budget saved");

    let verb = if existing.is_some() { "Updated" } else { "Saved" };
    writeln!(
        out,
        "{verb} budget for \"{}\" ({}): limit {} [id {}]",
        budget.category,
        budget.month,
        format_amount(budget.limit, &ctx.settings.currency),
        budget.id
    )?;
    Ok(())
}

fn cli_budget_delete<S: Store>(
    args: &[String],
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> Result<()> {
    let Some(id) = positionals(args).first().copied() else {
        anyhow::bail!("Usage: spendwise budget delete <id>");
    };
    let deleted = ctx
        .store
        .delete_budget(id)
        .with_context(|| format!("Failed to delete budget {id}"))?;
    if !deleted {
        anyhow::bail!("Budget not found: {id}");
    }
    info!(id = %id, "budget deleted");
    writeln!(out, "Budget deleted.")?;
    Ok(())
}

fn cli_reset<S: Store>(args: &[String], ctx: &mut Context<S>, out: &mut impl Write) -> Result<()> {
    if !has_flag(args, "--yes") {
        anyhow::bail!("This deletes every transaction and budget. Re-run with --yes to confirm.");
    }
    ctx.store.reset()?;
    info!("storage reset");
    writeln!(out, "All transactions and budgets deleted.")?;
    Ok(())
}
