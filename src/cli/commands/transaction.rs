use crate::cli::core::{parse_kind, required, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{SavingsService, TransactionService};
use crate::core::validation::{validate_transaction, TransactionDraft, ValidTransaction};
use crate::currency::{format_amount, format_percentage};
use crate::errors::TrackerError;
use crate::ledger::{Transaction, TransactionKind};

const ADD_USAGE: &str = "add <income|expense|saving> <name> <amount> <date> <category> [description]";
const EDIT_USAGE: &str =
    "edit <income|expense|saving> <id> <name> <amount> <date> <category> [description]";
const REMOVE_USAGE: &str = "remove <income|expense|saving> <id>";
const LIST_USAGE: &str = "list <income|expense|saving> [category]";
const CATEGORIES_USAGE: &str = "categories <income|expense|saving>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a transaction", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Replace a transaction's fields", EDIT_USAGE, cmd_edit),
        CommandEntry::new("remove", "Delete a transaction", REMOVE_USAGE, cmd_remove),
        CommandEntry::new("list", "List transactions, newest first", LIST_USAGE, cmd_list),
        CommandEntry::new(
            "categories",
            "Show the categories of a collection",
            CATEGORIES_USAGE,
            cmd_categories,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(required(args, 0, ADD_USAGE)?)?;
    let input = validated(&args[1..], ADD_USAGE)?;
    let name = input.name.clone();
    let id = TransactionService::add(&mut context.tracker, kind, input);
    context.persist()?;
    output::success(format!("Added {kind} `{name}` ({id})."));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(required(args, 0, EDIT_USAGE)?)?;
    let id = required(args, 1, EDIT_USAGE)?;
    let input = validated(&args[2..], EDIT_USAGE)?;
    TransactionService::edit(&mut context.tracker, kind, id, input)?;
    context.persist()?;
    output::success(format!("Updated {kind} transaction {id}."));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(required(args, 0, REMOVE_USAGE)?)?;
    let id = required(args, 1, REMOVE_USAGE)?;
    let removed = TransactionService::remove(&mut context.tracker, kind, id)?;
    context.persist()?;
    output::success(format!("Removed {kind} `{}`.", removed.name));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(required(args, 0, LIST_USAGE)?)?;
    let category = args.get(1).copied();
    let rows = TransactionService::list(&context.tracker, kind, category);
    output::section(match category {
        Some(name) => format!("{} in {name}", heading(kind)),
        None => heading(kind).to_string(),
    });
    if rows.is_empty() {
        output::info("No transactions recorded.");
        return Ok(());
    }
    for txn in rows {
        output::info(render_row(txn, context.currency()));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(required(args, 0, CATEGORIES_USAGE)?)?;
    let symbol = context.currency();
    let tracker = &context.tracker;
    output::section(format!("{} categories", heading(kind)));
    let names = tracker.category_names(kind);
    if names.is_empty() {
        output::info("No categories yet.");
        return Ok(());
    }
    match kind {
        TransactionKind::Income => {
            for name in names {
                output::info(format!("  {name}"));
            }
        }
        TransactionKind::Expense => {
            for category in &tracker.expense_categories {
                let detail = match (category.tracked, category.start_date) {
                    (true, Some(start)) => format!(
                        "{} every {} week(s) from {start}",
                        format_amount(category.allowance, symbol),
                        category.num_weeks
                    ),
                    _ => "no spendable budget".to_string(),
                };
                output::info(format!("  {:<20} {detail}", category.name));
            }
        }
        TransactionKind::Saving => {
            for category in &tracker.savings_categories {
                let saved = SavingsService::total_saved(&category.name, &tracker.savings);
                let detail = if category.tracked {
                    let percent = SavingsService::percentage_saved(category, &tracker.savings)
                        .map(format_percentage)
                        .unwrap_or_else(|_| "-".into());
                    format!(
                        "{} of {} ({percent})",
                        format_amount(saved, symbol),
                        format_amount(category.goal, symbol)
                    )
                } else {
                    format!("{} saved, no goal", format_amount(saved, symbol))
                };
                output::info(format!("  {:<20} {detail}", category.name));
            }
        }
    }
    Ok(())
}

/// Validates `<name> <amount> <date> <category> [description]`.
fn validated(fields: &[&str], usage: &str) -> Result<ValidTransaction, CommandError> {
    if fields.len() < 4 {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    }
    let draft = TransactionDraft {
        name: fields[0].to_string(),
        amount: fields[1].to_string(),
        date: fields[2].to_string(),
        category: fields[3].to_string(),
        desc: fields[4..].join(" "),
    };
    validate_transaction(&draft).map_err(|errors| CommandError::Tracker(TrackerError::from(errors)))
}

fn heading(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expenses",
        TransactionKind::Saving => "Savings",
    }
}

fn render_row(txn: &Transaction, symbol: &str) -> String {
    let mut row = format!(
        "  {}  {}  {:<22} {:>12}  [{}]",
        txn.id,
        txn.date,
        txn.name,
        format_amount(txn.amount, symbol),
        txn.category
    );
    if let Some(desc) = &txn.desc {
        row.push_str(&format!("  {desc}"));
    }
    row
}
