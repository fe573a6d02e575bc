use crate::cli::core::{parse_date, required, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{
    BudgetService, CategoryService, CategoryTotal, SavingsService, SummaryService,
};
use crate::core::validation::{
    validate_goal, validate_savings_budget, validate_spendable_budget, SavingsBudgetDraft,
    SpendableBudgetDraft,
};
use crate::currency::{format_amount, format_percentage};
use crate::errors::TrackerError;

const BUDGET_USAGE: &str = "budget savings <category> <goal> | budget spend <category> <allowance> <start-date> <weeks> | budget goal <category> <goal> | budget remove <savings|spend> <category>";
const BUDGETS_USAGE: &str = "budgets [YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "budget",
            "Configure savings goals and spendable allowances",
            BUDGET_USAGE,
            cmd_budget,
        ),
        CommandEntry::new(
            "budgets",
            "Show budget progress as of today or a given date",
            BUDGETS_USAGE,
            cmd_budgets,
        ),
        CommandEntry::new("summary", "Show totals per collection", "summary", cmd_summary),
    ]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = required(args, 0, BUDGET_USAGE)?.to_lowercase();
    let rest = &args[1..];
    match action.as_str() {
        "savings" | "saving" => set_savings(context, rest),
        "spend" | "spendable" | "expense" => set_spendable(context, rest),
        "goal" => edit_goal(context, rest),
        "remove" => remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown budget action `{other}`; usage: {BUDGET_USAGE}"
        ))),
    }
}

fn set_savings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = SavingsBudgetDraft {
        category: args.first().copied().unwrap_or_default().to_string(),
        goal: args.get(1).copied().unwrap_or_default().to_string(),
    };
    let budget = validate_savings_budget(&draft).map_err(TrackerError::from)?;
    CategoryService::set_savings_budget(&mut context.tracker, &budget)?;
    context.persist()?;
    output::success(format!(
        "Savings goal for {} set to {}.",
        budget.category,
        format_amount(budget.goal, context.currency())
    ));
    Ok(())
}

fn set_spendable(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let field = |index: usize| args.get(index).copied().unwrap_or_default().to_string();
    let draft = SpendableBudgetDraft {
        category: field(0),
        allowance: field(1),
        start_date: field(2),
        num_weeks: field(3),
    };
    let budget = validate_spendable_budget(&draft).map_err(TrackerError::from)?;
    CategoryService::set_spendable_budget(&mut context.tracker, &budget)?;
    context.persist()?;
    output::success(format!(
        "Spendable budget for {}: {} every {} week(s) from {}.",
        budget.category,
        format_amount(budget.allowance, context.currency()),
        budget.num_weeks,
        budget.start_date
    ));
    Ok(())
}

fn edit_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "budget goal <category> <goal>";
    let name = required(args, 0, usage)?;
    let goal = validate_goal(args.get(1).copied().unwrap_or_default()).map_err(TrackerError::from)?;
    CategoryService::update_savings_goal(&mut context.tracker, name, goal)?;
    context.persist()?;
    output::success(format!(
        "Savings goal for {name} is now {}.",
        format_amount(goal, context.currency())
    ));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "budget remove <savings|spend> <category>";
    let scope = required(args, 0, usage)?.to_lowercase();
    let name = required(args, 1, usage)?;
    match scope.as_str() {
        "savings" | "saving" => CategoryService::remove_savings_budget(&mut context.tracker, name)?,
        "spend" | "spendable" | "expense" => {
            CategoryService::remove_spendable_budget(&mut context.tracker, name)?
        }
        _ => return Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
    context.persist()?;
    output::success(format!("Budget removed from {name}."));
    Ok(())
}

fn cmd_budgets(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let now = match args.first() {
        Some(raw) => parse_date(raw)?,
        None => context.today(),
    };
    let symbol = context.currency();

    output::section(format!("Spendable budgets as of {now}"));
    let statuses = BudgetService::spendable_status(&context.tracker, now);
    if statuses.is_empty() {
        output::info("No spendable budgets configured.");
    }
    for status in statuses {
        let line = format!(
            "  {:<20} {} left of {} (spent {}), renews {}",
            status.category,
            format_amount(status.remaining, symbol),
            format_amount(status.allowance, symbol),
            format_amount(status.spent, symbol),
            status.renewal_date
        );
        if status.over_budget() {
            output::warning(line.trim_start());
        } else {
            output::info(line);
        }
    }

    output::section("Savings goals");
    let progress = SavingsService::progress(&context.tracker);
    if progress.is_empty() {
        output::info("No savings goals configured.");
    }
    for entry in progress {
        output::info(format!(
            "  {:<20} {} of {} ({})",
            entry.category,
            format_amount(entry.saved, symbol),
            format_amount(entry.goal, symbol),
            format_percentage(entry.percentage)
        ));
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = SummaryService::summarize(&context.tracker);
    let symbol = context.currency();

    output::section(format!("Summary for {}", context.tracker.user));
    output::info(format!("  Income   : {}", format_amount(summary.income, symbol)));
    output::info(format!("  Expenses : {}", format_amount(summary.expenses, symbol)));
    output::info(format!("  Savings  : {}", format_amount(summary.savings, symbol)));
    output::info(format!("  Net      : {}", format_amount(summary.net, symbol)));

    print_totals("Income by category", &summary.income_by_category, symbol);
    print_totals("Expenses by category", &summary.expenses_by_category, symbol);
    print_totals("Savings by category", &summary.savings_by_category, symbol);
    Ok(())
}

fn print_totals(title: &str, totals: &[CategoryTotal], symbol: &str) {
    if totals.is_empty() {
        return;
    }
    output::section(title);
    for total in totals {
        output::info(format!(
            "  {:<20} {}",
            total.category,
            format_amount(total.total, symbol)
        ));
    }
}
