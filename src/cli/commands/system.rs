use tracing::info;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::demo;
use crate::ledger::CURRENT_SCHEMA_VERSION;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("user", "Show or change the user name", "user [name]", cmd_user),
        CommandEntry::new(
            "demo",
            "Replace all records with the sample dataset",
            "demo",
            cmd_demo,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandEntry::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Finance Tracker {}", meta.version));
    output::info(format!("  Schema ver   : v{CURRENT_SCHEMA_VERSION}"));
    output::info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_user(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        output::info(format!("Current user: {}", context.tracker.user));
        return Ok(());
    }
    let name = args.join(" ");
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::InvalidArguments("user name cannot be empty".into()));
    }
    context.tracker.user = name.to_string();
    context.persist()?;
    output::success(format!("Hello, {name}!"));
    Ok(())
}

fn cmd_demo(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mut sample = demo::sample_tracker();
    sample.user = context.tracker.user.clone();
    context.tracker = sample;
    context.persist()?;
    info!("sample dataset loaded");
    output::success(format!(
        "Loaded {} sample transactions.",
        context.tracker.transaction_count()
    ));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
