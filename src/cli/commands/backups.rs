use crate::cli::core::{required, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "backup",
            "Snapshot the store into the backups directory",
            "backup [note]",
            cmd_backup,
        ),
        CommandEntry::new("backups", "List backups, newest first", "backups", cmd_backups),
        CommandEntry::new(
            "restore",
            "Replace all records with a backup",
            "restore <name>",
            cmd_restore,
        ),
    ]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = args.join(" ");
    let note = (!note.trim().is_empty()).then_some(note.as_str());
    let info = context.store.store().backup(note)?;
    output::success(format!("Backup written: {}", info.name));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.store.store().list_backups()?;
    output::section("Backups");
    if backups.is_empty() {
        output::info("No backups yet. Use `backup [note]` to create one.");
        return Ok(());
    }
    for (idx, backup) in backups.iter().enumerate() {
        output::info(format!("  {:>2}. {}", idx + 1, backup.name));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, "restore <name>")?;
    context.store.store_mut().restore_backup(name)?;
    context.reload()?;
    output::success(format!(
        "Restored `{name}` ({} transactions).",
        context.tracker.transaction_count()
    ));
    Ok(())
}
