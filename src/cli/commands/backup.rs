use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "backup",
            "Save a timestamped copy of the ledger",
            "backup [note]",
            cmd_backup,
        ),
        CommandEntry::new("backups", "List saved backups", "backups", cmd_backups),
        CommandEntry::new(
            "restore",
            "Replace the ledger with a backup",
            "restore <backup-id>",
            cmd_restore,
        ),
    ]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = args.join(" ");
    let note = (!note.trim().is_empty()).then_some(note.as_str());
    let info = context.book().backup(note)?;
    output::success(format!("Backup `{}` created.", info.id));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.book().list_backups()?;
    if backups.is_empty() {
        output::info("No backups yet.");
        return Ok(());
    }
    output::section("Backups");
    output::lines(backups.iter().enumerate().map(|(index, info)| {
        if info.created_at.is_empty() {
            format!("{}. {}", index + 1, info.id)
        } else {
            format!("{}. {} ({})", index + 1, info.id, info.created_at)
        }
    }));
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [backup_id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: restore <backup-id>".into(),
        ));
    };
    context.book_mut().restore(backup_id)?;
    output::success(format!("Ledger restored from `{backup_id}`."));
    Ok(())
}
