use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::cli::suggest;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let registry = context.registry();
    let Some(name) = args.first() else {
        print_overview(registry);
        return Ok(());
    };
    let name = name.to_lowercase();
    match registry.get(&name) {
        Some(entry) => {
            output::section(entry.name);
            output::lines([
                format!("  {}", entry.description),
                format!("  usage: {}", entry.usage),
            ]);
            if !entry.aliases.is_empty() {
                output::lines([format!("  aliases: {}", entry.aliases.join(", "))]);
            }
            Ok(())
        }
        None => {
            let hint = suggest(&name, registry.names())
                .map(|candidate| format!("; did you mean `{candidate}`?"))
                .unwrap_or_default();
            Err(CommandError::InvalidArguments(format!(
                "no help for `{name}`{hint}"
            )))
        }
    }
}

fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    let entries = registry.list();
    let width = entries.iter().map(|entry| entry.usage.len()).max().unwrap_or(0);
    output::lines(
        entries
            .iter()
            .map(|entry| format!("  {:<width$}  {}", entry.usage, entry.description)),
    );
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.stop();
    Ok(())
}
