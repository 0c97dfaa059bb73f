use tally_core::LedgerChange;

use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "Manage categories",
        "category <add|remove|list> [name]",
        cmd_category,
    )
    .with_aliases(&["categories"])]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_categories(context);
    };
    match action.to_lowercase().as_str() {
        "add" => {
            let name = category_name(rest, "add")?;
            context.book_mut().add_category(&name)?;
            output::success(format!("Category `{name}` added."));
            Ok(())
        }
        "remove" | "delete" | "rm" => {
            let name = category_name(rest, "remove")?;
            let change = context.book_mut().delete_category(&name)?;
            if let LedgerChange::CategoryRemoved { reassigned_to, .. } = change {
                output::success(format!(
                    "Category `{name}` removed; its transactions now use `{reassigned_to}`."
                ));
            }
            Ok(())
        }
        "list" => list_categories(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category action `{other}`; expected add, remove or list"
        ))),
    }
}

/// Names may contain spaces, so the remaining words are joined back.
fn category_name(words: &[&str], action: &str) -> Result<String, CommandError> {
    if words.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "usage: category {action} <name>"
        )));
    }
    Ok(words.join(" "))
}

fn list_categories(context: &ShellContext) -> CommandResult {
    output::section("Categories");
    output::lines(
        context
            .book()
            .categories()
            .iter()
            .enumerate()
            .map(|(index, name)| format!("{}. {}", index + 1, name)),
    );
    Ok(())
}
