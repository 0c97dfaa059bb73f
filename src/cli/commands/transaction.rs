use tally_core::{TransactionEdit, TransactionService, ValidationError};
use tally_domain::TransactionKind;

use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::cli::suggest;
use crate::errors::LedgerError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "income",
            "Record money coming in",
            "income <amount> <category> [description]",
            cmd_income,
        ),
        CommandEntry::new(
            "expense",
            "Record money going out",
            "expense <amount> <category> [description]",
            cmd_expense,
        ),
        CommandEntry::new(
            "list",
            "Show the numbered transaction list",
            "list",
            cmd_list,
        )
        .with_aliases(&["ls"]),
        CommandEntry::new(
            "edit",
            "Change a transaction by its list number",
            "edit <n> [amount=<value>] [category=<name>] [description=<text>]",
            cmd_edit,
        ),
    ]
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    add_transaction(context, args, TransactionKind::Income)
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    add_transaction(context, args, TransactionKind::Expense)
}

fn add_transaction(context: &mut ShellContext, args: &[&str], kind: TransactionKind) -> CommandResult {
    let [amount, category, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {} <amount> <category> [description]",
            kind.to_string().to_lowercase()
        )));
    };
    require_category(context, category)?;
    let description = rest.join(" ");

    let transaction = context
        .book_mut()
        .add_transaction(amount, category, &description, kind)?;
    let position = context.book().transactions().len();
    output::success(format!(
        "{} added: {}",
        transaction.kind(),
        render::transaction_line(position, &transaction, context.currency())
    ));
    Ok(())
}

/// New transactions may only use categories from the current set.
fn require_category(context: &ShellContext, name: &str) -> CommandResult {
    let categories = context.book().categories();
    if categories.iter().any(|category| category == name) {
        return Ok(());
    }
    let hint = match suggest(name, categories.iter().map(String::as_str)) {
        Some(candidate) => format!(" Did you mean `{candidate}`?"),
        None => format!(" Available: {}.", categories.join(", ")),
    };
    Err(CommandError::InvalidArguments(format!(
        "unknown category `{name}`.{hint}"
    )))
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let book = context.book();
    if book.transactions().is_empty() {
        output::info("No transactions recorded.");
        return Ok(());
    }
    output::section("Transactions");
    output::lines(render::transaction_lines(book.transactions(), context.currency()));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = || {
        CommandError::InvalidArguments(
            "usage: edit <n> [amount=<value>] [category=<name>] [description=<text>]".into(),
        )
    };
    let (position, fields) = args.split_first().ok_or_else(usage)?;
    let position: usize = position
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{position}` is not a list number")))?;
    if fields.is_empty() {
        return Err(usage());
    }

    let mut edit = TransactionEdit::new();
    for field in fields {
        let (key, value) = field.split_once('=').ok_or_else(usage)?;
        edit = match key.to_lowercase().as_str() {
            "amount" => edit.amount(
                TransactionService::parse_number(value).map_err(LedgerError::from)?,
            ),
            "category" => edit.category(value),
            "description" => edit.description(value),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown field `{other}`; expected amount, category or description"
                )))
            }
        };
    }
    let requested_category = edit.category.clone();

    let index = position
        .checked_sub(1)
        .ok_or_else(|| CommandError::InvalidArguments("list numbers start at 1".into()))?;
    let change = match context.book_mut().edit_transaction(index, edit) {
        Err(LedgerError::Validation(ValidationError::IndexOutOfRange { len, .. })) => {
            return Err(CommandError::InvalidArguments(format!(
                "no transaction #{position}; the list has {len}"
            )))
        }
        other => other?,
    };

    if let Some(category) = requested_category {
        if !context.book().categories().contains(&category) {
            output::warning(format!(
                "Category `{category}` does not exist; category left unchanged."
            ));
        }
    }
    match change {
        Some(_) => {
            if let Some(transaction) = context.book().transaction(index) {
                output::success(format!(
                    "Updated {}",
                    render::transaction_line(position, transaction, context.currency())
                ));
            }
        }
        None => output::info("Nothing changed."),
    }
    Ok(())
}
