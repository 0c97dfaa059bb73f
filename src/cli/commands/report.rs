use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::cli::shell_context::{CommandResult, ShellContext};

const CHART_WIDTH: usize = 30;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "balance",
            "Show income, expenses and the running balance",
            "balance",
            cmd_balance,
        ),
        CommandEntry::new(
            "breakdown",
            "Chart expenses per category",
            "breakdown",
            cmd_breakdown,
        )
        .with_aliases(&["chart"]),
    ]
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = context.book().totals();
    output::section("Summary");
    output::lines(render::totals_lines(&totals, context.currency()));
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let slices = context.book().breakdown_slices();
    if slices.is_empty() {
        output::info("No expenses yet.");
        return Ok(());
    }
    output::section("Expenses by category");
    output::lines(render::breakdown_chart(&slices, context.currency(), CHART_WIDTH));
    Ok(())
}
