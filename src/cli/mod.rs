pub mod commands;
pub mod output;
pub mod registry;
pub mod render;
mod shell;
pub mod shell_context;

pub use shell::run_cli;
pub use shell_context::{CliMode, CommandError, CommandResult, ShellContext};

use strsim::levenshtein;

const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Closest candidate to `needle`, if any is within a small edit distance.
pub fn suggest<'a>(needle: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let needle = needle.to_lowercase();
    candidates
        .into_iter()
        .map(|candidate| (levenshtein(&needle, &candidate.to_lowercase()), candidate))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}
