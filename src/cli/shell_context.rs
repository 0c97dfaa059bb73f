//! Shell state and command dispatch.

use std::sync::mpsc::{self, Receiver};

use tally_config::Config;
use tally_core::LedgerChange;
use thiserror::Error;

use crate::cli::{commands, output, registry::CommandRegistry, render, suggest};
use crate::core::ledger_book::{LedgerBook, OpenReport};
use crate::errors::LedgerError;

/// How commands reach the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    /// Commands are read line by line from stdin, without prompts or colour.
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Recoverable failure of a single command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    mode: CliMode,
    pub(crate) running: bool,
    book: LedgerBook,
    config: Config,
    registry: CommandRegistry,
    changes: Receiver<LedgerChange>,
}

impl ShellContext {
    pub fn new(mode: CliMode, mut book: LedgerBook, config: Config) -> Self {
        let (sender, changes) = mpsc::channel();
        book.subscribe(Box::new(move |change, _| {
            let _ = sender.send(change.clone());
        }));
        Self {
            mode,
            running: true,
            book,
            config,
            registry: CommandRegistry::from_entries(commands::all()),
            changes,
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn book(&self) -> &LedgerBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut LedgerBook {
        &mut self.book
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    pub fn prompt(&self) -> String {
        format!("tally [{}]> ", render::format_amount(self.book.balance(), self.currency()))
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Tells the user about anything unusual found while opening the ledger.
    pub fn report_open(&self, report: &OpenReport) {
        if let Some(err) = &report.load_error {
            output::error(format!("Could not read the ledger: {err}"));
            match &report.preserved_backup {
                Some(backup) => output::warning(format!(
                    "Started a new ledger; the unreadable file was kept as backup `{}`.",
                    backup.id
                )),
                None => output::warning("Started a new ledger."),
            }
        } else if report.created {
            output::info(format!(
                "Created a new ledger at {}",
                self.book.storage_location()
            ));
        }
        for warning in &report.warnings {
            output::warning(warning);
        }
        if let Some(err) = &report.save_error {
            output::error(format!("Could not save the ledger: {err}"));
        }
    }

    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let handler = self
            .registry
            .handler(command)
            .ok_or_else(|| CommandError::UnknownCommand(command.to_string()))?;
        let result = handler(self, args);
        self.refresh();
        result?;
        if self.running {
            Ok(LoopControl::Continue)
        } else {
            Ok(LoopControl::Exit)
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match &err {
            CommandError::UnknownCommand(name) => {
                output::error(&err);
                match suggest(name, self.registry.names()) {
                    Some(candidate) => output::info(format!("Did you mean `{candidate}`?")),
                    None => output::info("Type `help` to list commands."),
                }
            }
            CommandError::Ledger(ledger_err) if ledger_err.is_persistence() => {
                output::error(&err);
                output::warning("The change is kept for this session but is not saved to disk.");
            }
            _ => output::error(&err),
        }
    }

    /// Re-renders what the pending change notifications invalidated.
    fn refresh(&mut self) {
        let mut balance_stale = false;
        while let Ok(change) = self.changes.try_recv() {
            if let LedgerChange::CategoryRemoved {
                reassigned,
                reassigned_to,
                ..
            } = &change
            {
                if *reassigned > 0 {
                    output::info(format!(
                        "{reassigned} transaction(s) moved to `{reassigned_to}`."
                    ));
                }
            }
            balance_stale |= change.affects_transactions();
        }
        if balance_stale {
            output::info(render::balance_line(self.book.balance(), self.currency()));
        }
    }
}
