//! Shell context, dispatch, and error reporting.

use std::{io, path::PathBuf};

use chrono::{Local, NaiveDate};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use tracing::debug;

use crate::{
    config::{Config, ConfigManager},
    core::utils::PathResolver,
    errors::TrackerError,
    ledger::{Tracker, TransactionKind},
    storage::{keys, JsonFileStore, KeyValueStore, TrackerStore},
};

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Everything a command handler can reach: the loaded tracker, its backing
/// store, and user configuration.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: TrackerStore<JsonFileStore>,
    pub tracker: Tracker,
    pub config: Config,
    pub base_dir: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    pub fn with_base_dir(mode: CliMode, base_dir: PathBuf) -> Result<Self, CliError> {
        let config = ConfigManager::with_base_dir(base_dir.clone())?.load()?;
        let file_store = JsonFileStore::open(
            config.store_path(&base_dir),
            PathResolver::backup_dir_in(&base_dir),
            Some(config.backup_retention),
        )?;
        let has_user = file_store.get_value(keys::USER)?.is_some();
        let store = TrackerStore::new(file_store);
        let mut tracker = store.load()?;
        if !has_user {
            tracker.user = config.default_user.clone();
        }
        debug!(
            base = %base_dir.display(),
            transactions = tracker.transaction_count(),
            "shell context ready"
        );

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            store,
            tracker,
            config,
            base_dir,
            last_command: None,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        format!("finance [{}]> ", self.tracker.user)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Writes the in-memory tracker back to the store.
    pub(crate) fn persist(&mut self) -> CommandResult {
        self.store.save(&self.tracker)?;
        Ok(())
    }

    /// Reloads the tracker after the store contents changed underneath it.
    pub(crate) fn reload(&mut self) -> CommandResult {
        self.tracker = self.store.load()?;
        Ok(())
    }

    pub(crate) fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub(crate) fn currency(&self) -> &str {
        &self.config.currency_symbol
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Tracker(TrackerError::Validation(errors)) => {
                for failure in errors.iter() {
                    output::error(format!("{}: {}", failure.field.label(), failure.message));
                }
            }
            other => output::error(other),
        }
    }
}

/// Returns the positional argument at `index` or a usage error.
pub(crate) fn required<'a>(args: &[&'a str], index: usize, usage: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

pub(crate) fn parse_kind(raw: &str) -> Result<TransactionKind, CommandError> {
    Ok(raw.parse::<TransactionKind>()?)
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{input}` (use YYYY-MM-DD)"))
    })
}

#[cfg(test)]
pub(crate) fn process_script(
    base: &std::path::Path,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base.to_path_buf())?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err),
        }
    }
    Ok(app)
}
