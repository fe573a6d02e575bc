use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output;

const SCRIPT_ENV: &str = "FINANCE_TRACKER_CLI_SCRIPT";

/// Runs the shell, reading commands from stdin when `FINANCE_TRACKER_CLI_SCRIPT` is set.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => {
            output::disable_colors();
            run_script(&mut context)
        }
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info(format!(
        "Welcome, {}. Type `help` to see available commands.",
        context.tracker.user
    ));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match context.process_line(trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) => {
                output::hint("Type `exit` or press Ctrl-D to leave.");
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match context.process_line(&line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

/// Completes the command word against the registered names.
struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    /// Start offset of the word being completed and its candidates.
    fn candidates(&self, prefix: &str) -> (usize, Vec<&str>) {
        let start = prefix.len() - prefix.trim_start().len();
        let word = &prefix[start..];
        // Arguments are free-form; only the first word is a command.
        if word.contains(char::is_whitespace) {
            return (prefix.len(), Vec::new());
        }
        let needle = word.to_ascii_lowercase();
        let matches = self
            .commands
            .iter()
            .map(String::as_str)
            .filter(|name| name.starts_with(&needle))
            .collect();
        (start, matches)
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CommandHelper {
        CommandHelper::new(vec!["budgets", "budget", "backup", "help", "budget"])
    }

    #[test]
    fn completes_command_prefixes() {
        let helper = helper();
        assert_eq!(helper.candidates("bu"), (0, vec!["budget", "budgets"]));
        assert_eq!(helper.candidates("  HE"), (2, vec!["help"]));
        assert_eq!(helper.candidates("x").1, Vec::<&str>::new());
    }

    #[test]
    fn arguments_are_not_completed() {
        let helper = helper();
        let (start, matches) = helper.candidates("budget sa");
        assert_eq!(start, 9);
        assert!(matches.is_empty());
    }
}
