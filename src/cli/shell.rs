//! Read loop for the interactive shell and for piped scripts.

use std::io::{self, BufRead};

use bookly_config::model::CONFIG_KEYS;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::io as cli_io;

const SCRIPT_ENV: &str = "BOOKLY_CLI_SCRIPT";

/// Runs the shell, reading commands from stdin when `BOOKLY_CLI_SCRIPT` is set.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context, io::stdin().lock()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ShellHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if step(context, line)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                cli_io::print_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// One command per line; blank lines and `#` comments are skipped.
fn run_script(context: &mut ShellContext, input: impl BufRead) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if step(context, line)? == LoopControl::Exit || !context.running {
            break;
        }
    }
    Ok(())
}

/// Runs one line, reporting command failures without ending the loop.
fn step(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match handle_line(context, line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            cli_io::print_warning(format!("Could not parse input: {}", err));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    context.last_command = Some(line.to_string());
    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(input)
}

/// Tab completion for command names and the fixed words some commands take.
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    /// Completions for `partial`, given the lowercase words typed before it.
    fn candidates(&self, previous: &[&str], partial: &str) -> Vec<String> {
        let pool: Vec<&str> = match previous {
            [] | ["help"] => self.commands.iter().map(String::as_str).collect(),
            ["config"] => vec!["show", "set"],
            ["config", "set"] => CONFIG_KEYS.to_vec(),
            ["pnl", _] => vec!["monthly", "yearly"],
            ["bookings"] => vec!["next", "prev"],
            ["ledger"] => vec!["all", "next", "prev"],
            _ => Vec::new(),
        };
        let needle = partial.to_ascii_lowercase();
        pool.into_iter()
            .filter(|word| word.starts_with(&needle))
            .map(str::to_string)
            .collect()
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(idx, c)| idx + c.len_utf8());

        let previous: Vec<String> = head[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let previous: Vec<&str> = previous.iter().map(String::as_str).collect();

        let pairs = self
            .candidates(&previous, &head[start..])
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> ShellHelper {
        ShellHelper::new(vec!["ledger", "load", "help", "pnl", "config"])
    }

    #[test]
    fn completes_command_names_by_prefix() {
        assert_eq!(helper().candidates(&[], "l"), vec!["ledger", "load"]);
        assert_eq!(helper().candidates(&["help"], "P"), vec!["pnl"]);
    }

    #[test]
    fn completes_arguments_for_known_commands() {
        assert_eq!(helper().candidates(&["config"], "s"), vec!["show", "set"]);
        assert_eq!(helper().candidates(&["config", "set"], "cur"), vec!["currency", "currency_precision"]);
        assert_eq!(helper().candidates(&["pnl", "2024"], "y"), vec!["yearly"]);
        assert!(helper().candidates(&["load"], "").is_empty());
    }

    #[test]
    fn quoted_arguments_stay_together() {
        assert_eq!(
            parse_command_line("load \"spring weddings\"").unwrap(),
            vec!["load", "spring weddings"]
        );
        assert!(parse_command_line("load \"unterminated").is_err());
    }
}
