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
use crate::cli::registry::CommandRegistry;
use crate::core::LoadOrigin;

const SCRIPT_ENV: &str = "MONEY_MAGNET_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    report_origin(&context);

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn report_origin(context: &ShellContext) {
    match context.store.origin() {
        LoadOrigin::Recovered => output::warning(
            "Saved ledger data could not be read; starting again from the sample ledger.",
        ),
        LoadOrigin::Seeded if context.mode == CliMode::Interactive => {
            output::info("No saved ledger found; created one with sample data.")
        }
        _ => {}
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<LedgerHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(LedgerHelper::from_registry(&context.registry)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::section("Money Magnet");
    output::info("Type `help` to list commands, `exit` to quit.");

    while context.running {
        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        editor.add_history_entry(trimmed).ok();

        match context.process_line(trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        match context.process_line(&line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
        if !context.running {
            break;
        }
    }
    Ok(())
}

struct CommandSpec {
    name: &'static str,
    usage: &'static str,
    subcommands: Vec<&'static str>,
}

/// Completes command and subcommand names and hints at the usage line.
struct LedgerHelper {
    commands: Vec<CommandSpec>,
}

impl LedgerHelper {
    fn from_registry(registry: &CommandRegistry) -> Self {
        let mut commands: Vec<CommandSpec> = registry
            .list()
            .map(|entry| CommandSpec {
                name: entry.name,
                usage: entry.usage,
                subcommands: entry.subcommands(),
            })
            .collect();
        commands.sort_by_key(|spec| spec.name);
        Self { commands }
    }

    fn find(&self, name: &str) -> Option<&CommandSpec> {
        let name = name.to_ascii_lowercase();
        self.commands.iter().find(|spec| spec.name == name)
    }

    fn candidates<'a, I>(names: I, needle: &str) -> Vec<Pair>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let needle = needle.to_ascii_lowercase();
        names
            .into_iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect()
    }
}

impl Helper for LedgerHelper {}

impl Completer for LedgerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = &prefix[start..];
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();

        let candidates = match words.as_slice() {
            [] => Self::candidates(self.commands.iter().map(|spec| spec.name), needle),
            [command] => match self.find(command) {
                Some(spec) => Self::candidates(spec.subcommands.iter().copied(), needle),
                None => Vec::new(),
            },
            _ => Vec::new(),
        };
        Ok((start, candidates))
    }
}

impl Hinter for LedgerHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() || !line.ends_with(' ') {
            return None;
        }
        let mut words = line.split_whitespace();
        let command = words.next()?;
        if words.next().is_some() {
            return None;
        }
        let spec = self.find(command)?;
        spec.usage
            .strip_prefix(spec.name)
            .map(|rest| rest.trim_start().to_string())
            .filter(|rest| !rest.is_empty())
    }
}

impl Highlighter for LedgerHelper {}

impl Validator for LedgerHelper {}
