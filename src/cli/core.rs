//! Core CLI dispatch, argument parsing and shell context helpers.

use std::{
    collections::{HashMap, HashSet},
    io,
    path::PathBuf,
    str::FromStr,
};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use rust_decimal::Decimal;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::{utils::PathResolver, LedgerStore, SystemClock},
    errors::LedgerError,
    storage::JsonFileSlot,
};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State shared by every command: the open ledger plus shell settings.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub base_dir: PathBuf,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that stop the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let slot = JsonFileSlot::in_base(Some(base.clone()))?;
        let store = LedgerStore::open_with(
            Box::new(slot),
            config.slot_key.clone(),
            Box::new(SystemClock),
        );

        if mode == CliMode::Script {
            output::set_color_enabled(false);
        }

        Ok(ShellContext {
            mode,
            registry,
            store,
            theme: ColorfulTheme::default(),
            config,
            base_dir: base,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "money-magnet> ".to_string()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn currency(&self) -> &str {
        &self.store.snapshot().settings.currency
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

    /// Tokenises one input line and runs the command it names.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&format!("Could not read input: {err}"));
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };

        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        let control = self.dispatch(&raw.to_lowercase(), raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest_match(input, self.registry.names()) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    /// Asks before destructive actions. Scripts never prompt.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(err) if !err.is_rejection() => {
                self.print_error(&err.to_string());
                self.print_hint("Check that the data directory is writable.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }

    /// Returns the positional argument at `index`, prompting for it in
    /// interactive mode when it was not supplied.
    pub(crate) fn arg_or_prompt(
        &self,
        args: &[String],
        index: usize,
        label: &str,
        usage: &str,
    ) -> Result<String, CommandError> {
        if let Some(value) = args.get(index) {
            return Ok(value.clone());
        }
        match self.mode {
            CliMode::Interactive => cli_io::prompt_text(&self.theme, label),
            CliMode::Script => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
        }
    }
}

/// Splits `--name value` options and bare `--switch` flags from positionals.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ParsedArgs {
    pub positional: Vec<String>,
    pub options: HashMap<String, String>,
    pub switches: HashSet<String>,
}

impl ParsedArgs {
    pub(crate) fn parse(args: &[&str], switches: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                parsed.positional.push(arg.to_string());
                continue;
            };
            let name = name.to_ascii_lowercase();
            if switches.contains(&name.as_str()) {
                parsed.switches.insert(name);
                continue;
            }
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("option `--{}` needs a value", name))
            })?;
            parsed.options.insert(name, value.to_string());
        }
        Ok(parsed)
    }

    pub(crate) fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub(crate) fn has(&self, name: &str) -> bool {
        self.switches.contains(name)
    }
}

pub(crate) fn closest_match<'a>(
    input: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
    let needle = input.to_lowercase();
    candidates
        .map(|candidate| (levenshtein(candidate, &needle), candidate))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

pub(crate) fn parse_amount(input: &str) -> Result<Decimal, CommandError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    Decimal::from_str(&cleaned).map_err(|_| {
        CommandError::InvalidArguments(format!("invalid amount `{}`", input))
    })
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

pub(crate) fn parse_toggle(input: &str) -> Result<bool, CommandError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected `on` or `off`, got `{}`",
            other
        ))),
    }
}

pub(crate) fn parse_enum<T: FromStr<Err = String>>(input: &str) -> Result<T, CommandError> {
    input.parse().map_err(CommandError::InvalidArguments)
}

/// Resolves a record reference: the 1-based row number shown by `list`,
/// or a full identifier.
pub(crate) fn resolve_record(token: &str, ids: &[Uuid], kind: &str) -> Result<Uuid, CommandError> {
    if let Ok(id) = Uuid::parse_str(token.trim()) {
        return Ok(id);
    }
    let index: usize = token.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a {} number or id", token, kind))
    })?;
    index
        .checked_sub(1)
        .and_then(|idx| ids.get(idx))
        .copied()
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("no {} at position {}", kind, index))
        })
}

pub(crate) fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

#[cfg(test)]
pub(crate) fn process_script(
    base: PathBuf,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{BillStatus, TransactionType};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn parse_line_handles_quotes() {
        let tokens =
            shell_words::split("transaction add 12.50 Food \"Corner cafe\" --tags coffee,treat")
                .unwrap();
        assert_eq!(
            tokens,
            vec!["transaction", "add", "12.50", "Food", "Corner cafe", "--tags", "coffee,treat"]
        );
    }

    #[test]
    fn parsed_args_separate_options_and_switches() {
        let parsed =
            ParsedArgs::parse(&["Rent", "--recurring", "--merchant", "Landlord", "1200"], &["recurring"])
                .unwrap();
        assert_eq!(parsed.positional, vec!["Rent", "1200"]);
        assert_eq!(parsed.option("merchant"), Some("Landlord"));
        assert!(parsed.has("recurring"));
        assert!(ParsedArgs::parse(&["--merchant"], &[]).is_err());
    }

    #[test]
    fn amounts_accept_symbols_and_grouping() {
        assert_eq!(parse_amount("$1,250.75").unwrap(), dec!(1250.75));
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn records_resolve_by_position_or_id() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        assert_eq!(resolve_record("2", &ids, "goal").unwrap(), ids[1]);
        assert_eq!(resolve_record(&ids[0].to_string(), &ids, "goal").unwrap(), ids[0]);
        assert!(resolve_record("0", &ids, "goal").is_err());
        assert!(resolve_record("3", &ids, "goal").is_err());
    }

    #[test]
    fn suggestions_use_edit_distance() {
        let names = ["transaction", "budget", "goal"];
        assert_eq!(closest_match("budgte", names.into_iter()), Some("budget"));
        assert_eq!(closest_match("zzzzzzzz", names.into_iter()), None);
    }

    #[test]
    fn script_runner_applies_commands() {
        let dir = tempdir().unwrap();
        let context = process_script(
            dir.path().to_path_buf(),
            &[
                "transaction add 45 Food Groceries --merchant \"Fresh Mart\"",
                "bill add Internet 60 2025-01-15 Utilities --recurring",
                "bill pay 1",
                "goal contribute 1 250",
                "settings currency eur",
                "exit",
            ],
        )
        .unwrap();

        let snapshot = context.store.snapshot();
        assert_eq!(snapshot.transactions.len(), 4);
        assert_eq!(snapshot.transactions[0].description, "Contribution to Emergency Fund");
        assert_eq!(snapshot.transactions[1].description, "Payment for Internet");
        assert_eq!(snapshot.transactions[2].merchant.as_deref(), Some("Fresh Mart"));
        assert_eq!(snapshot.transactions[3].kind, TransactionType::Income);
        assert_eq!(snapshot.bills[0].status, BillStatus::Paid);
        assert_eq!(snapshot.goals[0].current, dec!(250));
        assert_eq!(snapshot.budgets[1].spent, dec!(45));
        assert_eq!(snapshot.settings.currency, "EUR");
    }

    #[test]
    fn rejected_commands_keep_state() {
        let dir = tempdir().unwrap();
        let context = process_script(
            dir.path().to_path_buf(),
            &[
                "transaction add 0 Food Nothing",
                "goal contribute 1 -5",
                "budget edit 9 --allocated 10",
                "unknown-command",
            ],
        )
        .unwrap();
        let snapshot = context.store.snapshot();
        assert_eq!(snapshot.transactions.len(), 1);
        assert!(snapshot.goals[0].current.is_zero());
    }

    #[test]
    fn state_survives_restart() {
        let dir = tempdir().unwrap();
        process_script(dir.path().to_path_buf(), &["budget add Travel 400"]).unwrap();
        let context = process_script(dir.path().to_path_buf(), &[]).unwrap();
        let categories: Vec<_> = context
            .store
            .snapshot()
            .budgets
            .iter()
            .map(|b| b.category.clone())
            .collect();
        assert_eq!(categories, vec!["Housing", "Food", "Travel"]);
    }
}
