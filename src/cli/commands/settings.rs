use crate::cli::core::{parse_toggle, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section;
use crate::cli::registry::CommandEntry;
use crate::core::services::SettingsService;

const USAGE: &str = "settings <show|dark-mode|notifications|currency> [on|off|CODE]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "settings",
        "Show or change display preferences",
        USAGE,
        cmd_settings,
    )]
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return show(context);
    };
    let value = rest.first().copied();
    match (subcommand.to_ascii_lowercase().as_str(), value) {
        ("show", _) => show(context),
        ("dark-mode", Some(value)) => {
            let enabled = parse_toggle(value)?;
            context.store.set_dark_mode(enabled);
            io::print_success(format!("Dark mode {}.", on_off(enabled)));
            Ok(())
        }
        ("notifications", Some(value)) => {
            let enabled = parse_toggle(value)?;
            context.store.set_notifications(enabled);
            io::print_success(format!("Notifications {}.", on_off(enabled)));
            Ok(())
        }
        ("currency", Some(code)) => {
            context.store.set_currency(code)?;
            io::print_success(format!("Currency set to {}.", context.currency()));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    let settings = SettingsService::current(context.store.snapshot());
    section("Settings");
    io::print_info(format!("  Dark mode    : {}", on_off(settings.dark_mode)));
    io::print_info(format!("  Notifications: {}", on_off(settings.notifications)));
    io::print_info(format!("  Currency     : {}", settings.currency));
    io::print_info(format!("  Data slot    : {}", context.store.key()));
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
