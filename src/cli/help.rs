use crate::cli::io;
use crate::cli::output::section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    section("Available commands");
    for entry in registry.list() {
        io::print_info(format!("  {:<12} {}", entry.name, entry.description));
    }
    io::print_info("Use `help <command>` for details.");
    io::print_hint("Records are referenced by their row number in `list` output or by full id.");
}

pub fn print_command(entry: &CommandEntry) {
    section(format!("Help: {}", entry.name));
    io::print_info(format!("  {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));

    let subcommands = entry.subcommands();
    if !subcommands.is_empty() {
        io::print_info(format!("  Subcommands: {}", subcommands.join(", ")));
    }
}
