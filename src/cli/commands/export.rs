use std::path::PathBuf;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "export",
        "Write the full ledger as a dated JSON file",
        "export [directory]",
        cmd_export,
    )]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = match args.first() {
        Some(path) => PathBuf::from(path),
        None => context.config.export_dir_in(&context.base_dir),
    };
    let path = context.store.export_to_dir(&dir)?;
    io::print_success(format!("Data exported to {}", path.display()));
    Ok(())
}
