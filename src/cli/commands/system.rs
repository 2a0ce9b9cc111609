use crate::cli::core::{closest_match, CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "List commands or describe one of them",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "exit",
            "Save the ledger and leave the shell",
            "exit",
            cmd_exit,
        ),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(topic) = args.first() else {
        help::print_overview(&context.registry);
        return Ok(());
    };

    let name = topic.to_lowercase();
    let entry = context
        .command(&name)
        .or_else(|| closest_match(&name, context.registry.names()).and_then(|n| context.command(n)));
    match entry {
        Some(entry) => help::print_command(entry),
        None => context.suggest_command(topic),
    }
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if let Err(err) = context.store.flush() {
        io::print_warning(format!("Ledger could not be saved before exit: {err}"));
    }
    Err(CommandError::ExitRequested)
}
