pub mod commands;
pub mod core;
pub mod help;
pub mod icons;
pub mod io;
pub mod output;
pub mod registry;
mod shell;

pub use self::core::{CliError, CommandError};
pub use shell::run_cli;
