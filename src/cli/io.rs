//! Terminal prompts used when a command is missing arguments.

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::CommandError;

pub use crate::cli::output::{
    error as print_error, hint as print_hint, info as print_info, success as print_success,
    warning as print_warning,
};

pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Reads a value for a missing field. Blank answers are refused at the prompt
/// so ledger records never receive an empty name or category.
pub fn prompt_text(theme: &ColorfulTheme, label: &str) -> Result<String, CommandError> {
    let value = Input::<String>::with_theme(theme)
        .with_prompt(label)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err(format!("{label} cannot be empty"))
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}
