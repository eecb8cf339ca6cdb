//! Thin printing facade over [`crate::cli::output`] plus confirmation prompts.

use std::fmt::Display;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::core::CommandError;
use crate::cli::output;

pub fn print_info(message: impl Display) {
    output::info(message);
}

pub fn print_warning(message: impl Display) {
    output::warning(message);
}

pub fn print_error(message: impl Display) {
    output::error(message);
}

pub fn print_success(message: impl Display) {
    output::success(message);
}

pub fn print_hint(message: impl Display) {
    output::hint(message);
}

/// Prints an indented `label : value` line with the label padded to `width`.
pub fn print_field(label: &str, width: usize, value: impl Display) {
    output::info(format!("  {label:<width$} : {value}"));
}

/// Asks a yes/no question; non-interactive terminals surface as a dialoguer error.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    let answer = Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?;
    Ok(answer)
}
