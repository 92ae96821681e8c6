//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically; `output.color = false`
//! in the settings turns colors off as well.

use colored::Colorize;

/// Disable colors regardless of terminal detection.
pub fn disable_colors() {
    colored::control::set_override(false);
}

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print a yes/no answer (green true, red false)
pub fn verdict(answer: bool) {
    if answer {
        println!("{}", "true".green());
    } else {
        println!("{}", "false".red());
    }
}

/// Print an absent result (dimmed "none")
pub fn none() {
    println!("{}", "none".dimmed());
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
