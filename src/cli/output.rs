//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Committed operation (green checkmark)
pub fn applied(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Rejected operation with its reason; the chart is unchanged.
pub fn rejected(op: &(impl Display + ?Sized), reason: &(impl Display + ?Sized)) {
    println!("{} {}", "✗".red(), op);
    eprintln!("  {}: {}", "rejected".yellow(), reason);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Remaining undo/redo steps, dimmed
pub fn history_depths(undo: usize, redo: usize) {
    println!("{}", format!("undo: {}, redo: {}", undo, redo).dimmed());
}

/// Print plain output (no color)
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
