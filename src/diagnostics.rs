//! Colored status lines shared by every subcommand.

use crate::codepoint::Verdict;

use colored::Colorize;

/// Print a warning to stderr and mirror it to the log.
pub fn warn(message: impl AsRef<str>) {
    log::debug!("{}", message.as_ref());
    eprintln!("{} {}", "WARN".yellow().bold(), message.as_ref());
}

/// Format an error message with a colored prefix.
pub fn error_message(message: impl AsRef<str>) -> String {
    format!("{} {}", "ERROR".red().bold(), message.as_ref())
}

/// Check mark or cross for a per-codepoint listing.
pub fn mark(ok: bool) -> String {
    if ok {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

/// Bracketed status badge shown next to the codepoint under survey.
pub fn badge(status: Option<Verdict>) -> String {
    match status {
        Some(Verdict::Yes) => "[Y]".green().bold().to_string(),
        Some(Verdict::No) => "[N]".red().bold().to_string(),
        Some(Verdict::Maybe) => "[M]".yellow().bold().to_string(),
        None => "[ ]".to_string(),
    }
}
