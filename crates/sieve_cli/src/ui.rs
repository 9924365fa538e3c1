//! UI helpers for consistent output formatting.
//!
//! Everything here writes to stderr; stdout is reserved for the payload
//! printed by `--dry-run`.

use sieve_core::Conclusion;

/// Single-character Unicode glyphs used as status indicators.
pub mod indicators {
    /// Error indicator (✖).
    pub const ERROR: &str = "✖";
    /// Warning indicator (⚠).
    pub const WARNING: &str = "⚠";
    /// Informational indicator (ℹ).
    pub const INFO: &str = "ℹ";
    /// Success indicator (✓).
    pub const SUCCESS: &str = "✓";
}

/// Semantic colour palette for terminal output.
pub mod colors {
    use console::Style;

    /// Red - errors and failing conclusions.
    pub const fn error() -> Style {
        Style::new().red()
    }

    /// Yellow - warnings and skipped reports.
    pub const fn warning() -> Style {
        Style::new().yellow()
    }

    /// Cyan - informational messages.
    pub const fn info() -> Style {
        Style::new().cyan()
    }

    /// Green - success messages.
    pub const fn success() -> Style {
        Style::new().green()
    }

    /// Light grey - secondary descriptive text.
    pub const fn secondary() -> Style {
        Style::new().color256(252)
    }

    /// Cyan - the tool name in help output.
    pub const fn accent() -> Style {
        Style::new().cyan()
    }
}

/// Process exit codes.
pub mod exit {
    /// An unrecoverable error occurred; no check run was published.
    pub const ERROR: i32 = 1;
}

const GITHUB_ACTIONS_ENV: &str = "GITHUB_ACTIONS";

/// Prints a red error message to stderr.
pub fn print_error(message: &str) {
    eprintln!(
        "{} {}",
        colors::error().apply_to(indicators::ERROR),
        colors::secondary().apply_to(message)
    );
    workflow_command("error", message);
}

/// Prints a yellow warning message to stderr.
pub fn print_warning(message: &str) {
    eprintln!(
        "{} {}",
        colors::warning().apply_to(indicators::WARNING),
        colors::secondary().apply_to(message)
    );
    workflow_command("warning", message);
}

/// Prints a cyan informational message to stderr.
pub fn print_info(message: &str) {
    eprintln!(
        "{} {}",
        colors::info().apply_to(indicators::INFO),
        colors::secondary().apply_to(message)
    );
}

/// Prints the final verdict, coloured by conclusion.
pub fn print_conclusion(summary: &str, conclusion: Conclusion) {
    let (indicator, style) = match conclusion {
        Conclusion::Success => (indicators::SUCCESS, colors::success()),
        Conclusion::Failure => (indicators::ERROR, colors::error()),
    };

    eprintln!(
        "{} {} {}",
        style.apply_to(indicator),
        style.apply_to(conclusion).bold(),
        colors::secondary().apply_to(summary)
    );
}

/// Returns `singular` when `count` is 1, otherwise `plural`.
#[must_use]
pub const fn pluralise_word<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Echoes a message as a workflow command so it shows on the Actions run page.
fn workflow_command(kind: &str, message: &str) {
    if std::env::var(GITHUB_ACTIONS_ENV).is_ok_and(|v| v == "true") {
        eprintln!("::{kind}::{}", escape_workflow_data(message));
    }
}

/// Escapes the characters that would otherwise end a workflow command.
fn escape_workflow_data(message: &str) -> String {
    message.chars().fold(String::with_capacity(message.len()), |mut out, c| {
        match c {
            '%' => out.push_str("%25"),
            '\r' => out.push_str("%0D"),
            '\n' => out.push_str("%0A"),
            other => out.push(other),
        }
        out
    })
}

/// Clap styling that matches the rest of the terminal output.
pub fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{AnsiColor, Effects, Style};

    clap::builder::Styles::styled()
        .header(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .usage(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .literal(Style::new().fg_color(Some(AnsiColor::Cyan.into())))
        .placeholder(Style::new().fg_color(Some(AnsiColor::BrightBlack.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralises_by_count() {
        assert_eq!(pluralise_word(1, "report", "reports"), "report");
        assert_eq!(pluralise_word(0, "report", "reports"), "reports");
        assert_eq!(pluralise_word(2, "report", "reports"), "reports");
    }

    #[test]
    fn escapes_workflow_command_data() {
        assert_eq!(escape_workflow_data("100% done\nnext"), "100%25 done%0Anext");
        assert_eq!(escape_workflow_data("plain"), "plain");
    }
}
