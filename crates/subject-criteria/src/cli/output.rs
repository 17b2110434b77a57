//! Output formatting utilities

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;
use subject_criteria_diagnostics::CriteriaError;
use subject_criteria_engine::AssertionResult;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text and tables
    #[default]
    Pretty,
    /// One JSON document on stdout
    Json,
}

/// Color output options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: ColorMode) {
    let enabled = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    };
    colored::control::set_override(enabled);
}

/// Format an error for display
///
/// Criteria errors render as diagnostics with their code and help text.
pub fn format_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<CriteriaError>() {
        Some(err) => err.to_diagnostic().to_colored_string(),
        None => format!("{} {:#}", "Error:".red().bold(), error),
    }
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Format a failure message for display
pub fn format_failure(message: &str) -> String {
    format!("{} {}", "Failed:".red().bold(), message)
}

/// Render an assertion result for the terminal
pub fn format_assertion(nhs_number: &str, result: &AssertionResult) -> String {
    let mut lines = Vec::new();
    if result.passed {
        lines.push(format_success(&format!("subject {} matches all criteria", nhs_number)));
    } else if result.failed_criteria.is_empty() {
        lines.push(format_failure(&format!(
            "subject {} does not match the combined criteria",
            nhs_number
        )));
    } else {
        lines.push(format_failure(&format!(
            "subject {} does not match {} criteria",
            nhs_number,
            result.failed_criteria.len()
        )));
        for failure in &result.failed_criteria {
            lines.push(format!(
                "  {} {} = '{}'",
                "x".red(),
                failure.field.to_string().bold(),
                failure.expected
            ));
        }
    }
    for field in &result.unverified {
        lines.push(format!("  {} {} not checked", "-".dimmed(), field.to_string().dimmed()));
    }
    lines.join("\n")
}

/// Serialize a value as pretty JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}

/// Print a serializable value as JSON, or the pretty rendering
pub fn print<T: Serialize>(value: &T, format: OutputFormat, pretty: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(value)?),
        OutputFormat::Pretty => println!("{}", pretty()),
    }
    Ok(())
}
