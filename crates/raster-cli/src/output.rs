//! Shared output helpers for CLI commands.

use colored::Colorize;
use serde::Serialize;

use crate::OutputFormat;

/// Print a serializable result in the selected format.
///
/// JSON output ignores `quiet` so scripted callers always get their
/// payload on stdout.
pub fn print<T: Serialize>(value: &T, format: OutputFormat, _quiet: bool) {
    if let OutputFormat::Json = format {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}: failed to serialize output: {}", "Error".red().bold(), e),
        }
    }
}

/// Print an informational line in text mode.
pub fn info(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Print a success line in text mode.
pub fn success(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {}", "✓".green().bold(), message);
    }
}
