//! Terminal output utilities.
//!
//! Plain CIDR lines for stdout and error lines for stderr.

use colored::Colorize;
use std::fmt::Display;
use std::io::{self, Write};

/// Write each block on its own line.
pub fn write_plain<W: Write, T: Display>(out: &mut W, blocks: &[T]) -> io::Result<()> {
    for block in blocks {
        writeln!(out, "{block}")?;
    }
    Ok(())
}

/// Format an error line, naming the failing input when there is one.
///
/// # Arguments
/// * `input` - The input line that failed (batch mode), if any
/// * `err` - The error to report
/// * `color` - Highlight the "error" tag in red
pub fn format_error(input: Option<&str>, err: &dyn Display, color: bool) -> String {
    let tag = if color {
        "error".red().bold().to_string()
    } else {
        "error".to_string()
    };
    match input {
        Some(input) => format!("{tag} ({input}): {err}"),
        None => format!("{tag}: {err}"),
    }
}
