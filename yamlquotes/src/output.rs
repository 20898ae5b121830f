//! Shared output formatting for check reports.
//!
//! Provides JSON and plain-text formatters for `CheckReport`.

use std::io::Write;

use crate::report::CheckReport;

/// Format a `CheckReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `CheckReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for diagnostic in &report.diagnostics {
        writeln!(writer, "{}", diagnostic.format_human_readable())?;
    }
    if !report.diagnostics.is_empty() {
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  Files inspected: {}", report.inspected_files)?;
    writeln!(writer, "  Files skipped:   {}", report.skipped_files)?;
    writeln!(writer, "  Issues found:    {}", report.issues_count())?;
    writeln!(writer, "{}", "=".repeat(80))?;

    if report.ok {
        writeln!(
            writer,
            "All {} YAML files use double-quoted strings",
            report.inspected_files
        )?;
    } else {
        writeln!(
            writer,
            "{} string value(s) are not double-quoted",
            report.issues_count()
        )?;
        writeln!(writer, "  To fix: wrap each reported value in double quotes")?;
    }

    Ok(())
}
