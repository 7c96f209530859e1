//! Check command: parse the log and list every skipped line.

use std::io::Write;

use anyhow::Result;
use life_core::ParseReport;

/// Writes the parse summary. Returns true when no line was skipped.
pub fn run<W: Write>(writer: &mut W, report: &ParseReport) -> Result<bool> {
    writeln!(writer, "Lines read: {}", report.lines_read)?;
    writeln!(writer, "Spans read: {}", report.spans_read)?;
    for included in &report.included {
        writeln!(writer, "Included: {included}")?;
    }

    if report.is_clean() {
        writeln!(writer, "No problems found.")?;
        return Ok(true);
    }

    writeln!(writer, "Skipped {} lines:", report.issues.len())?;
    for issue in &report.issues {
        writeln!(writer, "- {issue}")?;
    }
    Ok(false)
}
