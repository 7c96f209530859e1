//! Tagged command: spans carrying a tag or semantic label, grouped by day.

use std::io::Write;

use anyhow::Result;
use life_core::Life;

pub fn run<W: Write>(
    writer: &mut W,
    life: &Life,
    label: &str,
    semantics: bool,
    exact: bool,
) -> Result<()> {
    let days = if semantics {
        life.spans_with_semantics(label, exact)
    } else {
        life.spans_with_tag(label, exact)
    };

    if days.is_empty() {
        writeln!(writer, "No spans labelled {label}.")?;
        return Ok(());
    }

    for (day, spans) in days {
        writeln!(writer, "-- {}", day.date)?;
        for span in spans {
            writeln!(writer, "{span}")?;
        }
    }
    Ok(())
}
