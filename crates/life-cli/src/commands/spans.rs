//! Spans command: every span spent at a place.

use std::io::Write;

use anyhow::Result;
use life_core::{Life, PlaceQuery, format_utc};

pub fn run<W: Write>(
    writer: &mut W,
    life: &Life,
    place: &str,
    query: &PlaceQuery,
    utc: bool,
) -> Result<()> {
    let spans = life.spans_at(place, query);
    if spans.is_empty() {
        writeln!(writer, "No spans at {place}.")?;
        return Ok(());
    }

    for span in spans {
        if utc {
            writeln!(
                writer,
                "{} {}  {}",
                format_utc(span.start_utc()?),
                format_utc(span.end_utc()?),
                span.place
            )?;
        } else {
            writeln!(writer, "{} {span}", span.day)?;
        }
    }
    Ok(())
}
