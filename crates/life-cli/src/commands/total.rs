//! Total command: time spent at a place.

use std::io::Write;

use anyhow::Result;
use life_core::{Life, PlaceQuery};

use super::util::format_minutes;

pub fn run<W: Write>(writer: &mut W, life: &Life, place: &str, query: &PlaceQuery) -> Result<()> {
    let minutes = life.minutes_total_at(place, query);
    writeln!(
        writer,
        "{place}: {} ({minutes} minutes, {})",
        format_minutes(minutes),
        life.options().end_time_policy
    )?;
    Ok(())
}
