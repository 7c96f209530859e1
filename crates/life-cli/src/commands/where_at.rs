//! Where command: the place recorded for a day and time.

use std::io::Write;

use anyhow::{Context, Result};
use life_core::Life;
use life_core::time::parse_military;

pub fn run<W: Write>(writer: &mut W, life: &Life, date: &str, time: &str) -> Result<()> {
    let minute = parse_military(time).with_context(|| format!("invalid time {time:?}"))?;

    if life.day(date).is_none() {
        writeln!(writer, "No day recorded for {date}.")?;
        return Ok(());
    }
    match life.where_at(date, minute) {
        Some(place) => writeln!(writer, "{place}")?,
        None => writeln!(writer, "No span covers {date} {time}.")?,
    }
    Ok(())
}
