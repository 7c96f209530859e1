//! Places command: visited places with the time spent at each.

use std::io::Write;

use anyhow::Result;
use life_core::Life;

use super::util::format_minutes;

pub fn run<W: Write>(writer: &mut W, life: &Life, sorted: bool) -> Result<()> {
    let places = if sorted {
        life.sorted_places()
    } else {
        life.minutes_at_all_places()
    };

    if places.is_empty() {
        writeln!(writer, "No places recorded.")?;
        return Ok(());
    }

    let width = places.iter().map(|(p, _)| p.len()).max().unwrap_or_default();
    for (place, minutes) in &places {
        writeln!(writer, "{place:<width$}  {}", format_minutes(*minutes))?;
    }

    let somewhere = life.somewhere(true);
    let moving = life.moving();
    writeln!(writer)?;
    writeln!(
        writer,
        "Somewhere: {} ({:.2} days)",
        format_minutes(somewhere.minutes),
        somewhere.days
    )?;
    writeln!(
        writer,
        "Moving: {} ({:.2} days)",
        format_minutes(moving.minutes),
        moving.days
    )?;
    Ok(())
}
