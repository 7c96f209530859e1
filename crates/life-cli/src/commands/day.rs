//! Day command: one day in LIFE format, optionally with places rewritten.

use std::io::Write;

use anyhow::Result;
use life_core::{Life, LifeError};

pub fn run<W: Write>(
    writer: &mut W,
    life: &Life,
    date: &str,
    current_names: bool,
    superplaces: bool,
) -> Result<()> {
    let mut day = life
        .day(date)
        .cloned()
        .ok_or_else(|| LifeError::UnknownDay(date.to_string()))?;
    if current_names {
        day = life.with_current_names(&day);
    }
    if superplaces {
        day = life.with_top_superplaces(&day);
    }
    write!(writer, "{day}")?;
    Ok(())
}
