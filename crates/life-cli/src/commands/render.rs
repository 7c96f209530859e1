//! Render command: the whole log in LIFE format.

use std::io::Write;

use anyhow::Result;
use life_core::Life;

pub fn run<W: Write>(writer: &mut W, life: &Life) -> Result<()> {
    write!(writer, "{life}")?;
    Ok(())
}
