//! Name command: resolve a place through its renames.

use std::io::Write;

use anyhow::Result;
use life_core::Life;

pub fn run<W: Write>(writer: &mut W, life: &Life, place: &str, as_of: Option<&str>) -> Result<()> {
    let place = place.to_lowercase();
    let resolved = match as_of {
        Some(date) => life.resolve_name_as_of(&place, date),
        None => life.current_name(&place),
    };
    writeln!(writer, "{resolved}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::commands::fixtures::sample;

    fn output(place: &str, as_of: Option<&str>) -> String {
        let mut output = Vec::new();
        run(&mut output, &sample(), place, as_of).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn current_name_follows_renames() {
        assert_eq!(output("Office", None), "headquarters\n");
        assert_eq!(output("home", None), "home\n");
    }

    #[test]
    fn name_as_of_a_date() {
        assert_eq!(output("office", Some("2020_01_02")), "office\n");
        assert_eq!(output("office", Some("2020_01_03")), "headquarters\n");
    }
}
