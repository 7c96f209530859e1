//! Export command: the whole log as JSON.

use std::io::Write;

use anyhow::{Context, Result};
use life_core::Life;

pub fn run<W: Write>(writer: &mut W, life: &Life, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *writer, life).context("failed to serialize life")?;
    } else {
        serde_json::to_writer_pretty(&mut *writer, life).context("failed to serialize life")?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{Value, json};

    use crate::commands::fixtures::sample;

    fn export(compact: bool) -> String {
        let mut output = Vec::new();
        run(&mut output, &sample(), compact).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn export_carries_days_and_maps() {
        let value: Value = serde_json::from_str(&export(false)).unwrap();

        assert_eq!(value["default_timezone"], "UTC");
        assert_eq!(value["end_time_policy"], "exclusive");
        assert_eq!(value["categories"]["university"], json!(["ist"]));
        assert_eq!(value["subplaces"]["lisbon"], json!(["alvalade", "ist"]));
        assert_eq!(value["superplaces"]["home"], json!(["alvalade"]));
        assert_eq!(
            value["nameswaps"]["office"],
            json!({"name": "headquarters", "since": "2020_01_03"})
        );

        let days = value["days"].as_array().unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0]["notes"], "new year\n");
        assert_eq!(
            days[1]["spans"][1],
            json!({
                "day": "2020_01_02",
                "start": "0700",
                "end": "0730",
                "place": ["home", "ist"],
                "tags": ["walk"],
                "semantics": [],
                "start_timezone": "UTC+1",
                "end_timezone": "UTC+1"
            })
        );
    }

    #[test]
    fn compact_export_is_one_line() {
        let output = export(true);
        assert_eq!(output.lines().count(), 1);
        let pretty: Value = serde_json::from_str(&export(false)).unwrap();
        let compact: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(pretty, compact);
    }
}
