//! Rendering back to LIFE text.
//!
//! Output re-parses to the same model. A `UTC...` line is written whenever a
//! span starts in a timezone other than the one in effect, and after every
//! two-phase span, so the text reads the same under either
//! [`TimezoneCarry`](crate::TimezoneCarry) policy.

use std::collections::BTreeMap;
use std::fmt;

use crate::day::Day;
use crate::life::Life;
use crate::span::Span;
use crate::time::format_military;
use crate::types::UtcOffset;

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let place = self.place.to_string();
        write!(
            f,
            "{}-{}: {place}",
            format_military(self.start),
            format_military(self.end)
        )?;
        if !self.tags.is_empty() {
            let gap = if place.is_empty() { "" } else { " " };
            write!(f, "{gap}[{}]", self.tags.join("|"))?;
        }
        if !self.semantics.is_empty() {
            write!(f, "{{{}}}", self.semantics.join("|"))?;
        }
        Ok(())
    }
}

impl fmt::Display for Day {
    /// Renders the day on its own, stating the timezone of its first span.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- {}", self.date)?;
        write_body(f, self, &mut None)
    }
}

impl fmt::Display for Life {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (category, places) in &self.categories {
            for place in places {
                writeln!(f, "@{place}:{category}")?;
            }
        }
        for (parent, children) in &self.subplaces {
            for child in children {
                writeln!(f, "@{child}<{parent}")?;
            }
        }
        for (place, coordinates) in &self.coordinates {
            writeln!(f, "@{place} @ {coordinates}")?;
        }

        let mut aliases = self.alias_lines();
        let mut ambient = Some(self.options.default_timezone);
        for day in &self.days {
            while let Some(entry) = aliases.first_entry() {
                if entry.key().as_str() >= day.date.as_str() {
                    break;
                }
                let (date, lines) = entry.remove_entry();
                write_alias_block(f, &date, &lines)?;
            }
            writeln!(f)?;
            writeln!(f, "-- {}", day.date)?;
            for line in aliases.remove(day.date.as_str()).unwrap_or_default() {
                writeln!(f, "{line}")?;
            }
            write_body(f, day, &mut ambient)?;
        }
        for (date, lines) in aliases {
            write_alias_block(f, &date, &lines)?;
        }
        Ok(())
    }
}

impl Life {
    /// The whole log as LIFE text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Alias directives keyed by the date they take effect.
    fn alias_lines(&self) -> BTreeMap<String, Vec<String>> {
        let mut lines: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (old, alias) in &self.nameswaps {
            lines
                .entry(alias.since.to_string())
                .or_default()
                .push(format!("@{old}>>{}", alias.name));
        }
        for (old, alias) in &self.locationswaps {
            lines
                .entry(alias.since.to_string())
                .or_default()
                .push(format!("@{old}>>>{}", alias.name));
        }
        lines
    }
}

/// Aliases dated on a day with no spans of its own.
fn write_alias_block(f: &mut fmt::Formatter<'_>, date: &str, lines: &[String]) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "-- {date}")?;
    for line in lines {
        writeln!(f, "{line}")?;
    }
    Ok(())
}

fn write_body(
    f: &mut fmt::Formatter<'_>,
    day: &Day,
    ambient: &mut Option<UtcOffset>,
) -> fmt::Result {
    for note in day.notes.lines() {
        writeln!(f, "> {note}")?;
    }
    for span in &day.spans {
        if *ambient != Some(span.start_timezone) {
            writeln!(f, "{}", span.start_timezone)?;
            *ambient = Some(span.start_timezone);
        }
        if span.end_timezone != span.start_timezone {
            writeln!(f, "@{}", span.end_timezone)?;
            *ambient = None;
        }
        writeln!(f, "{span}")?;
    }
    Ok(())
}
