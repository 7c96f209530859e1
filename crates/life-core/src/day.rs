//! Days: one calendar date with its notes and spans.

use serde::Serialize;

use crate::description::Place;
use crate::span::Span;
use crate::time::MINUTES_PER_DAY;
use crate::types::{DayKey, EndTimePolicy};

/// The record of one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    pub date: DayKey,
    /// Note lines, each terminated by a newline.
    pub notes: String,
    /// Spans in file order (not necessarily sorted by time).
    pub spans: Vec<Span>,
}

impl Day {
    pub const fn new(date: DayKey) -> Self {
        Self {
            date,
            notes: String::new(),
            spans: Vec::new(),
        }
    }

    pub fn add_span(&mut self, span: Span) {
        self.spans.push(span);
    }

    pub fn add_note(&mut self, note: &str) {
        self.notes.push_str(note);
        self.notes.push('\n');
    }

    /// Places visited this day with the minutes spent at each, in first-seen
    /// order.
    ///
    /// Travel endpoints are listed with 0 minutes unless the place also has a
    /// stationary span. Spans with an empty place name are unknown places and
    /// are left out.
    pub fn all_places(&self) -> Vec<(String, i64)> {
        let mut places: Vec<(String, i64)> = Vec::new();
        let mut add = |name: &str, minutes: i64| {
            if name.is_empty() {
                return;
            }
            match places.iter_mut().find(|(p, _)| p == name) {
                Some((_, total)) => *total += minutes,
                None => places.push((name.to_string(), minutes)),
            }
        };
        for span in &self.spans {
            match &span.place {
                Place::Single(name) => add(name, span.length()),
                Place::Travel(origin, destination) => {
                    add(origin, 0);
                    add(destination, 0);
                }
            }
        }
        places
    }

    /// Minutes spent somewhere: the sum of span lengths, minus travel spans
    /// when `exclude_travel` is set.
    pub fn minutes_somewhere(&self, exclude_travel: bool) -> i64 {
        self.spans
            .iter()
            .filter(|s| !(exclude_travel && s.is_travel()))
            .map(Span::length)
            .sum()
    }

    /// Minutes not accounted for by stationary spans.
    ///
    /// Negative when spans overlap; the value is not clamped.
    pub fn minutes_moving(&self) -> i64 {
        i64::from(MINUTES_PER_DAY) - self.minutes_somewhere(true)
    }

    /// Spans at `place` (exact or substring match).
    pub fn spans_at(&self, place: &str, exact: bool) -> Vec<&Span> {
        self.spans.iter().filter(|s| s.is_at(place, exact)).collect()
    }

    /// The place of the first span whose `[start, end]` holds `minute`.
    pub fn where_at(&self, minute: i32) -> Option<&Place> {
        self.spans
            .iter()
            .find(|s| s.contains_minute(minute))
            .map(|s| &s.place)
    }

    /// Total minutes of spans at `place`.
    pub fn total_at(&self, place: &str, exact: bool, policy: EndTimePolicy) -> i64 {
        self.spans_at(place, exact)
            .into_iter()
            .map(|s| s.duration(policy))
            .sum()
    }

    pub fn with_tag(&self, tag: &str, exact: bool) -> Vec<&Span> {
        self.spans.iter().filter(|s| s.has_tag(tag, exact)).collect()
    }

    pub fn with_semantics(&self, label: &str, exact: bool) -> Vec<&Span> {
        self.spans
            .iter()
            .filter(|s| s.has_semantics(label, exact))
            .collect()
    }

    /// Returns a new day with every place name passed through `rename`.
    #[must_use]
    pub fn rename_places<F>(&self, mut rename: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self {
            date: self.date.clone(),
            notes: self.notes.clone(),
            spans: self
                .spans
                .iter()
                .map(|s| s.with_place_names(&mut rename))
                .collect(),
        }
    }
}
