//! Read-only queries over a built [`Life`].

use serde::Serialize;

use crate::day::Day;
use crate::description::Place;
use crate::life::{Life, push_unique};
use crate::span::Span;
use crate::time::MINUTES_PER_DAY;
use crate::types::Coordinates;

/// Which spans count as being "at" a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceQuery {
    /// Only the place itself; otherwise its subplaces too.
    pub strict: bool,
    /// With `strict` off, include grandchildren as well as children.
    pub recursive: bool,
    /// Compare names exactly instead of by substring.
    pub exact_match: bool,
}

impl Default for PlaceQuery {
    fn default() -> Self {
        Self {
            strict: true,
            recursive: false,
            exact_match: false,
        }
    }
}

impl PlaceQuery {
    /// Exact match on the place alone.
    pub const fn exact() -> Self {
        Self {
            strict: true,
            recursive: false,
            exact_match: true,
        }
    }

    /// The place plus its subplaces.
    #[must_use]
    pub const fn with_subplaces(self, recursive: bool) -> Self {
        Self {
            strict: false,
            recursive,
            ..self
        }
    }
}

/// A Life-wide time total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeTotal {
    pub minutes: i64,
    /// `minutes` expressed in days of 1440 minutes.
    pub days: f64,
}

impl TimeTotal {
    #[expect(
        clippy::cast_precision_loss,
        reason = "minute totals stay far below 2^52"
    )]
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            minutes,
            days: minutes as f64 / f64::from(MINUTES_PER_DAY),
        }
    }
}

impl Life {
    /// Every place visited, in first-seen order.
    pub fn all_places(&self) -> Vec<String> {
        let mut places = Vec::new();
        for day in &self.days {
            for (place, _) in day.all_places() {
                push_unique(&mut places, &place);
            }
        }
        places
    }

    /// Minutes spent at exactly `place` across all days. Travel spans add
    /// nothing.
    pub fn minutes_at(&self, place: &str) -> i64 {
        self.days
            .iter()
            .flat_map(Day::all_places)
            .filter(|(p, _)| p == place)
            .map(|(_, minutes)| minutes)
            .sum()
    }

    /// Every place with the minutes spent there, in first-seen order.
    pub fn minutes_at_all_places(&self) -> Vec<(String, i64)> {
        let mut totals: Vec<(String, i64)> = Vec::new();
        for (place, minutes) in self.days.iter().flat_map(Day::all_places) {
            match totals.iter_mut().find(|(p, _)| *p == place) {
                Some((_, total)) => *total += minutes,
                None => totals.push((place, minutes)),
            }
        }
        totals
    }

    /// [`Life::minutes_at_all_places`] in ascending order of minutes; ties
    /// keep first-seen order.
    pub fn sorted_places(&self) -> Vec<(String, i64)> {
        let mut totals = self.minutes_at_all_places();
        totals.sort_by_key(|(_, minutes)| *minutes);
        totals
    }

    /// Time spent somewhere, summed over all days.
    pub fn somewhere(&self, exclude_travel: bool) -> TimeTotal {
        TimeTotal::from_minutes(
            self.days
                .iter()
                .map(|d| d.minutes_somewhere(exclude_travel))
                .sum(),
        )
    }

    /// Time spent moving, summed over all days.
    pub fn moving(&self) -> TimeTotal {
        TimeTotal::from_minutes(self.days.iter().map(Day::minutes_moving).sum())
    }

    /// Names searched for `place` under `query`.
    fn search_set(&self, place: &str, query: &PlaceQuery) -> Vec<String> {
        let mut names = vec![place.to_string()];
        if !query.strict {
            for sub in self.subplaces_of(place, query.recursive) {
                push_unique(&mut names, &sub);
            }
        }
        names
    }

    /// Spans at `place` in day order. A span matching several names of the
    /// search set is listed once.
    pub fn spans_at(&self, place: &str, query: &PlaceQuery) -> Vec<&Span> {
        let names = self.search_set(place, query);
        self.days
            .iter()
            .flat_map(|d| &d.spans)
            .filter(|s| names.iter().any(|n| s.is_at(n, query.exact_match)))
            .collect()
    }

    /// Where the log places `minute` on `date`.
    pub fn where_at(&self, date: &str, minute: i32) -> Option<&Place> {
        self.days
            .iter()
            .filter(|d| d.date.as_str() == date)
            .find_map(|d| d.where_at(minute))
    }

    /// Total minutes at `place`, counted with the configured end-time policy.
    pub fn minutes_total_at(&self, place: &str, query: &PlaceQuery) -> i64 {
        let policy = self.options.end_time_policy;
        self.spans_at(place, query)
            .into_iter()
            .map(|s| s.duration(policy))
            .sum()
    }

    /// Days with at least one span tagged `tag`, with those spans.
    pub fn spans_with_tag(&self, tag: &str, exact: bool) -> Vec<(&Day, Vec<&Span>)> {
        self.days
            .iter()
            .map(|d| (d, d.with_tag(tag, exact)))
            .filter(|(_, spans)| !spans.is_empty())
            .collect()
    }

    /// Days with at least one span carrying semantic `label`, with those spans.
    pub fn spans_with_semantics(&self, label: &str, exact: bool) -> Vec<(&Day, Vec<&Span>)> {
        self.days
            .iter()
            .map(|d| (d, d.with_semantics(label, exact)))
            .filter(|(_, spans)| !spans.is_empty())
            .collect()
    }

    /// The first category (alphabetically) listing `place`.
    pub fn category_of(&self, place: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(_, places)| places.iter().any(|p| p == place))
            .map(|(category, _)| category.as_str())
    }

    pub fn category_places(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Coordinates of `place`, matched case-insensitively.
    pub fn coordinates_for(&self, place: &str) -> Option<Coordinates> {
        self.coordinates.get(&place.to_lowercase()).copied()
    }
}
