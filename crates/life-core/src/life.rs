//! The `Life` aggregate: every day of a log plus its place metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::types::{Coordinates, DayKey, EndTimePolicy, TimezoneCarry, UtcOffset};

/// Settings that shape how a log is read and totalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifeOptions {
    /// Timezone assumed before the first `UTC...` line of each source.
    #[serde(default)]
    pub default_timezone: UtcOffset,
    /// How [`Life::minutes_total_at`](crate::Life::minutes_total_at) counts
    /// span durations.
    #[serde(default)]
    pub end_time_policy: EndTimePolicy,
    /// What follows a span closed by `@UTC...`.
    #[serde(default)]
    pub timezone_carry: TimezoneCarry,
}

/// A date-scoped alias: from `since` onwards the place is known as `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    pub name: String,
    pub since: DayKey,
}

/// One person's log.
///
/// Days are kept sorted by date (duplicates allowed, in insertion order).
/// `subplaces` and `superplaces` mirror each other: a place may have any
/// number of children and any number of parents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Life {
    pub(crate) days: Vec<Day>,
    pub(crate) categories: BTreeMap<String, Vec<String>>,
    pub(crate) subplaces: BTreeMap<String, Vec<String>>,
    pub(crate) superplaces: BTreeMap<String, Vec<String>>,
    pub(crate) nameswaps: BTreeMap<String, Alias>,
    pub(crate) locationswaps: BTreeMap<String, Alias>,
    pub(crate) coordinates: BTreeMap<String, Coordinates>,
    #[serde(flatten)]
    pub(crate) options: LifeOptions,
}

impl Life {
    pub fn new(options: LifeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// A copy of the place metadata and options, with no days.
    pub(crate) fn without_days(&self) -> Self {
        Self {
            days: Vec::new(),
            categories: self.categories.clone(),
            subplaces: self.subplaces.clone(),
            superplaces: self.superplaces.clone(),
            nameswaps: self.nameswaps.clone(),
            locationswaps: self.locationswaps.clone(),
            coordinates: self.coordinates.clone(),
            options: self.options,
        }
    }

    pub const fn options(&self) -> &LifeOptions {
        &self.options
    }

    pub const fn default_timezone(&self) -> UtcOffset {
        self.options.default_timezone
    }

    /// All days, ascending by date.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// The first day recorded for `date`, if any.
    pub fn day(&self, date: &str) -> Option<&Day> {
        let start = self.days.partition_point(|d| d.date.as_str() < date);
        self.days.get(start).filter(|d| d.date.as_str() == date)
    }

    /// The most recent day in the log.
    pub fn last_day(&self) -> Option<&Day> {
        self.days.last()
    }

    /// Inserts a day after any days with the same or an earlier date.
    pub fn add_day(&mut self, day: Day) {
        let idx = self.days.partition_point(|d| d.date <= day.date);
        self.days.insert(idx, day);
    }

    /// Removes and returns the first day recorded for `date`.
    pub fn remove_day(&mut self, date: &str) -> Option<Day> {
        let idx = self.days.iter().position(|d| d.date.as_str() == date)?;
        Some(self.days.remove(idx))
    }

    pub const fn categories(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    pub const fn nameswaps(&self) -> &BTreeMap<String, Alias> {
        &self.nameswaps
    }

    pub const fn locationswaps(&self) -> &BTreeMap<String, Alias> {
        &self.locationswaps
    }

    pub const fn coordinates(&self) -> &BTreeMap<String, Coordinates> {
        &self.coordinates
    }

    /// Adds `place` to `category`; a place is listed once per category.
    pub fn add_category(&mut self, place: &str, category: &str) {
        push_unique(self.categories.entry(category.to_string()).or_default(), place);
    }

    /// Records that `old` is known as `new` from `since` onwards.
    pub fn record_rename(&mut self, old: &str, new: &str, since: DayKey) {
        self.nameswaps.insert(
            old.to_string(),
            Alias {
                name: new.to_string(),
                since,
            },
        );
    }

    /// Records that the location of `old` hosts `new` from `since` onwards.
    pub fn record_location_change(&mut self, old: &str, new: &str, since: DayKey) {
        self.locationswaps.insert(
            old.to_string(),
            Alias {
                name: new.to_string(),
                since,
            },
        );
    }

    /// Sets the coordinates of a place (names are case-insensitive).
    pub fn set_coordinates(&mut self, place: &str, coordinates: Coordinates) {
        self.coordinates.insert(place.to_lowercase(), coordinates);
    }
}

pub(crate) fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
