//! Spans: time intervals within a day spent at one place.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::description::{Description, Place};
use crate::error::LifeError;
use crate::time::{format_military, local_datetime};
use crate::types::{DayKey, EndTimePolicy, UtcOffset};

/// A contiguous interval within one day.
///
/// `start` and `end` are minutes since local midnight. `end` is not required
/// to be after `start`; a non-positive [`Span::length`] is a data-quality
/// issue in the log, not a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    /// The day this span belongs to.
    pub day: DayKey,
    #[serde(serialize_with = "military")]
    pub start: i32,
    #[serde(serialize_with = "military")]
    pub end: i32,
    pub place: Place,
    pub tags: Vec<String>,
    pub semantics: Vec<String>,
    pub start_timezone: UtcOffset,
    /// Differs from `start_timezone` only for spans closed by `@UTC...`.
    pub end_timezone: UtcOffset,
}

fn military<S: Serializer>(minutes: &i32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_military(*minutes))
}

impl Span {
    /// Creates a span from a parsed description.
    pub fn new(
        day: DayKey,
        start: i32,
        end: i32,
        description: Description,
        start_timezone: UtcOffset,
        end_timezone: UtcOffset,
    ) -> Self {
        let Description {
            place,
            tags,
            semantics,
        } = description;
        Self {
            day,
            start,
            end,
            place,
            tags,
            semantics,
            start_timezone,
            end_timezone,
        }
    }

    /// Duration in minutes (`end - start`).
    pub fn length(&self) -> i64 {
        EndTimePolicy::Exclusive.duration(self.start, self.end)
    }

    /// Duration in minutes under the given end-time policy.
    pub fn duration(&self, policy: EndTimePolicy) -> i64 {
        policy.duration(self.start, self.end)
    }

    /// True for indoors travel between two places.
    pub const fn is_travel(&self) -> bool {
        self.place.is_travel()
    }

    /// True when `minute` lies in `[start, end]`.
    pub const fn contains_minute(&self, minute: i32) -> bool {
        self.start <= minute && minute <= self.end
    }

    /// Exact membership, or substring match against any tag.
    pub fn has_tag(&self, tag: &str, exact: bool) -> bool {
        has_label(&self.tags, tag, exact)
    }

    /// Exact membership, or substring match against any semantic label.
    pub fn has_semantics(&self, label: &str, exact: bool) -> bool {
        has_label(&self.semantics, label, exact)
    }

    /// True when this span was at `place` (either endpoint for travel).
    pub fn is_at(&self, place: &str, exact: bool) -> bool {
        self.place.matches(place, exact)
    }

    /// Returns a copy with every place name passed through `rename`.
    #[must_use]
    pub fn with_place_names<F>(&self, rename: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self {
            place: self.place.map_names(rename),
            ..self.clone()
        }
    }

    /// Start as a local (timezone-less) date-time.
    pub fn start_local(&self) -> Result<NaiveDateTime, LifeError> {
        local_datetime(self.day.as_str(), self.start)
    }

    /// End as a local (timezone-less) date-time.
    pub fn end_local(&self) -> Result<NaiveDateTime, LifeError> {
        local_datetime(self.day.as_str(), self.end)
    }

    /// Start as a UTC instant; may fall on the previous or next day.
    pub fn start_utc(&self) -> Result<DateTime<Utc>, LifeError> {
        to_utc(&self.day, self.start, self.start_timezone)
    }

    /// End as a UTC instant; may fall on the previous or next day.
    pub fn end_utc(&self) -> Result<DateTime<Utc>, LifeError> {
        to_utc(&self.day, self.end, self.end_timezone)
    }
}

fn has_label(labels: &[String], query: &str, exact: bool) -> bool {
    if exact {
        labels.iter().any(|l| l == query)
    } else {
        labels.iter().any(|l| l.contains(query))
    }
}

fn to_utc(day: &DayKey, minutes: i32, offset: UtcOffset) -> Result<DateTime<Utc>, LifeError> {
    local_datetime(day.as_str(), minutes - offset.minutes()).map(|dt| dt.and_utc())
}

/// Formats an instant as `2015-02-12T23:32:00Z`.
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::description::parse_description;

    fn span(day: &str, start: i32, end: i32, text: &str, tz: (i32, i32)) -> Span {
        Span::new(
            DayKey::new(day).unwrap(),
            start,
            end,
            parse_description(text),
            UtcOffset::from_hours(tz.0).unwrap(),
            UtcOffset::from_hours(tz.1).unwrap(),
        )
    }

    #[test]
    fn length_may_be_negative() {
        let s = span("2020_01_01", 600, 480, "home", (0, 0));
        assert_eq!(s.length(), -120);
        assert_eq!(s.duration(EndTimePolicy::Inclusive), -119);
    }

    #[test]
    fn contains_minute_is_inclusive() {
        let s = span("2020_01_01", 480, 540, "home", (0, 0));
        assert!(s.contains_minute(480));
        assert!(s.contains_minute(540));
        assert!(!s.contains_minute(541));
    }

    #[test]
    fn label_predicates_exact_and_substring() {
        let s = span("2020_01_01", 0, 60, "gym [weights|cardio]{tired}", (0, 0));
        assert!(s.has_tag("cardio", true));
        assert!(!s.has_tag("card", true));
        assert!(s.has_tag("card", false));
        assert!(s.has_semantics("tired", true));
        assert!(s.has_semantics("ire", false));
        assert!(!s.has_semantics("happy", false));
    }

    #[test]
    fn utc_rolls_back_a_day_for_positive_offsets() {
        let s = span("2020_03_01", 60, 180, "tokyo", (9, 9));
        assert_eq!(format_utc(s.start_utc().unwrap()), "2020-02-29T16:00:00Z");
        assert_eq!(format_utc(s.end_utc().unwrap()), "2020-02-29T18:00:00Z");
    }

    #[test]
    fn utc_rolls_forward_a_day_for_negative_offsets() {
        let s = span("2020_12_31", 1320, 1439, "new york", (-5, -5));
        assert_eq!(format_utc(s.start_utc().unwrap()), "2021-01-01T03:00:00Z");
        assert_eq!(format_utc(s.end_utc().unwrap()), "2021-01-01T04:59:00Z");
    }

    #[test]
    fn utc_uses_end_timezone_for_end() {
        let s = span("2020_06_01", 600, 900, "lis -> jfk [flight]", (1, -4));
        assert_eq!(format_utc(s.start_utc().unwrap()), "2020-06-01T09:00:00Z");
        assert_eq!(format_utc(s.end_utc().unwrap()), "2020-06-01T19:00:00Z");
    }

    #[test]
    fn local_times_ignore_offset() {
        let s = span("2020_06_01", 600, 900, "home", (3, 3));
        assert_eq!(s.start_local().unwrap().to_string(), "2020-06-01 10:00:00");
        assert_eq!(s.end_local().unwrap().to_string(), "2020-06-01 15:00:00");
    }

    #[test]
    fn utc_fails_for_malformed_day_key() {
        let s = span("someday", 0, 60, "home", (0, 0));
        assert!(s.start_utc().is_err());
    }

    #[test]
    fn renaming_keeps_everything_else() {
        let s = span("2020_01_01", 0, 60, "cafe -> office [walk]", (0, 0));
        let renamed = s.with_place_names(|p| format!("{p}!"));
        assert_eq!(renamed.place, Place::Travel("cafe!".into(), "office!".into()));
        assert_eq!(renamed.tags, s.tags);
        assert_eq!(renamed.start, s.start);
    }

    #[test]
    fn serializes_times_as_military_and_zones_as_labels() {
        let s = span("2020_01_01", 480, 1050, "office [work]", (1, 1));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["start"], "0800");
        assert_eq!(json["end"], "1730");
        assert_eq!(json["place"], "office");
        assert_eq!(json["start_timezone"], "UTC+1");
    }
}
