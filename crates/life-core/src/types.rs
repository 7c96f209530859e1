//! Core value types with validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifeError;
use crate::time::{label_from_offset, offset_from_label};

/// A day key in `yyyy_mm_dd` form.
///
/// Keys are compared as strings; for well-formed keys lexicographic order is
/// chronological order. Keys are not required to be valid calendar dates:
/// only operations that need calendar arithmetic decode them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(String);

impl DayKey {
    /// Creates a day key after trimming; rejects empty keys.
    pub fn new(key: impl Into<String>) -> Result<Self, LifeError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(LifeError::Empty { field: "day key" });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DayKey {
    type Error = LifeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DayKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A signed whole-hour offset from UTC.
///
/// Serialized as its label (`"UTC"`, `"UTC+3"`, `"UTC-5"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// Plain UTC.
    pub const UTC: Self = Self(0);

    /// Creates an offset from whole hours, rejecting values outside -12..=14.
    pub fn from_hours(hours: i32) -> Result<Self, LifeError> {
        offset_from_label(&label_from_offset(hours)).map(Self)
    }

    /// Returns the offset in hours.
    #[must_use]
    pub const fn hours(self) -> i32 {
        self.0
    }

    /// Returns the offset in minutes.
    #[must_use]
    pub const fn minutes(self) -> i32 {
        self.0 * 60
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&label_from_offset(self.0))
    }
}

impl FromStr for UtcOffset {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        offset_from_label(s).map(Self)
    }
}

impl Serialize for UtcOffset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UtcOffset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl FromStr for Coordinates {
    type Err = LifeError;

    /// Parses `"38.736347, -9.140768"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LifeError::InvalidCoordinates(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid());
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// How span durations are counted by place totals.
///
/// Two generations of the LIFE reader disagreed here: one counted `end - start`,
/// the other `end - start + 1` (both endpoint minutes inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndTimePolicy {
    /// `end - start`.
    #[default]
    Exclusive,
    /// `end - start + 1`.
    Inclusive,
}

impl EndTimePolicy {
    /// Duration of an interval under this policy.
    #[must_use]
    pub fn duration(self, start: i32, end: i32) -> i64 {
        let base = i64::from(end) - i64::from(start);
        match self {
            Self::Exclusive => base,
            Self::Inclusive => base + 1,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exclusive => "exclusive",
            Self::Inclusive => "inclusive",
        }
    }
}

impl fmt::Display for EndTimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to the ambient timezone after a span closed by `@UTC...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneCarry {
    /// The ambient timezone in effect before the directive is restored.
    #[default]
    Revert,
    /// The span's end timezone becomes the ambient timezone.
    Adopt,
}
