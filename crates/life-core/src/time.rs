//! Military time, UTC offset labels and day-key arithmetic.
//!
//! Times of day are minutes since local midnight. Day keys are `yyyy_mm_dd`
//! strings; they are decoded with `chrono` whenever calendar arithmetic is
//! needed (proleptic Gregorian, so leap years and month rollover come for free).

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::LifeError;

/// Minutes in a day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Day-key format used by the LIFE format.
const DAY_KEY_FORMAT: &str = "%Y_%m_%d";

/// Lowest accepted UTC offset in hours.
pub const MIN_OFFSET: i32 = -12;

/// Highest accepted UTC offset in hours.
pub const MAX_OFFSET: i32 = 14;

/// Decodes a military time (`"1243"`) into minutes since midnight.
///
/// The hours are the first two characters and the minutes the last two, so a
/// three-character token shares its middle digit between both halves.
///
/// Valid times run from `0000` to `2359`. `2400` is rejected with
/// [`LifeError::EndOfDay`], so a line like `2300-2400: home` is skipped and
/// reported rather than read as ending at midnight.
pub fn parse_military(text: &str) -> Result<i32, LifeError> {
    let invalid = || LifeError::InvalidTime(text.to_string());
    let chars: Vec<char> = text.trim().chars().collect();
    if chars.len() < 2 {
        return Err(invalid());
    }
    let hours = two_digits(&chars[..2]).ok_or_else(invalid)?;
    let minutes = two_digits(&chars[chars.len() - 2..]).ok_or_else(invalid)?;
    if (hours, minutes) == (24, 0) {
        return Err(LifeError::EndOfDay);
    }
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

fn two_digits(pair: &[char]) -> Option<i32> {
    pair.iter().try_fold(0, |acc, c| {
        let digit = c.to_digit(10)?;
        i32::try_from(digit).ok().map(|d| acc * 10 + d)
    })
}

/// Renders minutes since midnight as a zero-padded military time.
pub fn format_military(minutes: i32) -> String {
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}

/// Decodes a `UTC`, `UTC+N` or `UTC-N` label (case-insensitive) into hours.
pub fn offset_from_label(label: &str) -> Result<i32, LifeError> {
    let invalid = || LifeError::InvalidTimezone(label.to_string());
    let lowered = label.trim().to_lowercase();
    let rest = lowered.strip_prefix("utc").ok_or_else(invalid)?.trim();
    if rest.is_empty() {
        return Ok(0);
    }
    let offset: i32 = rest.parse().map_err(|_| invalid())?;
    if !(MIN_OFFSET..=MAX_OFFSET).contains(&offset) {
        return Err(invalid());
    }
    Ok(offset)
}

/// Renders an offset in hours as a timezone label.
pub fn label_from_offset(offset: i32) -> String {
    match offset {
        0 => "UTC".to_string(),
        n if n > 0 => format!("UTC+{n}"),
        n => format!("UTC{n}"),
    }
}

/// Decodes a `yyyy_mm_dd` day key.
pub fn parse_day_key(key: &str) -> Result<NaiveDate, LifeError> {
    NaiveDate::parse_from_str(key.trim(), DAY_KEY_FORMAT)
        .map_err(|_| LifeError::InvalidDate(key.to_string()))
}

/// Renders a date as a `yyyy_mm_dd` day key.
pub fn format_day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Returns the day key following `key`.
pub fn next_day(key: &str) -> Result<String, LifeError> {
    let date = parse_day_key(key)?;
    date.succ_opt()
        .map(format_day_key)
        .ok_or_else(|| LifeError::InvalidDate(key.to_string()))
}

/// Returns the day key preceding `key`.
pub fn prev_day(key: &str) -> Result<String, LifeError> {
    let date = parse_day_key(key)?;
    date.pred_opt()
        .map(format_day_key)
        .ok_or_else(|| LifeError::InvalidDate(key.to_string()))
}

/// Combines a day key and minutes since midnight into a local date-time.
///
/// `minutes` may fall outside the day; the result rolls into the previous or
/// next calendar day.
pub fn local_datetime(key: &str, minutes: i32) -> Result<NaiveDateTime, LifeError> {
    let date = parse_day_key(key)?;
    Ok(date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(minutes)))
}
