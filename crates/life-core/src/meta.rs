//! `@` meta-commands.
//!
//! A directive body is matched against its markers in a fixed order, first
//! match wins: `>>>`, `>>`, `<`, `:`, the word `include`, `@`. Bodies that
//! match nothing are ignored so that newer logs still load.

use crate::error::LifeError;
use crate::types::Coordinates;

/// A decoded meta-command.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `@old>>>new`: same location, new designation.
    LocationChange { old: String, new: String },
    /// `@old>>new`: the place was renamed.
    Rename { old: String, new: String },
    /// `@child<parent`.
    Subplace { child: String, parent: String },
    /// `@place:category`.
    Category { place: String, category: String },
    /// `@include "path"`.
    Include { path: String },
    /// `@place @ lat, lon`.
    Coordinates {
        place: String,
        coordinates: Coordinates,
    },
    /// Anything else.
    Unknown,
}

impl Directive {
    /// Short name used in log messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LocationChange { .. } => "location_change",
            Self::Rename { .. } => "rename",
            Self::Subplace { .. } => "subplace",
            Self::Category { .. } => "category",
            Self::Include { .. } => "include",
            Self::Coordinates { .. } => "coordinates",
            Self::Unknown => "unknown",
        }
    }
}

/// Decodes a directive body (the text after `@`).
///
/// `body` is the lower-cased body used for matching. `raw_body` is the same
/// text before lower-casing; include paths are taken from it so that file
/// names keep their case.
pub fn parse_directive(body: &str, raw_body: &str) -> Result<Directive, LifeError> {
    if let Some((old, new)) = split_pair(body, ">>>", "location change")? {
        return Ok(Directive::LocationChange { old, new });
    }
    if let Some((old, new)) = split_pair(body, ">>", "rename")? {
        return Ok(Directive::Rename { old, new });
    }
    if let Some((child, parent)) = split_pair(body, "<", "subplace")? {
        return Ok(Directive::Subplace { child, parent });
    }
    if let Some((place, category)) = split_pair(body, ":", "category")? {
        return Ok(Directive::Category { place, category });
    }
    if body.contains("include") {
        let path = raw_body
            .split_whitespace()
            .next_back()
            .unwrap_or_default()
            .trim_matches(|c| c == '"' || c == '\'');
        if path.is_empty() || path.eq_ignore_ascii_case("include") {
            return Err(LifeError::Empty {
                field: "include path",
            });
        }
        return Ok(Directive::Include {
            path: path.to_string(),
        });
    }
    if let Some((place, location)) = body.split_once('@') {
        let place = non_empty(place, "coordinates place")?;
        let coordinates: Coordinates = location.parse()?;
        return Ok(Directive::Coordinates { place, coordinates });
    }
    Ok(Directive::Unknown)
}

/// Splits once on `marker`; both sides must be non-empty after trimming.
fn split_pair(
    body: &str,
    marker: &str,
    field: &'static str,
) -> Result<Option<(String, String)>, LifeError> {
    let Some((left, right)) = body.split_once(marker) else {
        return Ok(None);
    };
    Ok(Some((non_empty(left, field)?, non_empty(right, field)?)))
}

fn non_empty(text: &str, field: &'static str) -> Result<String, LifeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LifeError::Empty { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Directive, LifeError> {
        parse_directive(&body.to_lowercase(), body)
    }

    #[test]
    fn triple_arrow_wins_over_double() {
        assert_eq!(
            parse("old bar >>> new club").unwrap(),
            Directive::LocationChange {
                old: "old bar".into(),
                new: "new club".into()
            }
        );
        assert_eq!(
            parse("cafe>>bistro").unwrap(),
            Directive::Rename {
                old: "cafe".into(),
                new: "bistro".into()
            }
        );
    }

    #[test]
    fn subplace_before_category() {
        assert_eq!(
            parse("gate 12 < lisbon airport").unwrap(),
            Directive::Subplace {
                child: "gate 12".into(),
                parent: "lisbon airport".into()
            }
        );
        // `<` takes precedence even when a `:` is present.
        assert_eq!(
            parse("a:b<c").unwrap(),
            Directive::Subplace {
                child: "a:b".into(),
                parent: "c".into()
            }
        );
    }

    #[test]
    fn category_assignment() {
        assert_eq!(
            parse("ist : university").unwrap(),
            Directive::Category {
                place: "ist".into(),
                category: "university".into()
            }
        );
    }

    #[test]
    fn include_keeps_path_case() {
        assert_eq!(
            parse(r#"include "Trips/2019.life""#).unwrap(),
            Directive::Include {
                path: "Trips/2019.life".into()
            }
        );
        assert_eq!(
            parse("include 'other.life'").unwrap(),
            Directive::Include {
                path: "other.life".into()
            }
        );
        assert!(parse("include").is_err());
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for parsed literals"
    )]
    fn coordinates_assignment() {
        let Directive::Coordinates { place, coordinates } =
            parse("home @ 38.736347, -9.140768").unwrap()
        else {
            panic!("expected coordinates");
        };
        assert_eq!(place, "home");
        assert_eq!(coordinates.latitude, 38.736_347);
        assert_eq!(coordinates.longitude, -9.140_768);
        assert!(parse("home @ nowhere").is_err());
    }

    #[test]
    fn empty_sides_are_format_errors() {
        assert!(parse(">>bistro").is_err());
        assert!(parse("cafe>>").is_err());
        assert!(parse("<parent").is_err());
    }

    #[test]
    fn unmatched_body_is_unknown() {
        assert_eq!(parse("something new").unwrap(), Directive::Unknown);
        assert_eq!(parse("").unwrap(), Directive::Unknown);
    }
}
