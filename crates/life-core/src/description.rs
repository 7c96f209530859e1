//! Span description grammar: `place [tag|tag]{semantic|semantic}`.
//!
//! The scanner is deliberately lenient. Closing brackets that do not match the
//! open block are kept as literal text, and an unclosed block simply runs to
//! the end of the description. Real logs are typed by hand, so a description
//! never fails to parse; the worst case is an empty place name.

use std::fmt;

use serde::Serialize;

/// Marker separating the endpoints of an indoors travel.
pub const TRAVEL_MARKER: &str = "->";

/// Where a span took place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Place {
    /// A single named place.
    Single(String),
    /// Travel between two places with no tracked stop in between
    /// (e.g. `lisbon airport -> london heathrow`).
    Travel(String, String),
}

impl Place {
    /// Builds a place from description text, splitting on the first `->`.
    pub fn from_text(text: &str) -> Self {
        match text.split_once(TRAVEL_MARKER) {
            Some((origin, destination)) => {
                Self::Travel(origin.trim().to_string(), destination.trim().to_string())
            }
            None => Self::Single(text.trim().to_string()),
        }
    }

    pub const fn is_travel(&self) -> bool {
        matches!(self, Self::Travel(..))
    }

    /// Every place name referenced, origin before destination.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::Travel(origin, destination) => vec![origin.as_str(), destination.as_str()],
        }
    }

    /// True when any referenced name equals `query`, or contains it when
    /// `exact` is false.
    pub fn matches(&self, query: &str, exact: bool) -> bool {
        self.names()
            .into_iter()
            .any(|name| name == query || (!exact && name.contains(query)))
    }

    /// Returns a copy with every name passed through `rename`.
    #[must_use]
    pub fn map_names<F>(&self, mut rename: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        match self {
            Self::Single(name) => Self::Single(rename(name)),
            Self::Travel(origin, destination) => Self::Travel(rename(origin), rename(destination)),
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(name) => f.write_str(name),
            Self::Travel(origin, destination) => {
                write!(f, "{origin} {TRAVEL_MARKER} {destination}")
            }
        }
    }
}

/// The parts of a span description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub place: Place,
    pub tags: Vec<String>,
    pub semantics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Plain,
    InTags,
    InSemantics,
}

/// Splits a description into place, tags and semantics.
///
/// - `[` or `{` outside a block commits the text so far as the place name
///   (the first commit wins) and opens a tag or semantics block.
/// - `]` closes a tag block and `}` a semantics block; any other character,
///   including a mismatched closer, is text.
/// - Text left over at the end becomes the place name.
pub fn parse_description(text: &str) -> Description {
    let mut state = ScanState::Plain;
    let mut buffer = String::new();
    let mut place: Option<String> = None;
    let mut tags = String::new();
    let mut semantics = String::new();

    for c in text.chars() {
        match (state, c) {
            (ScanState::Plain, '[' | '{') => {
                let pending = std::mem::take(&mut buffer);
                if place.is_none() && !pending.trim().is_empty() {
                    place = Some(pending);
                }
                state = if c == '[' {
                    ScanState::InTags
                } else {
                    ScanState::InSemantics
                };
            }
            (ScanState::InTags, ']') => {
                tags = std::mem::take(&mut buffer);
                state = ScanState::Plain;
            }
            (ScanState::InSemantics, '}') => {
                semantics = std::mem::take(&mut buffer);
                state = ScanState::Plain;
            }
            _ => buffer.push(c),
        }
    }

    if !buffer.trim().is_empty() {
        place = Some(buffer);
    }

    Description {
        place: Place::from_text(place.as_deref().unwrap_or_default()),
        tags: split_labels(&tags),
        semantics: split_labels(&semantics),
    }
}

fn split_labels(source: &str) -> Vec<String> {
    if source.trim().is_empty() {
        return Vec::new();
    }
    source.split('|').map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(name: &str) -> Place {
        Place::Single(name.to_string())
    }

    #[test]
    fn bare_place_has_no_labels() {
        let d = parse_description("  home ");
        assert_eq!(d.place, single("home"));
        assert!(d.tags.is_empty());
        assert!(d.semantics.is_empty());
    }

    #[test]
    fn tags_and_semantics_in_any_order() {
        let d = parse_description("office [work|commute]{focused}");
        assert_eq!(d.place, single("office"));
        assert_eq!(d.tags, vec!["work", "commute"]);
        assert_eq!(d.semantics, vec!["focused"]);

        let d = parse_description("office {focused | tired} [ work ]");
        assert_eq!(d.place, single("office"));
        assert_eq!(d.tags, vec!["work"]);
        assert_eq!(d.semantics, vec!["focused", "tired"]);
    }

    #[test]
    fn travel_splits_on_first_marker() {
        let d = parse_description("lisbon airport -> london heathrow [flight]");
        assert_eq!(
            d.place,
            Place::Travel("lisbon airport".into(), "london heathrow".into())
        );
        assert!(d.place.is_travel());
        assert_eq!(d.tags, vec!["flight"]);

        let d = parse_description("a -> b -> c");
        assert_eq!(d.place, Place::Travel("a".into(), "b -> c".into()));
    }

    #[test]
    fn empty_blocks_give_empty_lists() {
        let d = parse_description("gym []{}");
        assert_eq!(d.place, single("gym"));
        assert!(d.tags.is_empty());
        assert!(d.semantics.is_empty());
    }

    #[test]
    fn duplicate_labels_are_kept_in_order() {
        let d = parse_description("park [run|walk|run]");
        assert_eq!(d.tags, vec!["run", "walk", "run"]);
    }

    #[test]
    fn mismatched_closer_is_literal_text() {
        let d = parse_description("bar [drinks}|music]");
        assert_eq!(d.place, single("bar"));
        assert_eq!(d.tags, vec!["drinks}", "music"]);

        let d = parse_description("bar {loud]}");
        assert_eq!(d.semantics, vec!["loud]"]);
    }

    #[test]
    fn opener_inside_block_is_literal_text() {
        let d = parse_description("shop [a[b]");
        assert_eq!(d.place, single("shop"));
        assert_eq!(d.tags, vec!["a[b"]);
    }

    #[test]
    fn first_committed_place_wins() {
        let d = parse_description("office [work] {focused}");
        assert_eq!(d.place, single("office"));
    }

    #[test]
    fn trailing_text_becomes_place() {
        let d = parse_description("[work] office");
        assert_eq!(d.place, single("office"));
        assert_eq!(d.tags, vec!["work"]);

        let d = parse_description("office [work] annex");
        assert_eq!(d.place, single("annex"));
    }

    #[test]
    fn unclosed_block_runs_to_end() {
        let d = parse_description("office [work");
        assert_eq!(d.place, single("work"));
        assert!(d.tags.is_empty());
    }

    #[test]
    fn labels_only_gives_empty_place() {
        let d = parse_description("[work]");
        assert_eq!(d.place, single(""));
        assert_eq!(d.tags, vec!["work"]);
        assert_eq!(parse_description("").place, single(""));
    }

    #[test]
    fn place_matching_checks_both_travel_endpoints() {
        let travel = Place::Travel("lisbon airport".into(), "london heathrow".into());
        assert!(travel.matches("london heathrow", true));
        assert!(!travel.matches("heathrow", true));
        assert!(travel.matches("heathrow", false));
        assert!(travel.matches("lisbon", false));
        assert!(!single("home").matches("office", false));
    }

    #[test]
    fn place_renders_with_marker() {
        let travel = Place::Travel("a".into(), "b".into());
        assert_eq!(travel.to_string(), "a -> b");
        assert_eq!(travel.map_names(str::to_uppercase).to_string(), "A -> B");
    }
}
