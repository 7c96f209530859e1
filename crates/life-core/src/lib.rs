//! Core logic for LIFE location logs.
//!
//! This crate contains:
//! - Parsing: line classification, the span description grammar and `@`
//!   meta-commands, with per-line error recovery
//! - The place graph: subplaces, superplaces and date-scoped aliases
//! - Queries: dwell totals, place/time lookups and tag filters
//! - Rendering back to LIFE text

mod day;
pub mod description;
mod error;
mod life;
pub mod meta;
mod parser;
mod places;
mod query;
mod render;
pub mod source;
mod span;
pub mod time;
mod types;

pub use day::Day;
pub use description::{Description, Place, parse_description};
pub use error::{ErrorKind, LifeError, LineIssue, ParseReport};
pub use life::{Alias, Life, LifeOptions};
pub use query::{PlaceQuery, TimeTotal};
pub use source::{FsLoader, MemoryLoader, Source, SourceLoader};
pub use span::{Span, format_utc};
pub use types::{Coordinates, DayKey, EndTimePolicy, TimezoneCarry, UtcOffset};
