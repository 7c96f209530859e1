//! Error types and per-line parse reporting.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while decoding or querying a LIFE log.
#[derive(Debug, Error)]
pub enum LifeError {
    /// A military time token could not be decoded.
    #[error("invalid military time: {0:?}")]
    InvalidTime(String),

    /// `2400` was written for midnight; days end at `2359`.
    #[error("2400 is not a time of day: end the span at 2359 or continue it on the next day")]
    EndOfDay,

    /// A timezone label was not `UTC`, `UTC+N` or `UTC-N`.
    #[error("invalid timezone label: {0:?}")]
    InvalidTimezone(String),

    /// A day key was not a `yyyy_mm_dd` calendar date.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// A coordinate pair could not be decoded.
    #[error("invalid coordinates: {0:?}")]
    InvalidCoordinates(String),

    /// A required delimiter was missing from a line.
    #[error("missing {delimiter:?} in {text:?}")]
    MissingDelimiter {
        delimiter: &'static str,
        text: String,
    },

    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A line that needs an open day appeared before any day header.
    #[error("{what} before any day header")]
    NoOpenDay { what: &'static str },

    /// No day is recorded for the requested date.
    #[error("no day recorded for {0}")]
    UnknownDay(String),

    /// Replacement text for a day did not yield exactly that day.
    #[error("text for {expected} produced days {found:?}")]
    DayMismatch { expected: String, found: Vec<String> },

    /// An included source could not be read.
    #[error("failed to read {}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An include directive named a source that is already being ingested.
    #[error("include cycle through {0}")]
    IncludeCycle(String),
}

/// Broad classification of a [`LifeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A token could not be decoded or a delimiter is missing.
    Format,
    /// A line is out of place (e.g. a span before any day header).
    Structural,
    /// A lookup for an unknown key.
    Lookup,
    /// A source could not be read or would be read recursively.
    Source,
}

impl LifeError {
    /// Returns the broad class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTime(_)
            | Self::EndOfDay
            | Self::InvalidTimezone(_)
            | Self::InvalidDate(_)
            | Self::InvalidCoordinates(_)
            | Self::MissingDelimiter { .. }
            | Self::Empty { .. } => ErrorKind::Format,
            Self::NoOpenDay { .. } | Self::DayMismatch { .. } => ErrorKind::Structural,
            Self::UnknownDay(_) => ErrorKind::Lookup,
            Self::Source { .. } | Self::IncludeCycle(_) => ErrorKind::Source,
        }
    }
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Structural => "structural",
            Self::Lookup => "lookup",
            Self::Source => "source",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line that was skipped during ingestion.
#[derive(Debug)]
pub struct LineIssue {
    /// Name of the source the line came from.
    pub source: String,
    /// 1-based line number within that source.
    pub line_number: usize,
    /// The line as written, before lower-casing and comment stripping.
    pub line: String,
    /// Why the line was skipped.
    pub error: LifeError,
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} error: {} ({})",
            self.source,
            self.line_number,
            self.error.kind(),
            self.error,
            self.line.trim()
        )
    }
}

/// Outcome of ingesting one or more sources.
#[derive(Debug, Default)]
pub struct ParseReport {
    /// Lines that were skipped, in the order they were met.
    pub issues: Vec<LineIssue>,
    /// Number of lines read across all sources.
    pub lines_read: usize,
    /// Number of spans attached to days.
    pub spans_read: usize,
    /// Names of the sources that were included by directives.
    pub included: Vec<String>,
}

impl ParseReport {
    /// Returns true when no line was skipped.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
