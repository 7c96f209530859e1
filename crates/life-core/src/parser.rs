//! Line classification and record building.
//!
//! Each line is trimmed, cut at the first `;` and lower-cased, then
//! classified in this order:
//!
//! 1. blank: ignored
//! 2. `-- yyyy_mm_dd`: closes the open day and opens a new one
//! 3. `utc...`: sets the ambient timezone
//! 4. `@utc...`: sets the end timezone of the next span only
//! 5. `@...`: meta-command
//! 6. `> ...`: note for the open day
//! 7. anything else: a span line, `HHMM-HHMM: description`
//!
//! A line that cannot be used is reported in the [`ParseReport`] and skipped.
//! Included sources are read into the same [`Life`] with a fresh day and
//! timezone context.

use tracing::{debug, info, warn};

use crate::day::Day;
use crate::description::parse_description;
use crate::error::{LifeError, LineIssue, ParseReport};
use crate::life::{Life, LifeOptions};
use crate::meta::{Directive, parse_directive};
use crate::source::{MemoryLoader, SourceLoader};
use crate::span::Span;
use crate::time::parse_military;
use crate::types::{DayKey, TimezoneCarry, UtcOffset};

/// Name reported for text handed to [`Life::parse`].
const INLINE_SOURCE: &str = "<inline>";

/// Timezone in effect for the next span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimezoneContext {
    /// Start and end share the ambient timezone.
    Fixed(UtcOffset),
    /// Set by `@utc...`: the next span ends in another timezone.
    Switching { start: UtcOffset, end: UtcOffset },
}

impl TimezoneContext {
    const fn ambient(self) -> UtcOffset {
        match self {
            Self::Fixed(offset) | Self::Switching { start: offset, .. } => offset,
        }
    }

    const fn offsets(self) -> (UtcOffset, UtcOffset) {
        match self {
            Self::Fixed(offset) => (offset, offset),
            Self::Switching { start, end } => (start, end),
        }
    }

    const fn after_span(self, carry: TimezoneCarry) -> Self {
        match (self, carry) {
            (Self::Switching { end, .. }, TimezoneCarry::Adopt) => Self::Fixed(end),
            _ => Self::Fixed(self.ambient()),
        }
    }
}

/// Per-source state threaded through line classification.
#[derive(Debug)]
struct ParseState {
    day: Option<Day>,
    timezone: TimezoneContext,
}

impl ParseState {
    const fn new(default_timezone: UtcOffset) -> Self {
        Self {
            day: None,
            timezone: TimezoneContext::Fixed(default_timezone),
        }
    }

    fn open_day(&mut self, what: &'static str) -> Result<&mut Day, LifeError> {
        self.day.as_mut().ok_or(LifeError::NoOpenDay { what })
    }

    fn current_date(&self, what: &'static str) -> Result<DayKey, LifeError> {
        self.day
            .as_ref()
            .map(|d| d.date.clone())
            .ok_or(LifeError::NoOpenDay { what })
    }
}

/// Build context shared by a source and everything it includes.
struct Builder<'a> {
    life: &'a mut Life,
    loader: &'a dyn SourceLoader,
    report: ParseReport,
    /// Sources currently being ingested, outermost first.
    stack: Vec<String>,
}

impl<'a> Builder<'a> {
    fn new(life: &'a mut Life, loader: &'a dyn SourceLoader) -> Self {
        Self {
            life,
            loader,
            report: ParseReport::default(),
            stack: Vec::new(),
        }
    }

    fn ingest(&mut self, name: &str, text: &str) {
        self.stack.push(name.to_string());
        let issues_before = self.report.issues.len();
        let spans_before = self.report.spans_read;
        let mut state = ParseState::new(self.life.options.default_timezone);

        for (idx, raw) in text.lines().enumerate() {
            self.report.lines_read += 1;
            if let Err(error) = self.classify(&mut state, raw) {
                warn!(source = name, line = idx + 1, %error, "skipping line");
                self.report.issues.push(LineIssue {
                    source: name.to_string(),
                    line_number: idx + 1,
                    line: raw.to_string(),
                    error,
                });
            }
        }
        if let Some(day) = state.day.take() {
            self.life.add_day(day);
        }

        self.stack.pop();
        info!(
            source = name,
            spans = self.report.spans_read - spans_before,
            skipped = self.report.issues.len() - issues_before,
            "ingested source"
        );
    }

    fn classify(&mut self, state: &mut ParseState, raw: &str) -> Result<(), LifeError> {
        let stripped = raw.split(';').next().unwrap_or_default().trim();
        let line = stripped.to_lowercase();

        if line.is_empty() {
            Ok(())
        } else if let Some(rest) = line.strip_prefix("--") {
            if let Some(day) = state.day.take() {
                self.life.add_day(day);
            }
            state.day = Some(Day::new(DayKey::new(rest)?));
            Ok(())
        } else if line.starts_with("utc") {
            state.timezone = TimezoneContext::Fixed(line.parse()?);
            Ok(())
        } else if let Some(label) = line.strip_prefix('@').filter(|l| l.starts_with("utc")) {
            state.timezone = TimezoneContext::Switching {
                start: state.timezone.ambient(),
                end: label.parse()?,
            };
            Ok(())
        } else if let Some(body) = line.strip_prefix('@') {
            let raw_body = stripped.strip_prefix('@').unwrap_or(stripped);
            self.meta(state, body, raw_body)
        } else if let Some(note) = line.strip_prefix('>') {
            state.open_day("note")?.add_note(note.trim());
            Ok(())
        } else {
            self.span(state, &line)
        }
    }

    fn span(&mut self, state: &mut ParseState, line: &str) -> Result<(), LifeError> {
        let (start_timezone, end_timezone) = state.timezone.offsets();
        let day = state.open_day("span")?;
        let (range, description) =
            line.split_once(':')
                .ok_or_else(|| LifeError::MissingDelimiter {
                    delimiter: ":",
                    text: line.to_string(),
                })?;
        let (start, end) = parse_range(range)?;

        day.add_span(Span::new(
            day.date.clone(),
            start,
            end,
            parse_description(description.trim()),
            start_timezone,
            end_timezone,
        ));
        state.timezone = state.timezone.after_span(self.life.options.timezone_carry);
        self.report.spans_read += 1;
        Ok(())
    }

    fn meta(&mut self, state: &ParseState, body: &str, raw_body: &str) -> Result<(), LifeError> {
        let directive = parse_directive(body, raw_body)?;
        debug!(directive = directive.name(), "meta-command");
        match directive {
            Directive::LocationChange { old, new } => {
                let since = state.current_date("location change")?;
                self.life.record_location_change(&old, &new, since);
            }
            Directive::Rename { old, new } => {
                let since = state.current_date("rename")?;
                self.life.record_rename(&old, &new, since);
            }
            Directive::Subplace { child, parent } => self.life.add_subplace(&child, &parent),
            Directive::Category { place, category } => self.life.add_category(&place, &category),
            Directive::Coordinates { place, coordinates } => {
                self.life.set_coordinates(&place, coordinates);
            }
            Directive::Include { path } => self.include(&path)?,
            Directive::Unknown => debug!(body, "ignoring unknown meta-command"),
        }
        Ok(())
    }

    fn include(&mut self, path: &str) -> Result<(), LifeError> {
        let source = self.loader.load(path)?;
        if self.stack.contains(&source.name) {
            return Err(LifeError::IncludeCycle(source.name));
        }
        debug!(source = %source.name, "including source");
        self.report.included.push(source.name.clone());
        self.ingest(&source.name, &source.text);
        Ok(())
    }

    fn finish(self) -> ParseReport {
        self.report
    }
}

/// Splits a `HHMM-HHMM` token: the first four characters are the start and
/// the last four the end.
fn parse_range(token: &str) -> Result<(i32, i32), LifeError> {
    let chars: Vec<char> = token.trim().chars().collect();
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    Ok((parse_military(&head)?, parse_military(&tail)?))
}

impl Life {
    /// Parses a complete log held in memory, with default options and no
    /// include support.
    pub fn parse(text: &str) -> (Self, ParseReport) {
        Self::parse_with(text, LifeOptions::default(), &MemoryLoader::new())
    }

    /// Parses a complete log held in memory.
    pub fn parse_with(
        text: &str,
        options: LifeOptions,
        loader: &dyn SourceLoader,
    ) -> (Self, ParseReport) {
        let mut life = Self::new(options);
        let report = life.ingest_str(INLINE_SOURCE, text, loader);
        (life, report)
    }

    /// Loads a source through `loader` and ingests it.
    pub fn ingest_source(
        &mut self,
        name: &str,
        loader: &dyn SourceLoader,
    ) -> Result<ParseReport, LifeError> {
        let source = loader.load(name)?;
        Ok(self.ingest_str(&source.name, &source.text, loader))
    }

    /// Ingests `text` into this life, reporting it as `name`.
    pub fn ingest_str(
        &mut self,
        name: &str,
        text: &str,
        loader: &dyn SourceLoader,
    ) -> ParseReport {
        let mut builder = Builder::new(self, loader);
        builder.ingest(name, text);
        builder.finish()
    }

    /// Replaces the day recorded for `date` with the day parsed from `text`,
    /// which must start with that day's header.
    ///
    /// The text is read into a copy of this life first. Nothing changes
    /// unless it yields exactly one day, dated `date`; directives in the
    /// text are kept along with it.
    pub fn update_day(
        &mut self,
        date: &str,
        text: &str,
        loader: &dyn SourceLoader,
    ) -> Result<ParseReport, LifeError> {
        if self.day(date).is_none() {
            return Err(LifeError::UnknownDay(date.to_string()));
        }

        let mut scratch = self.without_days();
        let report = scratch.ingest_str(date, text, loader);
        let mut days = std::mem::take(&mut scratch.days);
        let day = match days.pop() {
            Some(day) if days.is_empty() && day.date.as_str() == date => day,
            other => {
                let found = days
                    .iter()
                    .chain(other.as_ref())
                    .map(|d| d.date.to_string())
                    .collect();
                return Err(LifeError::DayMismatch {
                    expected: date.to_string(),
                    found,
                });
            }
        };

        scratch.days = std::mem::take(&mut self.days);
        *self = scratch;
        self.remove_day(date);
        self.add_day(day);
        Ok(report)
    }
}
