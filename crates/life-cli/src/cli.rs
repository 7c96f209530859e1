//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use life_core::PlaceQuery;

/// Query a LIFE location log.
///
/// Reads a LIFE file (and the files it includes) and answers questions about
/// where time was spent.
#[derive(Debug, Parser)]
#[command(name = "life", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// LIFE file to read (defaults to `life_file` from the config).
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse the log and list every skipped line.
    Check,

    /// List visited places with the time spent at each.
    Places {
        /// Sort by time spent, ascending.
        #[arg(long)]
        sorted: bool,
    },

    /// Show where the log places a given moment.
    Where {
        /// Day as `yyyy_mm_dd`.
        date: String,

        /// Time as `HHMM`.
        time: String,
    },

    /// Total time spent at a place.
    Total {
        place: String,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Count both endpoint minutes of every span.
        #[arg(long)]
        inclusive: bool,
    },

    /// List the spans spent at a place.
    Spans {
        place: String,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Show start and end as UTC instants.
        #[arg(long)]
        utc: bool,
    },

    /// List spans carrying a tag (or a semantic label).
    Tagged {
        label: String,

        /// Match semantic labels instead of tags.
        #[arg(long)]
        semantics: bool,

        /// Require an exact label match instead of a substring.
        #[arg(long)]
        exact: bool,
    },

    /// Resolve a place name through its renames.
    Name {
        place: String,

        /// Resolve as of this day instead of the last day in the log.
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Print one day in LIFE format.
    Day {
        /// Day as `yyyy_mm_dd`.
        date: String,

        /// Rewrite places to their current names.
        #[arg(long)]
        current_names: bool,

        /// Rewrite places to their top superplace.
        #[arg(long)]
        superplaces: bool,
    },

    /// Print the whole log in LIFE format.
    Render,

    /// Print the whole log as JSON.
    Export {
        /// Emit a single line instead of indented JSON.
        #[arg(long)]
        compact: bool,
    },
}

/// Which spans count as being at a place.
#[derive(Debug, Clone, Copy, Args)]
pub struct ScopeArgs {
    /// Also match the place's subplaces.
    #[arg(long)]
    pub subplaces: bool,

    /// With --subplaces, include the subplaces of subplaces.
    #[arg(long, requires = "subplaces")]
    pub recursive: bool,

    /// Match place names exactly instead of by substring.
    #[arg(long)]
    pub exact: bool,
}

impl From<ScopeArgs> for PlaceQuery {
    fn from(args: ScopeArgs) -> Self {
        Self {
            strict: !args.subplaces,
            recursive: args.recursive,
            exact_match: args.exact,
        }
    }
}
