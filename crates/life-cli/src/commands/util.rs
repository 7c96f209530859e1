//! Shared utilities for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use life_core::{FsLoader, Life, ParseReport};

use crate::Config;

/// The LIFE file to read: `--file` first, then the configured `life_file`.
pub fn resolve_life_file(cli_file: Option<&Path>, config: &Config) -> Result<PathBuf> {
    cli_file
        .map(Path::to_path_buf)
        .or_else(|| config.life_file.clone())
        .context("no LIFE file given: pass --file or set life_file in the config")
}

/// Reads and parses a LIFE file, resolving includes against the configured
/// include directory or the file's own directory.
pub fn load_life(path: &Path, config: &Config) -> Result<(Life, ParseReport)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let base = config.include_dir.clone().unwrap_or_else(|| {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });
    let loader = FsLoader::new(base);

    let name = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let mut life = Life::new(config.options());
    let report = life.ingest_str(&name.display().to_string(), &text, &loader);
    tracing::debug!(
        days = life.days().len(),
        spans = report.spans_read,
        skipped = report.issues.len(),
        "loaded life"
    );
    Ok((life, report))
}

/// Formats minutes as hours and minutes.
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let hours = minutes.abs() / 60;
    let rest = minutes.abs() % 60;

    if hours >= 1 {
        format!("{sign}{hours}h {rest}m")
    } else {
        format!("{sign}{rest}m")
    }
}
