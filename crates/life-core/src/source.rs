//! Where included LIFE texts come from.
//!
//! The core never opens files on its own initiative; `@include` directives are
//! resolved through a [`SourceLoader`].

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use crate::error::LifeError;

/// A LIFE text and the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Resolved name; also the identity used for include cycle detection.
    pub name: String,
    pub text: String,
}

/// Resolves include directives to texts.
pub trait SourceLoader {
    /// Loads the source an `@include` directive names.
    fn load(&self, name: &str) -> Result<Source, LifeError>;
}

/// Loads includes from the filesystem, relative to a base directory.
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
    base: PathBuf,
}

impl FsLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, name: &str) -> Result<Source, LifeError> {
        let path = self.base.join(name);
        let text = std::fs::read_to_string(&path).map_err(|source| LifeError::Source {
            path: path.clone(),
            source,
        })?;
        // Spellings of one file share a name, so cycles are caught on the first repeat.
        let name = std::fs::canonicalize(&path).unwrap_or(path);
        Ok(Source {
            name: name.display().to_string(),
            text,
        })
    }
}

/// Serves includes from an in-memory map of name to text.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.insert(name.into(), text.into());
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<Source, LifeError> {
        self.sources
            .get(name)
            .map(|text| Source {
                name: name.to_string(),
                text: text.clone(),
            })
            .ok_or_else(|| LifeError::Source {
                path: PathBuf::from(name),
                source: io::Error::new(io::ErrorKind::NotFound, "no such source"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_loader_reads_relative_to_base() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("extra.life"), "-- 2020_01_01\n").unwrap();

        let loader = FsLoader::new(temp.path());
        let source = loader.load("extra.life").unwrap();
        assert_eq!(source.text, "-- 2020_01_01\n");
        assert!(source.name.ends_with("extra.life"));
    }

    #[test]
    fn fs_loader_names_sources_by_canonical_path() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("extra.life"), "").unwrap();

        let loader = FsLoader::new(temp.path());
        let plain = loader.load("extra.life").unwrap();
        let dotted = loader.load("./sub/../extra.life").unwrap();
        assert_eq!(plain.name, dotted.name);
    }

    #[test]
    fn fs_loader_reports_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = FsLoader::new(temp.path()).load("missing.life").unwrap_err();
        assert!(matches!(err, LifeError::Source { .. }));
    }

    #[test]
    fn memory_loader_serves_registered_names() {
        let loader = MemoryLoader::new().with("a.life", "text");
        assert_eq!(loader.load("a.life").unwrap().text, "text");
        assert!(loader.load("b.life").is_err());
    }
}
