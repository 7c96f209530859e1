//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use life_core::{EndTimePolicy, LifeOptions, TimezoneCarry, UtcOffset};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// LIFE file read when `--file` is not given.
    pub life_file: Option<PathBuf>,
    /// Base directory for `@include` paths. Defaults to the directory of the
    /// LIFE file.
    pub include_dir: Option<PathBuf>,
    /// Timezone before the first `UTC...` line of each file.
    pub default_timezone: UtcOffset,
    pub end_time_policy: EndTimePolicy,
    pub timezone_carry: TimezoneCarry,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // LIFE_* environment variables win.
        figment = figment.merge(Env::prefixed("LIFE_"));

        figment.extract()
    }

    /// Parser options derived from this configuration.
    pub const fn options(&self) -> LifeOptions {
        LifeOptions {
            default_timezone: self.default_timezone,
            end_time_policy: self.end_time_policy,
            timezone_carry: self.timezone_carry,
        }
    }
}

/// Returns the platform-specific config directory for life.
///
/// On Linux: `~/.config/life`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("life"))
}
