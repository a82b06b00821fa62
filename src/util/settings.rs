//! User settings read from `settings.conf`.

use std::path::{Path, PathBuf};

use super::config::{parse_bool, parse_key_value, skip_comment_or_empty};
use super::paths::{default_index_path, resolve_settings_config_path};
use crate::logic::DEFAULT_PRIORITY_TYPE;

/// User-tunable settings loaded from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Type tag ordered first in listings.
    pub priority_type: String,
    /// Daemon library index file.
    pub index_path: PathBuf,
    /// Optional installed listing (`lib list --format json` output) read at startup.
    pub installed_path: Option<PathBuf>,
    /// Daemon CLI executable.
    pub cli_path: PathBuf,
    /// Log mutating commands instead of running them.
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            priority_type: DEFAULT_PRIORITY_TYPE.to_string(),
            index_path: default_index_path(),
            installed_path: None,
            cli_path: PathBuf::from("arduino-cli"),
            dry_run: false,
        }
    }
}

impl Settings {
    /// What: Load settings from the user's `settings.conf`.
    ///
    /// Output:
    /// - Parsed settings; defaults when the file is missing or unreadable.
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = resolve_settings_config_path() else {
            tracing::debug!("no settings.conf found; using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// What: Load settings from a specific file.
    ///
    /// Inputs:
    /// - `path`: Settings file.
    ///
    /// Output:
    /// - Parsed settings; defaults when the file cannot be read.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "loaded settings");
                Self::parse(&content)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read settings; using defaults");
                Self::default()
            }
        }
    }

    /// What: Parse `settings.conf` content over the defaults.
    ///
    /// Inputs:
    /// - `content`: File content.
    ///
    /// Output:
    /// - Settings with every recognised key applied.
    ///
    /// Details:
    /// - Unknown keys are logged and ignored; empty values keep the default.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut out = Self::default();
        for line in content.lines() {
            if skip_comment_or_empty(line) {
                continue;
            }
            let Some((key, val)) = parse_key_value(line) else {
                continue;
            };
            if val.is_empty() {
                continue;
            }
            match key.as_str() {
                "priority_type" => out.priority_type = val,
                "index_path" | "index" => out.index_path = PathBuf::from(val),
                "installed_path" | "installed" => out.installed_path = Some(PathBuf::from(val)),
                "cli_path" | "cli" => out.cli_path = PathBuf::from(val),
                "dry_run" => out.dry_run = parse_bool(&val),
                _ => tracing::debug!(key = %key, "ignoring unknown setting"),
            }
        }
        out
    }
}
