//! User configuration loading.
//!
//! Read from `<config dir>/clip-tagger/config.json`. A missing or malformed
//! file yields defaults; every field is optional.

use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::state::SortBy;

/// Tunables for the session engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Classification-only actions (same-as-previous, skip) between autosaves.
    pub autosave_interval: usize,
    /// Rows shown by the scrolling lists on selection and review screens.
    pub viewport_height: usize,
    /// Copy mode writes into `<session dir>/<prefix><timestamp>`.
    pub output_dir_prefix: String,
    /// Sort order for new sessions when none is given on the command line.
    pub default_sort: SortBy,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            autosave_interval: 5,
            viewport_height: 10,
            output_dir_prefix: "renamed_".to_string(),
            default_sort: SortBy::ModifiedTime,
        }
    }
}

/// Returns the path to the config file, if a config directory exists.
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("clip-tagger").join("config.json"))
}

/// Loads the user config, returning defaults if it doesn't exist.
pub fn load_config() -> ClipConfig {
    get_config_path()
        .map(|p| load_config_from(&p))
        .unwrap_or_default()
}

/// Loads config from an explicit path, returning defaults on any failure.
pub fn load_config_from(path: &Path) -> ClipConfig {
    let Ok(content) = fs::read_to_string(path) else {
        return ClipConfig::default();
    };
    match serde_json::from_str::<ClipConfig>(&content) {
        Ok(config) => config.normalized(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
            ClipConfig::default()
        }
    }
}

impl ClipConfig {
    /// Zero intervals or heights would disable autosave or hide lists.
    fn normalized(mut self) -> Self {
        self.autosave_interval = self.autosave_interval.max(1);
        self.viewport_height = self.viewport_height.max(1);
        self
    }
}
