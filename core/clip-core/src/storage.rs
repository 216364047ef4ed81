//! Sidecar path management for a session directory.
//!
//! All paths the engine writes next to the user's clips are decided here, so
//! the state file name lives in one place and tests can point a session at a
//! temp directory.

use std::path::{Path, PathBuf};

/// Name of the persisted session state, written inside the session directory.
pub const STATE_FILE_NAME: &str = ".clip-tagger-state.json";

/// Suffix appended to the state file name for the backup copy.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Sidecar paths for one session directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    directory: PathBuf,
}

impl SessionPaths {
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
        }
    }

    /// The session directory the clips live in.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path to `.clip-tagger-state.json`.
    pub fn state_file(&self) -> PathBuf {
        self.directory.join(STATE_FILE_NAME)
    }

    /// Path to `.clip-tagger-state.json.bak`.
    pub fn backup_file(&self) -> PathBuf {
        self.directory
            .join(format!("{}{}", STATE_FILE_NAME, BACKUP_SUFFIX))
    }

    /// Path to a copy-mode output directory named `<prefix><timestamp>`.
    pub fn output_dir(&self, prefix: &str, timestamp: &str) -> PathBuf {
        self.directory.join(format!("{}{}", prefix, timestamp))
    }
}
