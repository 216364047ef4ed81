//! File-backed session state persistence.
//!
//! # File Format
//!
//! One pretty-printed JSON document (2-space indentation) per session directory:
//!
//! ```json
//! {
//!   "directory": "/videos/shoot",
//!   "sort_by": "modified_time",
//!   "current_index": 3,
//!   "groups": [{ "id": "01J...", "name": "intro", "order": 1 }],
//!   "classifications": [{ "file": "a.mp4", "group_id": "01J...", "take_number": 1 }],
//!   "skipped": []
//! }
//! ```
//!
//! # Atomic Writes
//!
//! Saves go through a temp file + rename so a crash mid-write never leaves a
//! truncated state file behind. There is no locking: running two sessions
//! against one directory is unsupported and the last writer wins.
//!
//! Unlike most readers of user-owned files, a corrupt state file is an error
//! here rather than an empty default: silently starting over would discard
//! the user's classifications on the next save.

use std::io::Write;

use fs_err as fs;
use tempfile::NamedTempFile;

use crate::error::{ClipError, Result};
use crate::storage::SessionPaths;

use super::types::SessionState;

/// Reads and writes the sidecar state file of one session directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    paths: SessionPaths,
}

impl StateStore {
    pub fn new(paths: SessionPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &SessionPaths {
        &self.paths
    }

    pub fn exists(&self) -> bool {
        self.paths.state_file().is_file()
    }

    pub fn load(&self) -> Result<SessionState> {
        let path = self.paths.state_file();
        if !path.exists() {
            return Err(ClipError::StateNotFound(path));
        }

        let content = fs::read_to_string(&path).map_err(|e| ClipError::Io {
            context: "reading state file".to_string(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| ClipError::Json {
            context: format!("parsing {}", path.display()),
            source: e,
        })
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        let path = self.paths.state_file();
        let content = serde_json::to_string_pretty(state).map_err(|e| ClipError::Json {
            context: "serializing session state".to_string(),
            source: e,
        })?;

        let dir = self.paths.directory();
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ClipError::Io {
            context: format!("creating temp file in {}", dir.display()),
            source: e,
        })?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| ClipError::Io {
                context: format!("writing temp file for {}", path.display()),
                source: e,
            })?;
        tmp.flush().map_err(|e| ClipError::Io {
            context: format!("flushing temp file for {}", path.display()),
            source: e,
        })?;
        tmp.persist(&path).map_err(|e| ClipError::Io {
            context: format!("persisting temp file to {}", path.display()),
            source: e.error,
        })?;

        tracing::debug!(
            path = %path.display(),
            classifications = state.classifications.len(),
            "Session state saved"
        );
        Ok(())
    }

    /// Copies the state file byte-for-byte to its `.bak` sibling.
    pub fn backup(&self) -> Result<()> {
        let path = self.paths.state_file();
        if !path.exists() {
            return Err(ClipError::BackupWithoutState(path));
        }

        let data = fs::read(&path).map_err(|e| ClipError::Io {
            context: "reading state file for backup".to_string(),
            source: e,
        })?;
        fs::write(self.paths.backup_file(), data).map_err(|e| ClipError::Io {
            context: "writing state backup".to_string(),
            source: e,
        })?;
        Ok(())
    }

    /// Deletes the state file. A missing file is not an error.
    pub fn reset(&self) -> Result<()> {
        let path = self.paths.state_file();
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Session state reset");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClipError::Io {
                context: "deleting state file".to_string(),
                source: e,
            }),
        }
    }
}
