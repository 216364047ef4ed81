//! Error types for clip-core operations.

use std::path::PathBuf;

/// All errors that can occur in clip-core operations.
///
/// Bookkeeping misuse (an out-of-range cursor, a group ID that no longer
/// exists) is never an error: those paths are silent no-ops in the store and
/// the state machine. Everything here is a real filesystem or process failure.
#[derive(Debug, thiserror::Error)]
pub enum ClipError {
    // ─────────────────────────────────────────────────────────────────────
    // Session Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("State file not found: {0}")]
    StateNotFound(PathBuf),

    #[error("Cannot back up state: no state file at {0}")]
    BackupWithoutState(PathBuf),

    // ─────────────────────────────────────────────────────────────────────
    // Rename Plan Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Rename failed at item {index}: {from} -> {to}: {source}")]
    Rename {
        index: usize,
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Copy failed at item {index}: {from} -> {to}: {source}")]
    Copy {
        index: usize,
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Preview Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Preview failed: {0}")]
    Preview(String),

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using ClipError.
pub type Result<T> = std::result::Result<T, ClipError>;
