//! Session state: the classification data model, its persistence, and
//! reconciliation against the filesystem.
//!
//! # Module Structure
//!
//! - [`types`]: [`SessionState`], groups, classifications, and their invariants
//! - [`store`]: reads/writes the JSON sidecar file (`.clip-tagger-state.json`)
//! - [`merge`]: merge, repair and clean-missing against a fresh scan

pub mod merge;
mod store;
pub mod types;

pub use merge::{clean_missing_files, merge_files, repair_renamed_files, MergeReport};
pub use store::StateStore;
pub use types::{Classification, Group, SessionState, SortBy};
