//! Reconciles a fresh directory scan against persisted classifications.
//!
//! - [`merge_files`]: pure set difference between scanned and classified names.
//! - [`repair_renamed_files`]: re-links classifications whose file was renamed
//!   to this tool's own `[GG_TT] name.ext` convention (e.g. by a previous
//!   rename-in-place run). Only exact expected names are matched.
//! - [`clean_missing_files`]: drops classifications whose file is gone.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::planner::generate_target_path;

use super::types::SessionState;

/// Outcome of [`merge_files`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Scanned files with no classification, in scan order.
    pub new_files: Vec<String>,
    /// Classified files absent from the scan, in classification order.
    pub missing_files: Vec<String>,
    /// Scanned files that already have a classification.
    pub existing_count: usize,
}

pub fn merge_files(state: &SessionState, scanned: &[String]) -> MergeReport {
    let classified: HashSet<&str> = state
        .classifications
        .iter()
        .map(|c| c.file.as_str())
        .collect();
    let scanned_set: HashSet<&str> = scanned.iter().map(String::as_str).collect();

    let mut report = MergeReport::default();
    for file in scanned {
        if classified.contains(file.as_str()) {
            report.existing_count += 1;
        } else {
            report.new_files.push(file.clone());
        }
    }

    report.missing_files = state
        .classifications
        .iter()
        .filter(|c| !scanned_set.contains(c.file.as_str()))
        .map(|c| c.file.clone())
        .collect();

    report
}

/// Expected renamed filename for the classification of `file`, if its group exists.
fn expected_name(state: &SessionState, file: &str) -> Option<String> {
    let classification = state.get_classification(file)?;
    let group = state.find_group_by_id(&classification.group_id)?;
    let target = generate_target_path(
        Path::new(""),
        Path::new(file),
        group.order,
        classification.take_number,
        &group.name,
    );
    Some(target.to_string_lossy().to_string())
}

/// Rewrites the `file` of missing classifications whose expected renamed name
/// is present in the scan. Returns the number of classifications repaired.
///
/// A candidate is left alone when its expected name is also expected by
/// another missing classification, or already belongs to a different
/// classification. Those collisions are logged, never guessed at.
pub fn repair_renamed_files(state: &mut SessionState, scanned: &[String]) -> usize {
    let scanned_set: HashSet<&str> = scanned.iter().map(String::as_str).collect();

    let candidates: Vec<(String, String)> = state
        .classifications
        .iter()
        .filter(|c| !scanned_set.contains(c.file.as_str()))
        .filter_map(|c| Some((c.file.clone(), expected_name(state, &c.file)?)))
        .filter(|(_, expected)| scanned_set.contains(expected.as_str()))
        .collect();

    let mut expected_counts: HashMap<&str, usize> = HashMap::new();
    for (_, expected) in &candidates {
        *expected_counts.entry(expected.as_str()).or_default() += 1;
    }

    let mut repairs = Vec::new();
    for (file, expected) in &candidates {
        if expected_counts[expected.as_str()] > 1 {
            tracing::warn!(
                file = %file,
                expected = %expected,
                "Ambiguous repair: several classifications expect this name"
            );
            continue;
        }
        if state.is_classified(expected) {
            tracing::warn!(
                file = %file,
                expected = %expected,
                "Ambiguous repair: expected name is already classified"
            );
            continue;
        }
        repairs.push((file.clone(), expected.clone()));
    }

    for (file, expected) in &repairs {
        if let Some(classification) = state.classifications.iter_mut().find(|c| &c.file == file) {
            classification.file = expected.clone();
        }
        tracing::debug!(from = %file, to = %expected, "Classification repaired");
    }

    repairs.len()
}

/// Drops classifications whose file no longer exists in the session directory.
/// Returns the number removed.
pub fn clean_missing_files(state: &mut SessionState) -> usize {
    let directory = state.directory.clone();
    let before = state.classifications.len();
    state
        .classifications
        .retain(|c| directory.join(&c.file).exists());
    before - state.classifications.len()
}
