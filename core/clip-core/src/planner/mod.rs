//! Rename planning: turns classifications into concrete file operations.
//!
//! A plan is derived, never persisted: it is rebuilt from the current
//! [`SessionState`] whenever one is needed.
//!
//! # Conflicts
//!
//! [`detect_conflicts`] runs at plan-build time and is advisory. Execution does
//! not re-check targets before each operation, so a file created in between is
//! overwritten (or the operation fails) according to platform semantics.
//! Callers surface conflicts to the user before executing.
//!
//! # Module Structure
//!
//! - [`naming`]: `[GG_TT] name.ext` generation and change classification
//! - [`execute`]: rename-in-place and copy-to-directory batch execution

pub mod execute;
pub mod naming;

use std::path::PathBuf;

use crate::state::SessionState;

pub use execute::{copy_to_directory, execute_plan, rename_in_place, ExecutionMode};
pub use naming::{
    detect_change_kind, dotted_extension, generate_filename, generate_target_path, ChangeKind,
};

/// One computed `(original → target)` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanItem {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
}

impl PlanItem {
    /// True when the file already carries its target name.
    pub fn is_noop(&self) -> bool {
        self.original_path == self.target_path
    }

    pub fn original_name(&self) -> String {
        file_name_of(&self.original_path)
    }

    pub fn target_name(&self) -> String {
        file_name_of(&self.target_path)
    }

    pub fn change_kind(&self) -> ChangeKind {
        detect_change_kind(&self.original_name(), &self.target_name())
    }
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Builds one plan item per classification, in classification order.
///
/// Classifications whose group no longer exists are left out.
pub fn build_plan(state: &SessionState) -> Vec<PlanItem> {
    state
        .classifications
        .iter()
        .filter_map(|classification| {
            let group = state.find_group_by_id(&classification.group_id)?;
            let original_path = state.directory.join(&classification.file);
            let target_path = generate_target_path(
                &state.directory,
                &original_path,
                group.order,
                classification.take_number,
                &group.name,
            );
            Some(PlanItem {
                original_path,
                target_path,
            })
        })
        .collect()
}

/// Returns the items whose target already exists on disk. No-ops never conflict.
pub fn detect_conflicts(plan: &[PlanItem]) -> Vec<PlanItem> {
    plan.iter()
        .filter(|item| !item.is_noop() && item.target_path.exists())
        .cloned()
        .collect()
}

/// Number of items that would actually touch the filesystem.
pub fn count_changes(plan: &[PlanItem]) -> usize {
    plan.iter().filter(|item| !item.is_noop()).count()
}
