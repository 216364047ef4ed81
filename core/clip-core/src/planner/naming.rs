//! Target filename generation: `[GG_TT] <group name><ext>`.

use std::path::{Path, PathBuf};

use crate::patterns::parse_take_prefix;

/// Builds `[GG_TT] <group name><extension>`.
///
/// Both numbers are zero-padded to at least two digits and never truncated
/// (1 → `01`, 99 → `99`, 100 → `100`). `extension` includes its leading dot
/// and is used verbatim.
pub fn generate_filename(group_order: u32, take_number: u32, group_name: &str, extension: &str) -> String {
    format!(
        "[{:02}_{:02}] {}{}",
        group_order, take_number, group_name, extension
    )
}

/// Extension of `path` with its leading dot and original case, or `""`.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Joins `directory` with the generated name for `original_path`.
pub fn generate_target_path(
    directory: &Path,
    original_path: &Path,
    group_order: u32,
    take_number: u32,
    group_name: &str,
) -> PathBuf {
    let extension = dotted_extension(original_path);
    directory.join(generate_filename(
        group_order,
        take_number,
        group_name,
        &extension,
    ))
}

/// What a plan item does to a file, as shown on the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Original name has no `[GG_TT]` tag yet.
    New,
    /// Tagged file moves to a different group number.
    Moved,
    /// Same group number, different take.
    Updated,
    /// Target equals original, or only the name after the tag changes.
    Unchanged,
}

impl ChangeKind {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ChangeKind::New => Some("new"),
            ChangeKind::Moved => Some("moved"),
            ChangeKind::Updated => Some("updated"),
            ChangeKind::Unchanged => None,
        }
    }
}

/// Compares the `[GG_TT]` tags of the original and target filenames.
pub fn detect_change_kind(original_name: &str, target_name: &str) -> ChangeKind {
    if original_name == target_name {
        return ChangeKind::Unchanged;
    }

    let Some((old_group, old_take)) = parse_take_prefix(original_name) else {
        return ChangeKind::New;
    };

    match parse_take_prefix(target_name) {
        Some((new_group, _)) if new_group != old_group => ChangeKind::Moved,
        Some((_, new_take)) if new_take != old_take => ChangeKind::Updated,
        _ => ChangeKind::Unchanged,
    }
}
