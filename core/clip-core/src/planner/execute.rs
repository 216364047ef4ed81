//! Batch execution of a rename plan.
//!
//! Items are applied strictly in plan order. Neither mode is transactional:
//! on the first failure execution stops, earlier operations stay applied, and
//! the error carries the index of the failing item.

use std::io;
use std::path::Path;

use fs_err as fs;

use super::PlanItem;
use crate::error::{ClipError, Result};

/// How a plan is applied to the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    RenameInPlace,
    CopyToDirectory,
}

impl ExecutionMode {
    pub const ALL: [ExecutionMode; 2] = [ExecutionMode::RenameInPlace, ExecutionMode::CopyToDirectory];

    pub fn label(&self) -> &'static str {
        match self {
            ExecutionMode::RenameInPlace => "Rename in place",
            ExecutionMode::CopyToDirectory => "Copy to new directory",
        }
    }
}

/// Runs `plan` in `mode`. `output_dir` is only used for copies.
///
/// Returns the number of files renamed or copied.
pub fn execute_plan(plan: &[PlanItem], mode: ExecutionMode, output_dir: &Path) -> Result<usize> {
    let result = match mode {
        ExecutionMode::RenameInPlace => rename_in_place(plan),
        ExecutionMode::CopyToDirectory => copy_to_directory(plan, output_dir),
    };

    match &result {
        Ok(changed) => tracing::info!(mode = mode.label(), changed, "Rename plan executed"),
        Err(e) => tracing::error!(mode = mode.label(), error = %e, "Rename plan failed"),
    }
    result
}

/// Renames every non-no-op item in its directory.
pub fn rename_in_place(plan: &[PlanItem]) -> Result<usize> {
    let mut changed = 0;
    for (index, item) in plan.iter().enumerate() {
        if item.is_noop() {
            continue;
        }

        fs::rename(&item.original_path, &item.target_path).map_err(|e| ClipError::Rename {
            index,
            from: item.original_name(),
            to: item.target_name(),
            source: e,
        })?;
        changed += 1;
    }
    Ok(changed)
}

/// Copies every non-no-op item into `output_dir` under its target file name.
///
/// Sources are left untouched. A failed copy may leave a partial file behind.
pub fn copy_to_directory(plan: &[PlanItem], output_dir: &Path) -> Result<usize> {
    fs::create_dir_all(output_dir).map_err(|e| ClipError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut changed = 0;
    for (index, item) in plan.iter().enumerate() {
        if item.is_noop() {
            continue;
        }

        let target_name = item.target_name();
        let target_path = output_dir.join(&target_name);
        copy_file(&item.original_path, &target_path).map_err(|e| ClipError::Copy {
            index,
            from: item.original_name(),
            to: target_name,
            source: e,
        })?;
        changed += 1;
    }
    Ok(changed)
}

fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    let mut reader = fs::File::open(src)?;
    let mut writer = fs::File::create(dst)?;
    io::copy(&mut reader, &mut writer)?;
    writer.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn item(dir: &Path, from: &str, to: &str) -> PlanItem {
        PlanItem {
            original_path: dir.join(from),
            target_path: dir.join(to),
        }
    }

    #[test]
    fn test_rename_in_place_renames_and_skips_noops() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("a.mp4"), b"a").unwrap();
        fs::write(dir.join("[01_02] intro.mp4"), b"b").unwrap();

        let plan = vec![
            item(dir, "a.mp4", "[01_01] intro.mp4"),
            item(dir, "[01_02] intro.mp4", "[01_02] intro.mp4"),
        ];
        let changed = rename_in_place(&plan).unwrap();

        assert_eq!(changed, 1);
        assert!(!dir.join("a.mp4").exists());
        assert_eq!(fs::read(dir.join("[01_01] intro.mp4")).unwrap(), b"a");
        assert!(dir.join("[01_02] intro.mp4").exists());
    }

    #[test]
    fn test_rename_in_place_stops_at_first_failure() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("a.mp4"), b"a").unwrap();
        fs::write(dir.join("c.mp4"), b"c").unwrap();

        let plan = vec![
            item(dir, "a.mp4", "[01_01] intro.mp4"),
            item(dir, "missing.mp4", "[01_02] intro.mp4"),
            item(dir, "c.mp4", "[01_03] intro.mp4"),
        ];
        let err = rename_in_place(&plan).unwrap_err();

        assert!(matches!(err, ClipError::Rename { index: 1, .. }));
        // Earlier rename is not rolled back, later one never ran
        assert!(dir.join("[01_01] intro.mp4").exists());
        assert!(dir.join("c.mp4").exists());
    }

    #[test]
    fn test_copy_to_directory_leaves_sources() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("a.mp4"), b"alpha").unwrap();
        let out = dir.join("renamed").join("nested");

        let plan = vec![item(dir, "a.mp4", "[01_01] intro.mp4")];
        let changed = copy_to_directory(&plan, &out).unwrap();

        assert_eq!(changed, 1);
        assert_eq!(fs::read(dir.join("a.mp4")).unwrap(), b"alpha");
        assert_eq!(fs::read(out.join("[01_01] intro.mp4")).unwrap(), b"alpha");
        assert!(!dir.join("[01_01] intro.mp4").exists());
    }

    #[test]
    fn test_copy_to_existing_directory_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("a.mp4"), b"a").unwrap();
        let out = dir.join("out");
        fs::create_dir_all(&out).unwrap();

        let plan = vec![item(dir, "a.mp4", "[01_01] intro.mp4")];
        assert_eq!(copy_to_directory(&plan, &out).unwrap(), 1);
    }

    #[test]
    fn test_copy_failure_reports_index() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let plan = vec![item(dir, "gone.mp4", "[01_01] intro.mp4")];

        let err = copy_to_directory(&plan, &dir.join("out")).unwrap_err();
        assert!(matches!(err, ClipError::Copy { index: 0, .. }));
    }

    #[test]
    fn test_execute_plan_dispatches_on_mode() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("a.mp4"), b"a").unwrap();
        let plan = vec![item(dir, "a.mp4", "[01_01] intro.mp4")];

        let out = dir.join("copies");
        execute_plan(&plan, ExecutionMode::CopyToDirectory, &out).unwrap();
        assert!(dir.join("a.mp4").exists());
        assert!(out.join("[01_01] intro.mp4").exists());

        execute_plan(&plan, ExecutionMode::RenameInPlace, &out).unwrap();
        assert!(!dir.join("a.mp4").exists());
        assert!(dir.join("[01_01] intro.mp4").exists());
    }
}
