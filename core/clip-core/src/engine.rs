//! SessionEngine - entry point for one session directory.
//!
//! Ties the store, scanner and reconciliation together so the binary only
//! deals in high-level operations:
//! - [`SessionEngine::open_session`]: load or create state, scan, repair,
//!   merge, and hand back a [`Session`] on its Startup screen
//! - [`SessionEngine::reset`], [`SessionEngine::clean_missing`],
//!   [`SessionEngine::preview_plan`]: the one-shot command-line operations
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use clip_core::{load_config, SessionEngine, SystemPreviewer};
//!
//! let engine = SessionEngine::new(Path::new("/videos/shoot"), load_config())?;
//! let mut session = engine.open_session(None, Box::new(SystemPreviewer))?;
//! ```

use std::path::Path;

use crate::config::ClipConfig;
use crate::error::{ClipError, Result};
use crate::planner::{build_plan, detect_conflicts};
use crate::preview::Previewer;
use crate::scanner::{file_names, scan};
use crate::session::Session;
use crate::state::{
    clean_missing_files, merge_files, repair_renamed_files, SessionState, SortBy, StateStore,
};
use crate::storage::SessionPaths;

pub struct SessionEngine {
    store: StateStore,
    config: ClipConfig,
}

impl SessionEngine {
    /// Fails if `directory` does not exist or is not a directory.
    pub fn new(directory: &Path, config: ClipConfig) -> Result<Self> {
        if !directory.is_dir() {
            return Err(ClipError::DirectoryNotFound(directory.to_path_buf()));
        }
        Ok(Self {
            store: StateStore::new(SessionPaths::new(directory)),
            config,
        })
    }

    pub fn paths(&self) -> &SessionPaths {
        self.store.paths()
    }

    pub fn config(&self) -> &ClipConfig {
        &self.config
    }

    /// Loads the persisted state, or starts a new one with the configured sort.
    ///
    /// `sort_override` replaces the persisted sort order on resume. The state's
    /// directory is always the one this engine was opened on, so a moved
    /// session folder keeps working.
    pub fn load_or_create_state(&self, sort_override: Option<SortBy>) -> Result<SessionState> {
        let directory = self.paths().directory();
        if !self.store.exists() {
            let sort_by = sort_override.unwrap_or(self.config.default_sort);
            tracing::info!(directory = %directory.display(), sort_by = %sort_by, "Starting new session");
            return Ok(SessionState::new(directory, sort_by));
        }

        let mut state = self.store.load()?;
        if state.directory != directory {
            tracing::info!(
                saved = %state.directory.display(),
                actual = %directory.display(),
                "Session directory moved"
            );
            state.directory = directory.to_path_buf();
        }
        if let Some(sort_by) = sort_override {
            state.sort_by = sort_by;
        }
        tracing::info!(
            directory = %directory.display(),
            classified = state.classifications.len(),
            groups = state.groups.len(),
            "Resuming session"
        );
        Ok(state)
    }

    /// Loads the state and re-links classified files renamed since it was
    /// saved, against a fresh scan.
    ///
    /// Returns the state, the scanned file names and the number of repairs.
    /// Nothing is written to disk.
    pub fn reconciled_state(
        &self,
        sort_override: Option<SortBy>,
    ) -> Result<(SessionState, Vec<String>, usize)> {
        let mut state = self.load_or_create_state(sort_override)?;
        let files = file_names(&scan(self.paths().directory(), state.sort_by)?);
        let repaired = repair_renamed_files(&mut state, &files);
        if repaired > 0 {
            tracing::info!(repaired, "Re-linked renamed files");
        }
        Ok((state, files, repaired))
    }

    /// Builds a ready-to-run session on its Startup screen.
    ///
    /// When resuming with classifications, the state file is backed up first,
    /// then renamed files are re-linked and the result merged against the
    /// scan. Repairs are saved immediately.
    pub fn open_session(
        &self,
        sort_override: Option<SortBy>,
        previewer: Box<dyn Previewer>,
    ) -> Result<Session> {
        let resumed = self.store.exists();
        let (state, files, repaired) = self.reconciled_state(sort_override)?;
        // the file on disk still holds the pre-repair state here
        if resumed && !state.classifications.is_empty() {
            if let Err(e) = self.store.backup() {
                tracing::warn!(error = %e, "State backup failed");
            }
        }
        if repaired > 0 {
            self.store.save(&state)?;
        }

        let merge = resumed.then(|| {
            let report = merge_files(&state, &files);
            if !report.missing_files.is_empty() {
                tracing::warn!(
                    missing = report.missing_files.len(),
                    "Classified files missing from directory"
                );
            }
            report
        });

        Ok(Session::new(
            state,
            files,
            merge,
            StateStore::new(self.paths().clone()),
            self.config.clone(),
            previewer,
        ))
    }

    /// Deletes the persisted state. A missing state file is not an error.
    pub fn reset(&self) -> Result<()> {
        self.store.reset()
    }

    /// Drops classifications whose file is gone and saves if anything changed.
    ///
    /// Renamed files are re-linked first, so they do not count as missing.
    pub fn clean_missing(&self, sort_override: Option<SortBy>) -> Result<usize> {
        let (mut state, _, repaired) = self.reconciled_state(sort_override)?;
        let removed = clean_missing_files(&mut state);
        if removed > 0 || repaired > 0 {
            self.store.save(&state)?;
        }
        if removed > 0 {
            tracing::info!(removed, "Cleaned missing files from state");
        }
        Ok(removed)
    }

    /// Rename plan of the reconciled state, as text. Nothing is saved.
    pub fn preview_plan(&self, sort_override: Option<SortBy>) -> Result<String> {
        let (state, _, _) = self.reconciled_state(sort_override)?;
        Ok(render_plan_preview(&state))
    }
}

/// Dry-run listing: every item that would change, then any conflicts.
pub fn render_plan_preview(state: &SessionState) -> String {
    let plan = build_plan(state);
    let mut out = String::from("=== Rename Preview ===\n\n");

    let changes: Vec<_> = plan.iter().filter(|item| !item.is_noop()).collect();
    if changes.is_empty() {
        out.push_str("No files to rename.\n");
    }
    for item in &changes {
        out.push_str(&format!("{} -> {}\n", item.original_name(), item.target_name()));
    }

    let conflicts = detect_conflicts(&plan);
    if !conflicts.is_empty() {
        out.push_str(&format!(
            "\nWarning: {} target file(s) already exist:\n",
            conflicts.len()
        ));
        for item in &conflicts {
            out.push_str(&format!("  {}\n", item.target_name()));
        }
    }

    out.push_str(&format!(
        "\nTotal: {} of {} classified files would change\n",
        changes.len(),
        plan.len()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::rename_in_place;
    use crate::session::ScreenKind;
    use crate::state::Group;
    use fs_err as fs;
    use tempfile::TempDir;

    struct NoPreview;

    impl Previewer for NoPreview {
        fn open_file(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn engine_in(dir: &Path) -> SessionEngine {
        SessionEngine::new(dir, ClipConfig::default()).unwrap()
    }

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), name.as_bytes()).unwrap();
        }
    }

    #[test]
    fn test_new_rejects_missing_directory() {
        let temp = TempDir::new().unwrap();
        let result = SessionEngine::new(&temp.path().join("nope"), ClipConfig::default());
        assert!(matches!(result, Err(ClipError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_new_session_uses_default_or_override_sort() {
        let temp = TempDir::new().unwrap();
        let engine = engine_in(temp.path());

        let state = engine.load_or_create_state(None).unwrap();
        assert_eq!(state.sort_by, SortBy::ModifiedTime);
        let state = engine.load_or_create_state(Some(SortBy::Name)).unwrap();
        assert_eq!(state.sort_by, SortBy::Name);
        assert_eq!(state.directory, temp.path());
    }

    #[test]
    fn test_resume_applies_sort_override_and_fixes_directory() {
        let temp = TempDir::new().unwrap();
        let engine = engine_in(temp.path());
        let mut saved = SessionState::new(Path::new("/old/location"), SortBy::CreatedTime);
        saved.current_index = 3;
        StateStore::new(SessionPaths::new(temp.path()))
            .save(&saved)
            .unwrap();

        let state = engine.load_or_create_state(Some(SortBy::Name)).unwrap();
        assert_eq!(state.sort_by, SortBy::Name);
        assert_eq!(state.directory, temp.path());
        assert_eq!(state.current_index, 3);
    }

    #[test]
    fn test_open_session_new_directory() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["b.mp4", "a.mov", "notes.txt"]);
        let engine = engine_in(temp.path());

        let session = engine.open_session(Some(SortBy::Name), Box::new(NoPreview)).unwrap();

        assert_eq!(session.screen_kind(), ScreenKind::Startup);
        assert_eq!(session.files(), ["a.mov".to_string(), "b.mp4".to_string()]);
        assert!(session.render().contains("Starting new session"));
        assert!(!engine.paths().backup_file().exists());
    }

    #[test]
    fn test_open_session_resume_backs_up_and_repairs() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        touch(dir, &["[01_01] intro.mp4", "new.mp4"]);

        let mut saved = SessionState::new(dir, SortBy::Name);
        let intro = Group::new("intro", 1);
        saved.groups.push(intro.clone());
        saved.add_or_update_classification("GOPR01.mp4", &intro.id);
        saved.add_or_update_classification("gone.mp4", &intro.id);
        let store = StateStore::new(SessionPaths::new(dir));
        store.save(&saved).unwrap();

        let engine = engine_in(dir);
        let session = engine.open_session(None, Box::new(NoPreview)).unwrap();

        assert!(engine.paths().backup_file().exists());
        assert!(session.state().is_classified("[01_01] intro.mp4"));
        // repair was persisted, backup holds the pre-repair state
        assert!(store.load().unwrap().is_classified("[01_01] intro.mp4"));
        let text = session.render();
        assert!(text.contains("Resuming previous session"));
        assert!(text.contains("New files:  1"));
        assert!(text.contains("Missing:    1 files"));
    }

    #[test]
    fn test_open_session_corrupt_state_is_error() {
        let temp = TempDir::new().unwrap();
        let engine = engine_in(temp.path());
        fs::write(engine.paths().state_file(), "{ not json").unwrap();

        let result = engine.open_session(None, Box::new(NoPreview));
        assert!(matches!(result, Err(ClipError::Json { .. })));
    }

    #[test]
    fn test_reset_and_clean_missing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        touch(dir, &["kept.mp4"]);
        let mut saved = SessionState::new(dir, SortBy::Name);
        let intro = Group::new("intro", 1);
        saved.groups.push(intro.clone());
        saved.add_or_update_classification("kept.mp4", &intro.id);
        saved.add_or_update_classification("gone.mp4", &intro.id);
        let store = StateStore::new(SessionPaths::new(dir));
        store.save(&saved).unwrap();

        let engine = engine_in(dir);
        assert_eq!(engine.clean_missing(None).unwrap(), 1);
        assert_eq!(store.load().unwrap().classifications.len(), 1);
        assert_eq!(engine.clean_missing(None).unwrap(), 0);

        engine.reset().unwrap();
        assert!(!store.exists());
        engine.reset().unwrap();
    }

    fn renamed_session(dir: &Path) -> StateStore {
        touch(dir, &["a.mp4", "b.mp4"]);
        let mut saved = SessionState::new(dir, SortBy::Name);
        let intro = Group::new("intro", 1);
        saved.groups.push(intro.clone());
        saved.add_or_update_classification("a.mp4", &intro.id);
        saved.add_or_update_classification("b.mp4", &intro.id);
        let store = StateStore::new(SessionPaths::new(dir));
        store.save(&saved).unwrap();
        rename_in_place(&build_plan(&saved)).unwrap();
        store
    }

    #[test]
    fn test_clean_missing_after_rename_keeps_renamed_files() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let store = renamed_session(dir);
        let engine = engine_in(dir);

        assert_eq!(engine.clean_missing(None).unwrap(), 0);

        let state = store.load().unwrap();
        assert_eq!(state.classifications.len(), 2);
        assert!(state.is_classified("[01_01] intro.mp4"));
        assert!(state.is_classified("[01_02] intro.mp4"));
    }

    #[test]
    fn test_preview_after_rename_has_nothing_to_do() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let store = renamed_session(dir);
        let engine = engine_in(dir);

        let text = engine.preview_plan(None).unwrap();

        assert!(text.contains("No files to rename."));
        assert!(!text.contains("Warning"));
        assert!(text.contains("Total: 0 of 2 classified files would change"));
        // preview never writes the repaired state
        assert!(store.load().unwrap().is_classified("a.mp4"));
    }

    #[test]
    fn test_render_plan_preview_lists_changes_and_conflicts() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        touch(dir, &["a.mp4", "[01_02] intro.mp4", "b.mp4"]);

        let mut state = SessionState::new(dir, SortBy::Name);
        let intro = Group::new("intro", 1);
        state.groups.push(intro.clone());
        state.add_or_update_classification("a.mp4", &intro.id);
        state.add_or_update_classification("[01_02] intro.mp4", &intro.id);
        state.add_or_update_classification("b.mp4", &intro.id);

        let text = render_plan_preview(&state);

        assert!(text.starts_with("=== Rename Preview ===\n"));
        assert!(text.contains("a.mp4 -> [01_01] intro.mp4\n"));
        assert!(!text.contains("[01_02] intro.mp4 -> [01_02] intro.mp4"));
        assert!(text.contains("b.mp4 -> [01_03] intro.mp4\n"));
        assert!(!text.contains("Warning"));
        assert!(text.contains("Total: 2 of 3 classified files would change"));
    }

    #[test]
    fn test_render_plan_preview_empty() {
        let state = SessionState::new(Path::new("/clips"), SortBy::Name);
        let text = render_plan_preview(&state);
        assert!(text.contains("No files to rename."));
    }
}
