use std::path::PathBuf;

use crate::planner::{build_plan, count_changes, detect_conflicts, execute_plan, ExecutionMode, PlanItem};
use crate::state::SessionState;

use super::{Action, Transition};

const MAX_CONFLICTS_SHOWN: usize = 5;

/// Result of running the plan, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Succeeded { mode: ExecutionMode, changed: usize },
    Failed { mode: ExecutionMode, error: String },
}

/// Mode selection, conflict warnings and, once run, the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteScreen {
    pub plan: Vec<PlanItem>,
    pub conflicts: Vec<PlanItem>,
    pub mode: ExecutionMode,
    pub output_dir: PathBuf,
    pub outcome: Option<ExecutionOutcome>,
}

impl CompleteScreen {
    pub(crate) fn new(state: &SessionState, output_dir: PathBuf) -> Self {
        let plan = build_plan(state);
        let conflicts = detect_conflicts(&plan);
        Self {
            plan,
            conflicts,
            mode: ExecutionMode::default(),
            output_dir,
            outcome: None,
        }
    }

    /// Runs the plan in the selected mode and records the outcome.
    pub(crate) fn execute(&mut self) {
        let mode = self.mode;
        self.outcome = Some(match execute_plan(&self.plan, mode, &self.output_dir) {
            Ok(changed) => ExecutionOutcome::Succeeded { mode, changed },
            Err(e) => ExecutionOutcome::Failed {
                mode,
                error: e.to_string(),
            },
        });
    }

    fn toggle_mode(&mut self, step_back: bool) {
        let modes = ExecutionMode::ALL;
        let current = modes.iter().position(|m| *m == self.mode).unwrap_or(0);
        let next = if step_back {
            (current + modes.len() - 1) % modes.len()
        } else {
            (current + 1) % modes.len()
        };
        self.mode = modes[next];
    }

    pub fn render(&self) -> String {
        let mut out = String::from("=== Complete ===\n\n");

        if let Some(outcome) = &self.outcome {
            match outcome {
                ExecutionOutcome::Succeeded { mode, changed } => {
                    out.push_str("Success!\n\n");
                    out.push_str(&format!("  Mode: {}\n", mode.label()));
                    out.push_str(&format!("  Files changed: {}\n", changed));
                    if *mode == ExecutionMode::CopyToDirectory {
                        out.push_str(&format!("  Output: {}\n", self.output_dir.display()));
                    }
                }
                ExecutionOutcome::Failed { mode, error } => {
                    out.push_str(&format!("{} failed:\n\n  {}\n", mode.label(), error));
                }
            }
            out.push_str("\nPress any key to exit\n");
            return out;
        }

        out.push_str(&format!(
            "{} of {} classified files will change\n\n",
            count_changes(&self.plan),
            self.plan.len()
        ));

        if !self.conflicts.is_empty() {
            out.push_str(&format!(
                "Warning: {} target file(s) already exist:\n",
                self.conflicts.len()
            ));
            for item in self.conflicts.iter().take(MAX_CONFLICTS_SHOWN) {
                out.push_str(&format!("  {}\n", item.target_name()));
            }
            if self.conflicts.len() > MAX_CONFLICTS_SHOWN {
                out.push_str(&format!(
                    "  ... and {} more\n",
                    self.conflicts.len() - MAX_CONFLICTS_SHOWN
                ));
            }
            out.push('\n');
        }

        out.push_str("Select mode:\n");
        for mode in ExecutionMode::ALL {
            let marker = if mode == self.mode { "> " } else { "  " };
            out.push_str(&format!("{}{}\n", marker, mode.label()));
            if mode == ExecutionMode::CopyToDirectory {
                out.push_str(&format!("    into {}\n", self.output_dir.display()));
            }
        }

        out.push_str("\n[Up/Down] Select  [Enter] Execute  [Esc] Back to review  [q] Quit\n");
        out
    }

    pub fn handle(&mut self, action: Action) -> Transition {
        if self.outcome.is_some() {
            return Transition::Quit;
        }
        match action {
            Action::Up => self.toggle_mode(true),
            Action::Down => self.toggle_mode(false),
            Action::Confirm => return Transition::Execute,
            Action::Cancel => return Transition::BackToReview,
            Action::Quit => return Transition::Quit,
            _ => {}
        }
        Transition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Group, SortBy};
    use fs_err as fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn classified_state(dir: &Path, files: &[&str]) -> SessionState {
        let mut state = SessionState::new(dir, SortBy::Name);
        let intro = Group::new("intro", 1);
        state.groups.push(intro.clone());
        for file in files {
            fs::write(dir.join(file), file.as_bytes()).unwrap();
            state.add_or_update_classification(file, &intro.id);
        }
        state
    }

    #[test]
    fn test_mode_selection_wraps() {
        let temp = TempDir::new().unwrap();
        let state = classified_state(temp.path(), &["a.mp4"]);
        let mut screen = CompleteScreen::new(&state, temp.path().join("out"));

        assert_eq!(screen.mode, ExecutionMode::RenameInPlace);
        screen.handle(Action::Down);
        assert_eq!(screen.mode, ExecutionMode::CopyToDirectory);
        screen.handle(Action::Down);
        assert_eq!(screen.mode, ExecutionMode::RenameInPlace);
        screen.handle(Action::Up);
        assert_eq!(screen.mode, ExecutionMode::CopyToDirectory);
    }

    #[test]
    fn test_conflicts_are_listed_and_truncated() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let files = ["a.mp4", "b.mp4", "c.mp4", "d.mp4", "e.mp4", "f.mp4", "g.mp4"];
        let state = classified_state(dir, &files);
        for take in 1..=7 {
            fs::write(dir.join(format!("[01_{:02}] intro.mp4", take)), b"x").unwrap();
        }

        let screen = CompleteScreen::new(&state, dir.join("out"));
        let text = screen.render();

        assert_eq!(screen.conflicts.len(), 7);
        assert!(text.contains("Warning: 7 target file(s) already exist"));
        assert!(text.contains("  [01_05] intro.mp4\n"));
        assert!(!text.contains("  [01_06] intro.mp4\n"));
        assert!(text.contains("... and 2 more"));
    }

    #[test]
    fn test_execute_records_success_then_any_key_quits() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let state = classified_state(dir, &["a.mp4", "b.mp4"]);
        let mut screen = CompleteScreen::new(&state, dir.join("out"));

        assert_eq!(screen.handle(Action::Confirm), Transition::Execute);
        screen.execute();

        assert_eq!(
            screen.outcome,
            Some(ExecutionOutcome::Succeeded {
                mode: ExecutionMode::RenameInPlace,
                changed: 2
            })
        );
        assert!(dir.join("[01_02] intro.mp4").exists());
        let text = screen.render();
        assert!(text.contains("Files changed: 2"));
        assert_eq!(screen.handle(Action::Up), Transition::Quit);
    }

    #[test]
    fn test_execute_records_failure() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let state = classified_state(dir, &["a.mp4"]);
        fs::remove_file(dir.join("a.mp4")).unwrap();

        let mut screen = CompleteScreen::new(&state, dir.join("out"));
        screen.execute();

        let text = screen.render();
        assert!(matches!(screen.outcome, Some(ExecutionOutcome::Failed { .. })));
        assert!(text.contains("Rename in place failed"));
        assert!(text.contains("item 0"));
    }

    #[test]
    fn test_cancel_before_execution_returns_to_review() {
        let temp = TempDir::new().unwrap();
        let state = classified_state(temp.path(), &[]);
        let mut screen = CompleteScreen::new(&state, temp.path().join("out"));
        assert_eq!(screen.handle(Action::Cancel), Transition::BackToReview);
        assert!(screen.render().contains("0 of 0 classified files will change"));
    }
}
