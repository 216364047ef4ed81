use crate::state::{MergeReport, SessionState, SortBy};

use super::{Action, Transition};

/// Session summary shown before classification begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupScreen {
    pub resumed: bool,
    pub total_files: usize,
    pub classified: usize,
    pub remaining: usize,
    pub new_files: usize,
    pub missing_files: usize,
    pub sort_by: SortBy,
}

impl StartupScreen {
    pub(crate) fn new(state: &SessionState, files: &[String], merge: Option<&MergeReport>) -> Self {
        let classified = files.iter().filter(|f| state.is_classified(f)).count();
        Self {
            resumed: merge.is_some(),
            total_files: files.len(),
            classified,
            remaining: files.len() - classified,
            new_files: merge.map_or(0, |m| m.new_files.len()),
            missing_files: merge.map_or(0, |m| m.missing_files.len()),
            sort_by: state.sort_by,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("=== Clip Tagger ===\n\n");

        if self.resumed {
            out.push_str("Resuming previous session\n\n");
            out.push_str(&format!("  Classified: {} files\n", self.classified));
            out.push_str(&format!("  Remaining:  {} files\n", self.remaining));
            if self.new_files > 0 {
                out.push_str(&format!("  New files:  {}\n", self.new_files));
            }
            if self.missing_files > 0 {
                out.push_str(&format!("  Missing:    {} files\n", self.missing_files));
            }
        } else {
            out.push_str("Starting new session\n\n");
        }

        out.push_str(&format!("\n  Total files: {}\n", self.total_files));
        out.push_str(&format!("  Sort order:  {}\n", self.sort_by));
        out.push_str("\n[Enter] Continue  [q] Quit\n");
        out
    }

    pub fn handle(&mut self, action: Action) -> Transition {
        match action {
            Action::Confirm => Transition::BeginClassification,
            Action::Quit => Transition::Quit,
            _ => Transition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Group;
    use std::path::Path;

    fn files(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_session_summary() {
        let state = SessionState::new(Path::new("/clips"), SortBy::Name);
        let screen = StartupScreen::new(&state, &files(&["a.mp4", "b.mp4"]), None);

        assert!(!screen.resumed);
        assert_eq!(screen.remaining, 2);
        let text = screen.render();
        assert!(text.contains("Starting new session"));
        assert!(text.contains("Total files: 2"));
        assert!(text.contains("Sort order:  name"));
    }

    #[test]
    fn test_resumed_session_counts() {
        let mut state = SessionState::new(Path::new("/clips"), SortBy::ModifiedTime);
        let group = Group::new("intro", 1);
        state.groups.push(group.clone());
        state.add_or_update_classification("a.mp4", &group.id);
        state.add_or_update_classification("gone.mp4", &group.id);
        let merge = MergeReport {
            new_files: files(&["b.mp4", "c.mp4"]),
            missing_files: files(&["gone.mp4"]),
            existing_count: 1,
        };

        let screen = StartupScreen::new(&state, &files(&["a.mp4", "b.mp4", "c.mp4"]), Some(&merge));

        assert_eq!(screen.classified, 1);
        assert_eq!(screen.remaining, 2);
        let text = screen.render();
        assert!(text.contains("Resuming previous session"));
        assert!(text.contains("New files:  2"));
        assert!(text.contains("Missing:    1 files"));
    }

    #[test]
    fn test_handle_actions() {
        let state = SessionState::new(Path::new("/clips"), SortBy::Name);
        let mut screen = StartupScreen::new(&state, &[], None);
        assert_eq!(screen.handle(Action::Confirm), Transition::BeginClassification);
        assert_eq!(screen.handle(Action::Quit), Transition::Quit);
        assert_eq!(screen.handle(Action::Skip), Transition::Stay);
    }
}
