use crate::planner::{build_plan, ChangeKind};
use crate::state::SessionState;

use super::list::ListCursor;
use super::{Action, Transition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewEntry {
    Rename {
        original: String,
        target: String,
        change: ChangeKind,
    },
    Skipped(String),
}

impl ReviewEntry {
    fn line(&self) -> String {
        match self {
            ReviewEntry::Rename {
                original,
                target,
                change,
            } => match change.label() {
                Some(label) => format!("{} -> {} [{}]", original, target, label),
                None => format!("{} -> {}", original, target),
            },
            ReviewEntry::Skipped(file) => format!("{} [SKIPPED]", file),
        }
    }
}

/// Every planned rename followed by every skipped file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewScreen {
    pub entries: Vec<ReviewEntry>,
    pub classified: usize,
    pub skipped: usize,
    cursor: ListCursor,
}

impl ReviewScreen {
    pub(crate) fn new(state: &SessionState, viewport: usize) -> Self {
        let mut entries: Vec<ReviewEntry> = build_plan(state)
            .iter()
            .map(|item| ReviewEntry::Rename {
                original: item.original_name(),
                target: item.target_name(),
                change: item.change_kind(),
            })
            .collect();
        let classified = entries.len();
        entries.extend(state.skipped.iter().cloned().map(ReviewEntry::Skipped));

        Self {
            entries,
            classified,
            skipped: state.skipped.len(),
            cursor: ListCursor::new(viewport),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("=== Review Classifications ===\n\n");
        out.push_str(&format!(
            "Classified: {}  Skipped: {}\n\n",
            self.classified, self.skipped
        ));

        if self.entries.is_empty() {
            out.push_str("Nothing classified yet.\n");
        } else {
            self.cursor.render_rows(&mut out, &self.entries, |entry, selected| {
                format!("{}{}", if selected { "> " } else { "  " }, entry.line())
            });
        }

        out.push_str("\n[Up/Down] Scroll  [Enter] Continue  [Esc] Back to classification  [q] Quit\n");
        out
    }

    pub fn handle(&mut self, action: Action) -> Transition {
        match action {
            Action::Up => self.cursor.up(),
            Action::Down => self.cursor.down(self.entries.len()),
            Action::Confirm => return Transition::OpenCompletion,
            Action::Cancel => return Transition::RestartClassification,
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
    use std::path::Path;

    fn sample_state() -> SessionState {
        let mut state = SessionState::new(Path::new("/clips"), SortBy::Name);
        let intro = Group::new("intro", 1);
        let outro = Group::new("outro", 2);
        state.groups = vec![intro.clone(), outro.clone()];
        state.add_or_update_classification("a.mp4", &intro.id);
        state.add_or_update_classification("[01_01] intro.mp4", &intro.id);
        state.add_or_update_classification("[01_05] old.mp4", &outro.id);
        state.skip_file("junk.mp4");
        state
    }

    #[test]
    fn test_entries_tag_change_kinds_and_skips() {
        let screen = ReviewScreen::new(&sample_state(), 10);
        let text = screen.render();

        assert_eq!(screen.classified, 3);
        assert_eq!(screen.skipped, 1);
        assert!(text.contains("a.mp4 -> [01_01] intro.mp4 [new]"));
        assert!(text.contains("[01_01] intro.mp4 -> [01_02] intro.mp4 [updated]"));
        assert!(text.contains("[01_05] old.mp4 -> [02_01] outro.mp4 [moved]"));
        assert!(text.contains("junk.mp4 [SKIPPED]"));
    }

    #[test]
    fn test_unchanged_entry_has_no_tag() {
        let mut state = SessionState::new(Path::new("/clips"), SortBy::Name);
        let intro = Group::new("intro", 1);
        state.groups.push(intro.clone());
        state.add_or_update_classification("[01_01] intro.mp4", &intro.id);

        let screen = ReviewScreen::new(&state, 10);
        assert_eq!(
            screen.entries[0].line(),
            "[01_01] intro.mp4 -> [01_01] intro.mp4"
        );
    }

    #[test]
    fn test_handle_transitions() {
        let mut screen = ReviewScreen::new(&sample_state(), 2);
        assert_eq!(screen.handle(Action::Down), Transition::Stay);
        assert_eq!(screen.handle(Action::Confirm), Transition::OpenCompletion);
        assert_eq!(screen.handle(Action::Cancel), Transition::RestartClassification);
        assert_eq!(screen.handle(Action::Quit), Transition::Quit);
    }

    #[test]
    fn test_empty_review() {
        let state = SessionState::new(Path::new("/clips"), SortBy::Name);
        let screen = ReviewScreen::new(&state, 10);
        assert!(screen.render().contains("Nothing classified yet."));
    }
}
