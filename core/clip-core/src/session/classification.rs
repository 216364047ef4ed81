use std::path::PathBuf;

use crate::state::{Group, SessionState};

use super::{Action, Transition};

const PROGRESS_WIDTH: usize = 40;

/// Group that same-as-previous would assign at `cursor`.
///
/// The most recently used group this session wins; otherwise the group of the
/// nearest classified file before the cursor. Deleted groups are ignored.
pub(crate) fn resolve_previous_group<'a>(
    state: &'a SessionState,
    files: &[String],
    cursor: usize,
    last_group_id: Option<&str>,
) -> Option<&'a Group> {
    if let Some(group) = last_group_id.and_then(|id| state.find_group_by_id(id)) {
        return Some(group);
    }
    files[..cursor.min(files.len())]
        .iter()
        .rev()
        .filter_map(|file| state.get_classification(file))
        .find_map(|c| state.find_group_by_id(&c.group_id))
}

/// Existing assignment of the file on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAssignment {
    pub group_name: String,
    pub order: u32,
    pub take_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationScreen {
    pub index: usize,
    pub total: usize,
    pub file: String,
    pub path: PathBuf,
    pub previous_group: Option<String>,
    pub current: Option<CurrentAssignment>,
    pub skipped: bool,
}

impl ClassificationScreen {
    pub(crate) fn new(
        state: &SessionState,
        files: &[String],
        cursor: usize,
        last_group_id: Option<&str>,
    ) -> Self {
        let file = files.get(cursor).cloned().unwrap_or_default();
        let current = state.get_classification(&file).and_then(|c| {
            let group = state.find_group_by_id(&c.group_id)?;
            Some(CurrentAssignment {
                group_name: group.name.clone(),
                order: group.order,
                take_number: c.take_number,
            })
        });

        Self {
            index: cursor,
            total: files.len(),
            path: state.directory.join(&file),
            previous_group: resolve_previous_group(state, files, cursor, last_group_id)
                .map(|g| g.name.clone()),
            skipped: state.is_skipped(&file),
            current,
            file,
        }
    }

    fn progress_bar(&self) -> String {
        if self.total == 0 {
            return String::new();
        }
        let done = self.index + 1;
        let filled = done * PROGRESS_WIDTH / self.total;
        format!(
            "[{}{}] {}%",
            "=".repeat(filled),
            " ".repeat(PROGRESS_WIDTH - filled),
            done * 100 / self.total
        )
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "=== Classification: File {} of {} ===\n\n",
            self.index + 1,
            self.total
        );
        out.push_str(&format!("File: {}\n", self.file));
        out.push_str(&format!("Path: {}\n\n", self.path.display()));
        out.push_str(&self.progress_bar());
        out.push_str("\n\n");

        if let Some(current) = &self.current {
            out.push_str(&format!(
                "Currently: [{:02}_{:02}] {}\n\n",
                current.order, current.take_number, current.group_name
            ));
        } else if self.skipped {
            out.push_str("Currently: skipped\n\n");
        }

        out.push_str("Actions:\n");
        out.push_str("  [p] Preview file\n");
        match &self.previous_group {
            Some(name) => out.push_str(&format!("  [1] Same as last ({})\n", name)),
            None => out.push_str("  [1] Same as last (none yet)\n"),
        }
        out.push_str("  [2] Choose existing group\n");
        out.push_str("  [3] Create new group\n");
        out.push_str("  [s] Skip this file\n");
        out.push_str("  [Up/Down] Previous / next file\n");
        out.push_str("  [q] Quit\n");
        out
    }

    pub fn handle(&mut self, action: Action) -> Transition {
        match action {
            Action::SameAsPrevious => Transition::ClassifySameAsPrevious,
            Action::OpenGroupPicker => Transition::OpenGroupPicker,
            Action::OpenGroupCreator => Transition::OpenGroupCreator,
            Action::Skip => Transition::SkipCurrent,
            Action::Preview => Transition::PreviewCurrent,
            Action::Up => Transition::BrowsePrevious,
            Action::Down => Transition::BrowseNext,
            Action::Quit => Transition::Quit,
            _ => Transition::Stay,
        }
    }
}
