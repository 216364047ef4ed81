use crate::state::Group;

use super::list::ListCursor;
use super::{Action, Transition};

/// Filterable list of existing groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSelectionScreen {
    pub file: String,
    pub filter: String,
    groups: Vec<Group>,
    filtered: Vec<Group>,
    cursor: ListCursor,
}

impl GroupSelectionScreen {
    pub(crate) fn new(file: &str, groups: &[Group], viewport: usize) -> Self {
        Self {
            file: file.to_string(),
            filter: String::new(),
            groups: groups.to_vec(),
            filtered: groups.to_vec(),
            cursor: ListCursor::new(viewport),
        }
    }

    /// Groups matching the current filter, in group order.
    pub fn filtered(&self) -> &[Group] {
        &self.filtered
    }

    pub fn selected(&self) -> Option<&Group> {
        self.filtered.get(self.cursor.selected)
    }

    fn apply_filter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.filtered = self
            .groups
            .iter()
            .filter(|g| needle.is_empty() || g.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        self.cursor.reset();
    }

    pub fn render(&self) -> String {
        let mut out = String::from("=== Select Group ===\n\n");
        out.push_str(&format!("File: {}\n\n", self.file));
        out.push_str(&format!("Filter: {}_\n\n", self.filter));

        if self.groups.is_empty() {
            out.push_str("No groups yet. Press [Esc] and create one.\n");
        } else if self.filtered.is_empty() {
            out.push_str("No groups match the filter.\n");
        } else {
            self.cursor.render_rows(&mut out, &self.filtered, |group, selected| {
                format!(
                    "{}[{:02}] {}",
                    if selected { "> " } else { "  " },
                    group.order,
                    group.name
                )
            });
        }

        out.push_str("\n[Up/Down] Navigate  [Enter] Select  [Esc] Cancel  Type to filter\n");
        out
    }

    pub fn handle(&mut self, action: Action) -> Transition {
        match action {
            Action::Up => self.cursor.up(),
            Action::Down => self.cursor.down(self.filtered.len()),
            Action::Input(c) if !c.is_control() => {
                self.filter.push(c);
                self.apply_filter();
            }
            Action::Backspace => {
                if self.filter.pop().is_some() {
                    self.apply_filter();
                }
            }
            Action::Confirm => {
                if let Some(group) = self.selected() {
                    return Transition::PickGroup(group.id.clone());
                }
            }
            Action::Cancel => return Transition::ReturnToClassification,
            Action::Quit => return Transition::Quit,
            _ => {}
        }
        Transition::Stay
    }
}
