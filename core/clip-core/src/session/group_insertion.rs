use crate::state::Group;

use super::{Action, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPhase {
    NameEntry,
    PositionSelection,
}

/// Two-step creation of a new group: name, then where it goes.
///
/// Position `0` is before the first group and `N` is after the last; the new
/// group's order is `position + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInsertionScreen {
    pub file: String,
    pub phase: InsertionPhase,
    pub name: String,
    pub position: usize,
    existing: Vec<Group>,
}

impl GroupInsertionScreen {
    pub(crate) fn new(file: &str, groups: &[Group]) -> Self {
        Self {
            file: file.to_string(),
            phase: InsertionPhase::NameEntry,
            name: String::new(),
            position: 0,
            existing: groups.to_vec(),
        }
    }

    fn create(&self) -> Transition {
        Transition::CreateGroup {
            name: self.name.trim().to_string(),
            order: self.position as u32 + 1,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("=== Create New Group ===\n\n");
        out.push_str(&format!("File: {}\n\n", self.file));

        match self.phase {
            InsertionPhase::NameEntry => {
                out.push_str(&format!("Group name: {}_\n", self.name));
                out.push_str("\n[Enter] Continue  [Esc] Cancel\n");
            }
            InsertionPhase::PositionSelection => {
                out.push_str(&format!("Group name: {}\n\n", self.name.trim()));
                out.push_str("Insert position:\n");
                let marker = |pos: usize| if pos == self.position { "> " } else { "  " };
                for (i, group) in self.existing.iter().enumerate() {
                    out.push_str(&format!("{}(insert here)\n", marker(i)));
                    out.push_str(&format!("    [{:02}] {}\n", group.order, group.name));
                }
                out.push_str(&format!("{}(insert here)\n", marker(self.existing.len())));
                out.push_str("\n[Up/Down] Move  [Enter] Create  [Esc] Back\n");
            }
        }
        out
    }

    pub fn handle(&mut self, action: Action) -> Transition {
        match self.phase {
            InsertionPhase::NameEntry => match action {
                // Names become part of a filename
                Action::Input(c) if !c.is_control() && c != '/' && c != '\\' => {
                    self.name.push(c);
                }
                Action::Backspace => {
                    self.name.pop();
                }
                Action::Confirm if !self.name.trim().is_empty() => {
                    if self.existing.is_empty() {
                        return self.create();
                    }
                    self.phase = InsertionPhase::PositionSelection;
                    self.position = self.existing.len();
                }
                Action::Cancel => return Transition::ReturnToClassification,
                Action::Quit => return Transition::Quit,
                _ => {}
            },
            InsertionPhase::PositionSelection => match action {
                Action::Up => self.position = self.position.saturating_sub(1),
                Action::Down => self.position = (self.position + 1).min(self.existing.len()),
                Action::Confirm => return self.create(),
                Action::Cancel => self.phase = InsertionPhase::NameEntry,
                Action::Quit => return Transition::Quit,
                _ => {}
            },
        }
        Transition::Stay
    }
}
