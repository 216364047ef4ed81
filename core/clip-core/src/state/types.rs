//! Classification data model.
//!
//! [`SessionState`] is the single source of truth for a session: every other
//! component reads and mutates it directly, and it is the unit of persistence.
//!
//! Invariants maintained here:
//! - Group `order` values are always the dense sequence `1..=N` in list order.
//! - At most one [`Classification`] exists per filename.
//! - A file is never both classified and skipped.
//! - Take numbers are assigned as `max + 1` per group and are never renumbered,
//!   so gaps may appear after a file is reclassified away.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How the scanned file list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    ModifiedTime,
    CreatedTime,
    Name,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::ModifiedTime => "modified_time",
            SortBy::CreatedTime => "created_time",
            SortBy::Name => "name",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, ordered bucket that files are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Generated once, never reused. The only identifier stable across renames.
    pub id: String,
    pub name: String,
    /// 1-based position among all groups.
    pub order: u32,
}

impl Group {
    pub fn new(name: &str, order: u32) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            name: name.to_string(),
            order,
        }
    }
}

/// Assignment of one file (by name, relative to the session directory) to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub file: String,
    pub group_id: String,
    pub take_number: u32,
}

/// The complete persisted record of a classification session for one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub directory: PathBuf,
    pub sort_by: SortBy,
    /// Resume cursor: index into the scanned file list.
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    #[serde(default)]
    pub skipped: Vec<String>,
}

impl SessionState {
    pub fn new(directory: &Path, sort_by: SortBy) -> Self {
        Self {
            directory: directory.to_path_buf(),
            sort_by,
            current_index: 0,
            groups: Vec::new(),
            classifications: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn find_group_by_id(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn get_classification(&self, file: &str) -> Option<&Classification> {
        self.classifications.iter().find(|c| c.file == file)
    }

    pub fn is_classified(&self, file: &str) -> bool {
        self.get_classification(file).is_some()
    }

    pub fn is_skipped(&self, file: &str) -> bool {
        self.skipped.iter().any(|s| s == file)
    }

    /// Returns `max(take_number) + 1` over the group's classifications, or 1.
    pub fn next_take_number(&self, group_id: &str) -> u32 {
        self.classifications
            .iter()
            .filter(|c| c.group_id == group_id)
            .map(|c| c.take_number)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Classifies `file` into `group_id`, replacing any earlier classification.
    ///
    /// The prior classification is removed before the take number is computed,
    /// so reclassifying the highest take of a group into the same group reuses
    /// that number. Also clears the file from the skipped list.
    pub fn add_or_update_classification(&mut self, file: &str, group_id: &str) {
        self.classifications.retain(|c| c.file != file);
        self.skipped.retain(|s| s != file);

        let take_number = self.next_take_number(group_id);
        self.classifications.push(Classification {
            file: file.to_string(),
            group_id: group_id.to_string(),
            take_number,
        });
    }

    /// Defers `file`: drops any classification and records it once in `skipped`.
    pub fn skip_file(&mut self, file: &str) {
        self.classifications.retain(|c| c.file != file);
        if !self.is_skipped(file) {
            self.skipped.push(file.to_string());
        }
    }

    /// Inserts `group` at the list position implied by `order`, then renumbers
    /// every group to `1..=N` in list order.
    ///
    /// The position is the first group whose current order is `>= order`, or the
    /// end of the list. Out-of-range orders (0, or beyond N + 1) clamp to the
    /// front and back respectively.
    pub fn insert_group_at_position(&mut self, group: Group, order: u32) {
        let index = self
            .groups
            .iter()
            .position(|g| g.order >= order)
            .unwrap_or(self.groups.len());

        self.groups.insert(index, group);
        self.renumber_groups();
    }

    fn renumber_groups(&mut self) {
        for (i, group) in self.groups.iter_mut().enumerate() {
            group.order = i as u32 + 1;
        }
    }
}
