//! The interactive session state machine.
//!
//! [`Session`] owns the [`SessionState`], the scanned file list and exactly one
//! [`Screen`]. Each screen is a plain data struct with a pure `render` and a
//! `handle(action) -> Transition`; the session applies the returned
//! [`Transition`], which is the only place state is mutated or saved.
//!
//! Raw key events never reach this module. The terminal runtime maps keys to
//! [`Action`]s and redraws from [`Session::render`].
//!
//! # Autosave
//!
//! State is written through the [`StateStore`]:
//! - after every group pick or group creation,
//! - whenever the session leaves the Classification screen (including quit),
//! - after every `autosave_interval` same-as-previous / skip actions.
//!
//! A failed save becomes the display message; the session keeps running.
//!
//! # Module Structure
//!
//! - [`startup`], [`classification`], [`group_selection`], [`group_insertion`],
//!   [`review`], [`complete`]: one module per screen
//! - `list`: shared selection + scroll viewport

pub mod classification;
pub mod complete;
pub mod group_insertion;
pub mod group_selection;
mod list;
pub mod review;
pub mod startup;

use std::fmt;

use crate::config::ClipConfig;
use crate::preview::Previewer;
use crate::state::{Group, MergeReport, SessionState, StateStore};

pub use classification::ClassificationScreen;
pub use complete::{CompleteScreen, ExecutionOutcome};
pub use group_insertion::{GroupInsertionScreen, InsertionPhase};
pub use group_selection::GroupSelectionScreen;
pub use review::{ReviewEntry, ReviewScreen};
pub use startup::StartupScreen;

use classification::resolve_previous_group;

/// Abstract user input. The runtime decides which keys produce which action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Confirm,
    Cancel,
    Quit,
    Up,
    Down,
    Backspace,
    Input(char),
    SameAsPrevious,
    OpenGroupPicker,
    OpenGroupCreator,
    Skip,
    Preview,
}

/// What a screen asks the session to do after handling an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Quit,
    BeginClassification,
    ClassifySameAsPrevious,
    SkipCurrent,
    PreviewCurrent,
    BrowsePrevious,
    BrowseNext,
    OpenGroupPicker,
    OpenGroupCreator,
    PickGroup(String),
    CreateGroup { name: String, order: u32 },
    ReturnToClassification,
    OpenCompletion,
    RestartClassification,
    BackToReview,
    Execute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Startup,
    Classification,
    GroupSelection,
    GroupInsertion,
    Review,
    Complete,
}

impl ScreenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenKind::Startup => "startup",
            ScreenKind::Classification => "classification",
            ScreenKind::GroupSelection => "group_selection",
            ScreenKind::GroupInsertion => "group_insertion",
            ScreenKind::Review => "review",
            ScreenKind::Complete => "complete",
        }
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active screen and the data only it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Startup(StartupScreen),
    Classification(ClassificationScreen),
    GroupSelection(GroupSelectionScreen),
    GroupInsertion(GroupInsertionScreen),
    Review(ReviewScreen),
    Complete(CompleteScreen),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Startup(_) => ScreenKind::Startup,
            Screen::Classification(_) => ScreenKind::Classification,
            Screen::GroupSelection(_) => ScreenKind::GroupSelection,
            Screen::GroupInsertion(_) => ScreenKind::GroupInsertion,
            Screen::Review(_) => ScreenKind::Review,
            Screen::Complete(_) => ScreenKind::Complete,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Screen::Startup(s) => s.render(),
            Screen::Classification(s) => s.render(),
            Screen::GroupSelection(s) => s.render(),
            Screen::GroupInsertion(s) => s.render(),
            Screen::Review(s) => s.render(),
            Screen::Complete(s) => s.render(),
        }
    }

    pub fn handle(&mut self, action: Action) -> Transition {
        match self {
            Screen::Startup(s) => s.handle(action),
            Screen::Classification(s) => s.handle(action),
            Screen::GroupSelection(s) => s.handle(action),
            Screen::GroupInsertion(s) => s.handle(action),
            Screen::Review(s) => s.handle(action),
            Screen::Complete(s) => s.handle(action),
        }
    }

    /// True while printable keys are typed text rather than shortcuts.
    pub fn accepts_text(&self) -> bool {
        match self {
            Screen::GroupSelection(_) => true,
            Screen::GroupInsertion(s) => s.phase == InsertionPhase::NameEntry,
            _ => false,
        }
    }
}

pub struct Session {
    state: SessionState,
    files: Vec<String>,
    screen: Screen,
    store: StateStore,
    config: ClipConfig,
    previewer: Box<dyn Previewer>,
    last_group_id: Option<String>,
    actions_since_save: usize,
    message: Option<String>,
    quit: bool,
}

impl Session {
    /// Starts on the Startup screen. `merge` is present when resuming.
    pub fn new(
        state: SessionState,
        files: Vec<String>,
        merge: Option<MergeReport>,
        store: StateStore,
        config: ClipConfig,
        previewer: Box<dyn Previewer>,
    ) -> Self {
        let screen = Screen::Startup(StartupScreen::new(&state, &files, merge.as_ref()));
        Self {
            state,
            files,
            screen,
            store,
            config,
            previewer,
            last_group_id: None,
            actions_since_save: 0,
            message: None,
            quit: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn cursor(&self) -> usize {
        self.state.current_index
    }

    /// Advisory or error text from the last action, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn accepts_text(&self) -> bool {
        self.screen.accepts_text()
    }

    /// Current screen text, with any message appended.
    pub fn render(&self) -> String {
        let mut out = self.screen.render();
        if let Some(message) = &self.message {
            out.push_str(&format!("\n! {}\n", message));
        }
        out
    }

    pub fn handle_action(&mut self, action: Action) {
        if self.quit {
            return;
        }
        self.message = None;
        let transition = self.screen.handle(action);
        self.apply(transition);
    }

    fn apply(&mut self, transition: Transition) {
        let from = self.screen.kind();
        match transition {
            Transition::Stay => {}
            Transition::Quit => {
                if from == ScreenKind::Classification {
                    self.autosave();
                }
                tracing::debug!(screen = %from, "Session quit");
                self.quit = true;
            }
            Transition::BeginClassification => self.begin_classification(),
            Transition::ClassifySameAsPrevious => self.classify_same_as_previous(),
            Transition::SkipCurrent => self.skip_current(),
            Transition::PreviewCurrent => self.preview_current(),
            Transition::BrowsePrevious => {
                if self.state.current_index > 0 {
                    self.state.current_index -= 1;
                    self.show_classification();
                }
            }
            Transition::BrowseNext => {
                if self.state.current_index + 1 < self.files.len() {
                    self.state.current_index += 1;
                    self.show_classification();
                }
            }
            Transition::OpenGroupPicker => {
                if let Some(file) = self.current_file() {
                    let screen = GroupSelectionScreen::new(
                        &file,
                        &self.state.groups,
                        self.config.viewport_height,
                    );
                    self.autosave();
                    self.screen = Screen::GroupSelection(screen);
                }
            }
            Transition::OpenGroupCreator => {
                if let Some(file) = self.current_file() {
                    let screen = GroupInsertionScreen::new(&file, &self.state.groups);
                    self.autosave();
                    self.screen = Screen::GroupInsertion(screen);
                }
            }
            Transition::PickGroup(group_id) => self.pick_group(&group_id),
            Transition::CreateGroup { name, order } => self.create_group(&name, order),
            Transition::ReturnToClassification => self.show_classification(),
            Transition::OpenCompletion => {
                let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
                let output_dir = self
                    .store
                    .paths()
                    .output_dir(&self.config.output_dir_prefix, &timestamp);
                self.screen = Screen::Complete(CompleteScreen::new(&self.state, output_dir));
            }
            Transition::RestartClassification => {
                if self.files.is_empty() {
                    self.message = Some("No files to classify".to_string());
                } else {
                    self.state.current_index = 0;
                    self.show_classification();
                }
            }
            Transition::BackToReview => self.show_review(),
            Transition::Execute => {
                if let Screen::Complete(screen) = &mut self.screen {
                    screen.execute();
                }
            }
        }

        let to = self.screen.kind();
        if to != from {
            tracing::debug!(from = %from, to = %to, cursor = self.state.current_index, "Screen changed");
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Cursor
    // ─────────────────────────────────────────────────────────────────────

    fn current_file(&self) -> Option<String> {
        self.files.get(self.state.current_index).cloned()
    }

    fn first_unclassified_from(&self, start: usize) -> Option<usize> {
        (start..self.files.len()).find(|&i| !self.state.is_classified(&self.files[i]))
    }

    /// Seeks from the persisted cursor to the first unclassified file,
    /// wrapping to the start once. Goes to Review if everything is classified.
    fn begin_classification(&mut self) {
        let start = self.state.current_index.min(self.files.len());
        match self
            .first_unclassified_from(start)
            .or_else(|| self.first_unclassified_from(0))
        {
            Some(index) => {
                self.state.current_index = index;
                self.show_classification();
            }
            None => {
                self.state.current_index = self.files.len();
                self.show_review();
            }
        }
    }

    /// Moves past the current file and any already-classified files.
    /// Returns whether an unclassified file remains ahead.
    fn advance_cursor(&mut self) -> bool {
        let next = self
            .first_unclassified_from(self.state.current_index + 1)
            .unwrap_or(self.files.len());
        self.state.current_index = next;
        next < self.files.len()
    }

    /// Shows Classification at the cursor, or Review past the end.
    fn show_next(&mut self) {
        if self.state.current_index < self.files.len() {
            self.show_classification();
        } else {
            self.show_review();
        }
    }

    fn show_classification(&mut self) {
        self.screen = Screen::Classification(ClassificationScreen::new(
            &self.state,
            &self.files,
            self.state.current_index,
            self.last_group_id.as_deref(),
        ));
    }

    fn show_review(&mut self) {
        self.screen = Screen::Review(ReviewScreen::new(&self.state, self.config.viewport_height));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Classification actions
    // ─────────────────────────────────────────────────────────────────────

    fn classify_current(&mut self, group_id: &str) {
        if let Some(file) = self.current_file() {
            self.state.add_or_update_classification(&file, group_id);
            self.last_group_id = Some(group_id.to_string());
            tracing::debug!(file = %file, group_id, "File classified");
        }
    }

    /// Shared tail of same-as-previous and skip.
    fn finish_quick_action(&mut self) {
        if self.advance_cursor() {
            self.show_classification();
            self.actions_since_save += 1;
            if self.actions_since_save >= self.config.autosave_interval {
                self.autosave();
            }
        } else {
            self.autosave();
            self.show_review();
        }
    }

    fn classify_same_as_previous(&mut self) {
        let group_id = resolve_previous_group(
            &self.state,
            &self.files,
            self.state.current_index,
            self.last_group_id.as_deref(),
        )
        .map(|g| g.id.clone());

        let Some(group_id) = group_id else {
            self.message = Some("No previous group to reuse".to_string());
            return;
        };
        if self.current_file().is_none() {
            return;
        }
        self.classify_current(&group_id);
        self.finish_quick_action();
    }

    fn skip_current(&mut self) {
        let Some(file) = self.current_file() else {
            return;
        };
        self.state.skip_file(&file);
        tracing::debug!(file = %file, "File skipped");
        self.finish_quick_action();
    }

    fn preview_current(&mut self) {
        let Some(file) = self.current_file() else {
            return;
        };
        let path = self.state.directory.join(&file);
        if let Err(e) = self.previewer.open_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "Preview failed");
            self.message = Some(e.to_string());
        }
    }

    fn pick_group(&mut self, group_id: &str) {
        if self.state.find_group_by_id(group_id).is_none() {
            self.show_classification();
            return;
        }
        self.classify_current(group_id);
        self.advance_cursor();
        self.autosave();
        self.show_next();
    }

    fn create_group(&mut self, name: &str, order: u32) {
        let group = Group::new(name, order);
        let group_id = group.id.clone();
        self.state.insert_group_at_position(group, order);
        tracing::info!(name, order, "Group created");
        self.classify_current(&group_id);
        self.advance_cursor();
        self.autosave();
        self.show_next();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────

    fn autosave(&mut self) {
        self.actions_since_save = 0;
        if let Err(e) = self.store.save(&self.state) {
            tracing::warn!(error = %e, "Autosave failed");
            self.message = Some(format!("Failed to save state: {}", e));
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("screen", &self.screen.kind())
            .field("cursor", &self.state.current_index)
            .field("files", &self.files.len())
            .field("quit", &self.quit)
            .finish()
    }
}
