//! # clip-core
//!
//! Session engine for clip-tagger: walks a directory of video clips, lets the
//! user sort each one into named, ordered groups, and renames them to
//! `[GG_TT] <group name>.<ext>` once the session is reviewed.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime. One action is handled at a time.
//! - **Resumable**: All session progress lives in `.clip-tagger-state.json`
//!   next to the clips, saved atomically.
//! - **UI-agnostic**: Screens render to plain text and consume abstract
//!   [`Action`]s. The terminal runtime lives in the `clip-tagger` binary.
//! - **Not transactional**: A rename batch stops at the first failure and
//!   leaves earlier operations applied.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use clip_core::{load_config, Action, SessionEngine, SystemPreviewer};
//!
//! let engine = SessionEngine::new(Path::new("/videos/shoot"), load_config())?;
//! let mut session = engine.open_session(None, Box::new(SystemPreviewer))?;
//! session.handle_action(Action::Confirm);
//! println!("{}", session.render());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod patterns;
pub mod planner;
pub mod preview;
pub mod scanner;
pub mod session;
pub mod state;
pub mod storage;

pub use config::{get_config_path, load_config, load_config_from, ClipConfig};
pub use engine::{render_plan_preview, SessionEngine};
pub use error::{ClipError, Result};
pub use planner::{
    build_plan, count_changes, detect_conflicts, execute_plan, generate_filename, ChangeKind,
    ExecutionMode, PlanItem,
};
pub use preview::{Previewer, SystemPreviewer};
pub use scanner::{scan, ScannedFile};
pub use session::{Action, Screen, ScreenKind, Session};
pub use state::{Classification, Group, MergeReport, SessionState, SortBy, StateStore};
pub use storage::SessionPaths;
