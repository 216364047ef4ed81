//! clip-tagger: classify video clips into ordered groups and rename them.
//!
//! Runs an interactive terminal session over one directory of clips. Progress
//! is saved next to the clips, so quitting and re-running resumes where the
//! session left off.
//!
//! ## One-shot flags
//!
//! - `--reset`: delete the saved session state
//! - `--clean-missing`: drop classifications of files that no longer exist
//! - `--preview`: print the rename plan without touching any file
//!
//! `--reset` and `--clean-missing` exit afterwards unless a later step in
//! that list is also requested.

mod logging;
mod tui;

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clip_core::{load_config, ClipError, SessionEngine, SortBy, SystemPreviewer};
use fs_err as fs;

#[derive(Parser)]
#[command(name = "clip-tagger")]
#[command(about = "Classify video clips into ordered groups and rename them")]
#[command(version)]
struct Cli {
    /// Directory containing the video clips
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// File list order (defaults to the saved order, or modification time)
    #[arg(long, value_enum)]
    sort_by: Option<SortArg>,

    /// Delete the saved session state
    #[arg(long)]
    reset: bool,

    /// Remove classifications whose file no longer exists
    #[arg(long)]
    clean_missing: bool,

    /// Print the rename plan and exit
    #[arg(long)]
    preview: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Name,
    Modified,
    Created,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortBy::Name,
            SortArg::Modified => SortBy::ModifiedTime,
            SortArg::Created => SortBy::CreatedTime,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Session(#[from] ClipError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "clip-tagger failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let directory = fs::canonicalize(&cli.directory)
        .map_err(|_| ClipError::DirectoryNotFound(cli.directory.clone()))?;
    let engine = SessionEngine::new(&directory, load_config())?;
    let sort_override = cli.sort_by.map(SortBy::from);

    if cli.reset {
        engine.reset()?;
        println!("State reset for {}", directory.display());
        if !cli.clean_missing && !cli.preview {
            return Ok(());
        }
    }

    if cli.clean_missing {
        let removed = engine.clean_missing(sort_override)?;
        println!("Cleaned {} missing file(s) from state", removed);
        if !cli.preview {
            return Ok(());
        }
    }

    if cli.preview {
        print!("{}", engine.preview_plan(sort_override)?);
        return Ok(());
    }

    let mut session = engine.open_session(sort_override, Box::new(SystemPreviewer))?;
    tracing::info!(directory = %directory.display(), files = session.files().len(), "Session started");
    tui::run(&mut session)?;
    Ok(())
}
