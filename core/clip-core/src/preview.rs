//! Opens a clip in the system's default viewer.
//!
//! The viewer is spawned detached: the engine never waits on it, and its exit
//! status is ignored. A background thread reaps the child so it doesn't linger
//! as a zombie.

use std::path::Path;
use std::process::Command;

use crate::error::{ClipError, Result};

/// Seam for launching an external viewer. Tests substitute a recorder.
pub trait Previewer {
    fn open_file(&self, path: &Path) -> Result<()>;
}

/// Launches `open` (macOS), `cmd /c start` (Windows) or `xdg-open` (elsewhere).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPreviewer;

impl Previewer for SystemPreviewer {
    fn open_file(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(ClipError::Preview("file path cannot be empty".to_string()));
        }
        if !path.exists() {
            return Err(ClipError::Preview(format!(
                "file not found: {}",
                path.display()
            )));
        }

        let (program, args) = preview_command(std::env::consts::OS, path);
        let mut child = Command::new(program)
            .args(&args)
            .spawn()
            .map_err(|e| ClipError::Preview(format!("failed to launch {}: {}", program, e)))?;

        tracing::debug!(program, path = %path.display(), "Preview launched");
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

/// Program and arguments that open `path` on `os` (a `std::env::consts::OS` value).
pub fn preview_command(os: &str, path: &Path) -> (&'static str, Vec<String>) {
    let path = path.to_string_lossy().to_string();
    match os {
        "macos" => ("open", vec![path]),
        // `start` treats its first quoted argument as a window title
        "windows" => (
            "cmd",
            vec!["/c".to_string(), "start".to_string(), String::new(), path],
        ),
        _ => ("xdg-open", vec![path]),
    }
}
