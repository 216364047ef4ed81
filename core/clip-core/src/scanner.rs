//! Directory scanning for video files.
//!
//! Lists regular files directly inside the session directory (no recursion)
//! whose extension is a known video type, then orders them by the session's
//! [`SortBy`]. Entries are read in name order and sorted with a stable sort,
//! so files with equal timestamps always come back in the same order.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::error::{ClipError, Result};
use crate::state::SortBy;

/// Extensions treated as video, compared case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "avi", "mkv", "webm"];

/// A video file found by [`scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
    /// Creation time, or the modification time where the platform has none.
    pub created: SystemTime,
}

pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Scans `directory` for video files ordered by `sort_by`.
///
/// Files that cannot be stat'ed, or whose names are not valid UTF-8, are
/// skipped. Failing to read the directory
/// itself is an error.
pub fn scan(directory: &Path, sort_by: SortBy) -> Result<Vec<ScannedFile>> {
    if !directory.is_dir() {
        return Err(ClipError::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ClipError::Io {
                    context: format!("reading directory {}", directory.display()),
                    source: e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
                    }),
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_video_file(entry.path()) {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %entry.path().display(), "Skipping non-UTF-8 file name");
            continue;
        };
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        let created = metadata.created().unwrap_or(modified);

        files.push(ScannedFile {
            name,
            path: entry.path().to_path_buf(),
            modified,
            created,
        });
    }

    sort_files(&mut files, sort_by);
    tracing::debug!(
        directory = %directory.display(),
        count = files.len(),
        sort_by = %sort_by,
        "Directory scanned"
    );
    Ok(files)
}

fn sort_files(files: &mut [ScannedFile], sort_by: SortBy) {
    match sort_by {
        SortBy::Name => files.sort_by(|a, b| a.name.cmp(&b.name)),
        SortBy::ModifiedTime => files.sort_by_key(|f| f.modified),
        SortBy::CreatedTime => files.sort_by_key(|f| f.created),
    }
}

/// Names of the scanned files, in scan order.
pub fn file_names(files: &[ScannedFile]) -> Vec<String> {
    files.iter().map(|f| f.name.clone()).collect()
}
