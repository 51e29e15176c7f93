//! Application configuration constants
//!
//! Central location for file locations, placeholder strings and display
//! limits used throughout the application.

use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ===== Storage Location =====

/// Subdirectory of the per-user data directory that holds our files
pub const APP_DIR_NAME: &str = "MelancholyNotes";

/// Database file name inside [`APP_DIR_NAME`]
pub const DB_FILE_NAME: &str = "notes.db";

/// How long a statement waits on a locked database file before failing
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ===== Placeholders =====

/// Title given to a freshly created, still empty note
pub const NEW_NOTE_TITLE: &str = "New note";

/// Title stored in place of a blank or whitespace-only title
pub const UNTITLED_TITLE: &str = "Untitled";

/// Preview shown for a note whose content is blank
pub const EMPTY_PREVIEW: &str = "Empty note";

// ===== Display Limits =====

/// Number of characters of content shown in a preview
pub const PREVIEW_CHARS: usize = 60;

/// Marker appended to a preview when the content was cut short
pub const PREVIEW_ELLIPSIS: &str = "...";

// ===== Logging =====

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "melancholy_notes=debug,info";

/// Resolve `<per-user data dir>/MelancholyNotes`.
pub fn default_app_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(AppError::DataDirUnavailable)
}

/// Path of the notes database inside an application data directory.
pub fn database_path(app_data_dir: &Path) -> PathBuf {
    app_data_dir.join(DB_FILE_NAME)
}
