//! Source validation run before a telemetry file is opened.
//!
//! Empty files are valid input (they parse to an empty table), so unlike a
//! viewer this only checks that the path names a readable regular file.

use crate::error::{Result, TelelogError};
use std::fs::File;
use std::path::Path;

/// Validate that a file path is accessible and suitable for parsing
///
/// # Validations Performed
/// - Path exists
/// - Path is a regular file (not a directory)
/// - File can be opened by the current process
///
/// # Error Cases
/// - `IoUnavailable` when the path is missing or cannot be opened
/// - `NotAFile` when the path points to a directory or other non-file
pub fn validate_file_path(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| TelelogError::unavailable(path, e))?;

    if !metadata.is_file() {
        return Err(TelelogError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    // Try to open the file to verify read permissions
    File::open(path).map_err(|e| TelelogError::unavailable(path, e))?;

    Ok(())
}
