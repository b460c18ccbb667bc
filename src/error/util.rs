//! Utility functions for error handling
//!
//! File helpers that turn filesystem failures into the right `DashboardError`.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::error::{DashboardError, Result};

/// Safely open a file with rich error information
///
/// A path that does not exist (or is not a regular file) becomes
/// `MissingInputFile`; every other failure is reported as `Io` with `purpose`
/// as context.
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(DashboardError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }

    fs::File::open(path).map_err(|e| match e.kind() {
        // Deleted between the check and the open
        io::ErrorKind::NotFound => DashboardError::MissingInputFile {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => {
            DashboardError::io(format!("Permission denied opening {purpose}"), e)
        }
        _ => DashboardError::io(format!("Failed to open file for: {purpose}"), e),
    })
}

/// Modification time of a file, or `MissingInputFile` when it is absent
pub fn modified_time(path: &Path) -> Result<SystemTime> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DashboardError::MissingInputFile {
            path: path.to_path_buf(),
        },
        _ => DashboardError::io(format!("Failed to stat {}", path.display()), e),
    })?;

    if !metadata.is_file() {
        return Err(DashboardError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }

    metadata
        .modified()
        .map_err(|e| DashboardError::io("Modification time unavailable", e))
}
