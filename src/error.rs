//! Error types for archscan.
//!
//! Only [`ScanError::PathNotFound`] aborts a scan. Per-file read failures
//! are downgraded to skips by the orchestrator, invalid rule expressions
//! are discarded at rule-set compilation, and an absent manifest simply
//! contributes zero dependencies.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read file: {}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
