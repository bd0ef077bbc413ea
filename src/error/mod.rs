//! # Error Module
//!
//! Error types for the EXIF cloner.
//!
//! ## Tiers
//! - **Preflight** errors stop the run before any target file is touched
//! - **Per-file** problems never surface here; they become a
//!   [`FileOutcome`](crate::core::pipeline::FileOutcome) and the run continues

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ClonerError {
    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Conditions that abort the run before the per-file loop starts
#[derive(Error, Debug)]
pub enum PreflightError {
    #[error("exiftool not found at \"{path}\"; aborting...")]
    ToolNotFound { path: PathBuf },

    #[error("\"{path}\" does not exist; aborting...")]
    SourceNotFound { path: PathBuf },

    #[error("\"{path}\" contains no files with valid extensions; aborting...")]
    SourceEmpty { path: PathBuf },

    #[error("\"{path}\" does not exist; aborting...")]
    TargetNotFound { path: PathBuf },
}

/// Errors that occur while enumerating media files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised when the external tool cannot be run at all.
///
/// Output that merely looks wrong is not an error; see
/// [`WriteResult`](crate::core::exiftool::WriteResult).
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ClonerError>;
