//! Event type definitions for progress reporting.

use crate::core::scanner::ScanDepth;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the cloning pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// File enumeration events
    Scan(ScanEvent),
    /// Per-target-file events
    File(FileEvent),
    /// Run-level events
    Run(RunEvent),
}

/// Events during file enumeration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Enumeration of a root has started
    Started { root: PathBuf, depth: ScanDepth },
    /// An entry could not be read and was skipped
    Error { path: PathBuf, message: String },
    /// Enumeration of a root completed
    Completed { root: PathBuf, total_files: usize },
}

/// Events for a single target file, in the order they can occur
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FileEvent {
    /// Processing of a target file has started (`index` is 1-based)
    Started {
        index: usize,
        total: usize,
        target: PathBuf,
    },
    /// A source file was matched by name
    SourceMatched { target: PathBuf, source: PathBuf },
    /// No source file name is contained in the target name
    NoMatch { target: PathBuf },
    /// exiftool was invoked; `command` is the program followed by its arguments
    ToolInvoked { target: PathBuf, command: Vec<String> },
    /// One non-blank line printed by the last invocation
    ToolOutput { target: PathBuf, line: String },
    /// Metadata was read from the source file
    FieldsExtracted {
        target: PathBuf,
        creation_date_time: Option<String>,
        gps_position: Option<String>,
    },
    /// Nothing worth writing was found
    NoFields { target: PathBuf },
    /// The write invocation is about to run
    Writing { target: PathBuf },
    /// exiftool confirmed the update
    Updated { target: PathBuf },
    /// exiftool printed a line other than the confirmation
    UnexpectedOutput { target: PathBuf, line: String },
    /// exiftool could not be run for this file
    ToolFailed { target: PathBuf, message: String },
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// Preflight checks passed and target files are known
    Started {
        source_root: PathBuf,
        target_root: PathBuf,
        source_files: usize,
        target_files: usize,
    },
    /// Every target file has been processed
    Completed {
        files_considered: usize,
        files_updated: usize,
    },
}
