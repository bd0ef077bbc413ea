//! # Core Module
//!
//! The UI-agnostic cloning engine.
//!
//! ## Modules
//! - `scanner` - Enumerates media files by extension
//! - `matcher` - Pairs processed files with their originals by name
//! - `metadata` - The fields copied between files
//! - `exiftool` - Runs the external exiftool binary and reads its output
//! - `pipeline` - Orchestrates the full workflow

pub mod exiftool;
pub mod matcher;
pub mod metadata;
pub mod pipeline;
pub mod scanner;

// Re-export commonly used types
pub use exiftool::{ExifTool, MetadataTool};
pub use metadata::{ExtractedMetadata, WriteRequest};
pub use pipeline::{FileOutcome, Pipeline, RunSummary};
pub use scanner::ExtensionSet;
