//! # Scanner Module
//!
//! Enumerates media files by extension.
//!
//! ## Variants
//! - **Recursive** - the source tree, every depth
//! - **Shallow** - the target directory, direct entries only
//!
//! Both variants return absolute paths, deduplicated and sorted by their
//! string form, so matching order never depends on filesystem order.
//!
//! ## Example
//! ```rust,ignore
//! use exif_cloner::core::scanner::{ExtensionSet, MediaScanner, ScanConfig};
//!
//! let scanner = MediaScanner::new(ScanConfig::default(), ExtensionSet::parse("mov, mp4")?);
//! let sources = scanner.scan_tree("/videos/raw".as_ref(), &null_sender())?;
//! ```

mod filter;
mod walker;

pub use filter::{ExtensionSet, DEFAULT_EXTENSIONS};
pub use walker::{MediaScanner, ScanConfig};

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How far below the root a scan descends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanDepth {
    Recursive,
    Shallow,
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Matching files, sorted and deduplicated
    pub files: Vec<PathBuf>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}
