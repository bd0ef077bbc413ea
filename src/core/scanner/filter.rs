//! Extension filtering for the scanner.

use crate::error::ClonerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Extensions used when none are configured
pub const DEFAULT_EXTENSIONS: &str = "mov, mp4, mkv";

/// Set of accepted file extensions
///
/// Each entry is lowercase and starts with `.`. Matching is a
/// case-insensitive suffix test on the whole file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    /// Parse a comma-separated list such as `"MOV, .mp4 ,mkv"`
    pub fn parse(list: &str) -> Result<Self, ClonerError> {
        let extensions: BTreeSet<String> = list
            .split(',')
            .map(|ext| ext.replace('.', "").trim().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext))
            .collect();

        if extensions.is_empty() {
            return Err(ClonerError::Config(format!(
                "no usable file extensions in \"{}\"",
                list
            )));
        }

        Ok(Self { extensions })
    }

    /// Check whether a file name ends with one of the accepted extensions
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Iterate the normalized extensions in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self {
            extensions: [".mkv", ".mov", ".mp4"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
