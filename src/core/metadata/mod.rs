//! # Metadata Module
//!
//! The fields carried from an original file to its processed copy.
//!
//! ## Copied Fields
//! - File creation date/time (written as `CreateDate`)
//! - GPS position (written as `GPSPosition`)
//! - Optionally, a fixed camera model supplied by the user
//!
//! Values are kept exactly as exiftool printed them with `-n`, so they
//! can be written back without any reformatting.

use serde::{Deserialize, Serialize};

/// Metadata scraped from one read of a source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    /// Original creation date/time, e.g. `2024:01:02 03:04:05`
    pub creation_date_time: Option<String>,
    /// GPS position in numeric form, e.g. `48.8584 2.2945`
    pub gps_position: Option<String>,
}

impl ExtractedMetadata {
    /// Check if any field was found
    pub fn has_data(&self) -> bool {
        self.creation_date_time.is_some() || self.gps_position.is_some()
    }
}

/// Field assignments for one write invocation.
///
/// Only built when at least one field is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub model: Option<String>,
    pub create_date: Option<String>,
    pub gps_position: Option<String>,
}

impl WriteRequest {
    /// Combine the configured model with extracted metadata.
    ///
    /// Returns `None` when there is nothing to write. Empty strings count
    /// as absent.
    pub fn build(model: Option<&str>, metadata: &ExtractedMetadata) -> Option<Self> {
        let request = Self {
            model: non_empty(model),
            create_date: non_empty(metadata.creation_date_time.as_deref()),
            gps_position: non_empty(metadata.gps_position.as_deref()),
        };

        if request.model.is_none() && request.create_date.is_none() && request.gps_position.is_none() {
            None
        } else {
            Some(request)
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
