//! Scraping of exiftool's text output.
//!
//! This is the only place that knows exiftool's English labels and its
//! confirmation message. A different exiftool version or locale that
//! changes them will make reads come back empty and writes look failed.

use crate::core::metadata::ExtractedMetadata;
use serde::{Deserialize, Serialize};

/// Label of the creation timestamp in `exiftool -ee -n` output
pub const CREATION_DATE_LABEL: &str = "File Creation Date/Time";
/// Label of the combined GPS position in `exiftool -ee -n` output
pub const GPS_POSITION_LABEL: &str = "GPS Position";
/// Printed by exiftool when exactly one file was rewritten
pub const WRITE_SUCCESS_PHRASE: &str = "1 image files updated";

/// What was run and everything it printed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Program followed by its arguments
    pub command: Vec<String>,
    /// Non-blank output lines, stdout before stderr
    pub lines: Vec<String>,
}

impl Transcript {
    pub fn new(command: Vec<String>, output: &str) -> Self {
        Self {
            command,
            lines: output
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| line.trim_end().to_string())
                .collect(),
        }
    }
}

/// Outcome of one read invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResult {
    pub metadata: ExtractedMetadata,
    pub transcript: Transcript,
}

/// Outcome of one write invocation, judged from its output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    /// The confirmation phrase appeared
    pub updated: bool,
    /// Every other non-blank output line, in order
    pub unexpected: Vec<String>,
    pub transcript: Transcript,
}

/// Pull the creation date and GPS position out of a metadata dump.
///
/// The value is whatever follows the first `:` on the labelled line,
/// trimmed. For both fields the first non-empty occurrence wins.
pub fn parse_metadata(output: &str) -> ExtractedMetadata {
    let mut metadata = ExtractedMetadata::default();

    for line in output.lines() {
        if line.contains(CREATION_DATE_LABEL) {
            if metadata.creation_date_time.is_none() {
                metadata.creation_date_time = value_after_label(line);
            }
        } else if line.contains(GPS_POSITION_LABEL) && metadata.gps_position.is_none() {
            metadata.gps_position = value_after_label(line);
        }
    }

    metadata
}

/// Classify the output of a write invocation
pub fn parse_write_output(output: &str) -> WriteResult {
    let mut result = WriteResult::default();

    for line in output.lines() {
        if line.contains(WRITE_SUCCESS_PHRASE) {
            result.updated = true;
        } else if !line.trim().is_empty() {
            result.unexpected.push(line.trim_end().to_string());
        }
    }

    result
}

fn value_after_label(line: &str) -> Option<String> {
    let (_, value) = line.split_once(':')?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DUMP: &str = "\
ExifTool Version Number         : 12.76
File Name                       : video001.mov
File Creation Date/Time         : 2024:01:02 03:04:05
Duration                        : 12.5
GPS Position                    : 48.8584 2.2945
";

    #[test]
    fn creation_date_keeps_colons_after_the_first() {
        let metadata = parse_metadata("File Creation Date/Time : 2024:01:02 03:04:05");

        assert_eq!(
            metadata.creation_date_time.as_deref(),
            Some("2024:01:02 03:04:05")
        );
        assert_eq!(metadata.gps_position, None);
    }

    #[test]
    fn both_fields_are_read_from_a_full_dump() {
        let metadata = parse_metadata(SAMPLE_DUMP);

        assert_eq!(
            metadata.creation_date_time.as_deref(),
            Some("2024:01:02 03:04:05")
        );
        assert_eq!(metadata.gps_position.as_deref(), Some("48.8584 2.2945"));
    }

    #[test]
    fn first_occurrence_wins_for_both_fields() {
        let output = "\
File Creation Date/Time : 2024:01:02 03:04:05
GPS Position : 1.0 2.0
File Creation Date/Time : 1999:12:31 23:59:59
GPS Position : 3.0 4.0
";
        let metadata = parse_metadata(output);

        assert_eq!(
            metadata.creation_date_time.as_deref(),
            Some("2024:01:02 03:04:05")
        );
        assert_eq!(metadata.gps_position.as_deref(), Some("1.0 2.0"));
    }

    #[test]
    fn blank_values_do_not_block_later_lines() {
        let output = "GPS Position :   \r\nGPS Position : 5.5 6.6\r\n";

        let metadata = parse_metadata(output);

        assert_eq!(metadata.gps_position.as_deref(), Some("5.5 6.6"));
    }

    #[test]
    fn missing_labels_yield_empty_metadata() {
        let metadata = parse_metadata("File Name : clip.mov\nError: File not found\n");

        assert_eq!(metadata, ExtractedMetadata::default());
    }

    #[test]
    fn label_without_colon_is_ignored() {
        let metadata = parse_metadata("GPS Position unavailable");

        assert_eq!(metadata.gps_position, None);
    }

    #[test]
    fn success_phrase_marks_update() {
        let result = parse_write_output("    1 image files updated\n");

        assert!(result.updated);
        assert!(result.unexpected.is_empty());
    }

    #[test]
    fn other_lines_are_reported_as_unexpected() {
        let output = "Warning: [minor] Tag 'CreateDate' not defined\n    1 image files updated\n";

        let result = parse_write_output(output);

        assert!(result.updated);
        assert_eq!(
            result.unexpected,
            vec!["Warning: [minor] Tag 'CreateDate' not defined"]
        );
    }

    #[test]
    fn transcript_keeps_non_blank_lines() {
        let transcript = Transcript::new(
            vec!["exiftool".to_string(), "-ee".to_string()],
            "ExifTool Version Number : 12.76  \r\n\n   \nGPS Position : 1 2\n",
        );

        assert_eq!(
            transcript.lines,
            vec!["ExifTool Version Number : 12.76", "GPS Position : 1 2"]
        );
    }

    #[test]
    fn unchanged_file_is_not_an_update() {
        let result = parse_write_output("    0 image files updated\n    1 image files unchanged\n");

        assert!(!result.updated);
        assert_eq!(result.unexpected.len(), 2);
    }
}
