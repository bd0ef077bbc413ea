//! Metadata tool trait definition.

use super::{ReadResult, WriteResult};
use crate::core::metadata::WriteRequest;
use crate::error::ToolError;
use std::path::Path;

/// Reads and writes media metadata on behalf of the pipeline.
///
/// [`ExifTool`](super::ExifTool) is the real implementation; tests
/// substitute scripted ones.
pub trait MetadataTool: Send + Sync {
    /// Read the creation date and GPS position of a source file.
    ///
    /// Missing fields are `None`, not errors. An error means the tool
    /// could not be run at all.
    fn read_metadata(&self, source: &Path) -> Result<ReadResult, ToolError>;

    /// Rewrite the target file in place with the requested fields
    fn write_metadata(
        &self,
        target: &Path,
        request: &WriteRequest,
    ) -> Result<WriteResult, ToolError>;
}
