//! Process-backed metadata tool that shells out to exiftool.

use super::output::{parse_metadata, parse_write_output, ReadResult, Transcript, WriteResult};
use super::MetadataTool;
use crate::core::metadata::WriteRequest;
use crate::error::{PreflightError, ToolError};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// File name of the exiftool executable on this platform
pub const EXECUTABLE_NAME: &str = if cfg!(windows) {
    "exiftool.exe"
} else {
    "exiftool"
};

/// Runs the exiftool binary, one blocking process per call
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    /// Wrap an executable path without checking it exists
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Find the executable in `location`.
    ///
    /// `location` is normally the directory holding exiftool; a path to
    /// the executable itself is accepted too.
    pub fn locate(location: &Path) -> Result<Self, PreflightError> {
        if location.is_file() {
            return Ok(Self::new(location));
        }

        let program = location.join(EXECUTABLE_NAME);
        if program.is_file() {
            Ok(Self::new(program))
        } else {
            Err(PreflightError::ToolNotFound { path: program })
        }
    }

    /// Path of the executable being run
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for dumping all metadata, embedded streams included,
    /// with numeric values
    pub fn read_args(source: &Path) -> Vec<OsString> {
        vec!["-ee".into(), "-n".into(), source.as_os_str().to_os_string()]
    }

    /// Arguments for an in-place write of the requested fields
    pub fn write_args(target: &Path, request: &WriteRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-overwrite_original".into()];

        if let Some(model) = &request.model {
            args.push(assignment("-model=", model));
        }
        if let Some(date) = &request.create_date {
            args.push(assignment("-CreateDate=", date));
        }
        if let Some(gps) = &request.gps_position {
            args.push(assignment("-gpsposition=", gps));
        }

        args.push(target.as_os_str().to_os_string());
        args
    }

    /// Run exiftool to completion and return stdout followed by stderr,
    /// with the transcript of the invocation
    fn run(&self, args: &[OsString]) -> Result<(String, Transcript), ToolError> {
        tracing::debug!(program = %self.program.display(), ?args, "running exiftool");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Exit status is informational; the text decides the outcome.
        if !output.status.success() {
            tracing::debug!(status = %output.status, "exiftool exited unsuccessfully");
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&String::from_utf8_lossy(&output.stderr));
        }

        let command = std::iter::once(self.program.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        let transcript = Transcript::new(command, &text);

        Ok((text, transcript))
    }
}

impl MetadataTool for ExifTool {
    fn read_metadata(&self, source: &Path) -> Result<ReadResult, ToolError> {
        let (output, transcript) = self.run(&Self::read_args(source))?;
        Ok(ReadResult {
            metadata: parse_metadata(&output),
            transcript,
        })
    }

    fn write_metadata(
        &self,
        target: &Path,
        request: &WriteRequest,
    ) -> Result<WriteResult, ToolError> {
        let (output, transcript) = self.run(&Self::write_args(target, request))?;
        Ok(WriteResult {
            transcript,
            ..parse_write_output(&output)
        })
    }
}

fn assignment(option: &str, value: &str) -> OsString {
    let mut arg = OsStr::new(option).to_os_string();
    arg.push(value);
    arg
}
