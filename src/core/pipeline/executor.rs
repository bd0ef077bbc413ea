//! Pipeline execution implementation.

use crate::core::exiftool::{MetadataTool, Transcript};
use crate::core::matcher::{base_name, find_source};
use crate::core::metadata::{ExtractedMetadata, WriteRequest};
use crate::core::scanner::{ExtensionSet, MediaScanner, ScanConfig, ScanResult};
use crate::error::{ClonerError, PreflightError};
use crate::events::{null_sender, Event, EventSender, FileEvent, RunEvent};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How processing of one target file ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// No source base name is contained in the target name
    NoMatch,
    /// The source had no creation date or GPS position and no model was set
    NoFields,
    /// exiftool confirmed the write; `warnings` holds any other lines it printed
    Updated { warnings: Vec<String> },
    /// exiftool ran but never confirmed the write
    Unexpected { lines: Vec<String> },
    /// exiftool could not be launched
    ToolFailed { message: String },
}

impl FileOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, FileOutcome::Updated { .. })
    }
}

/// What happened to one target file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub target: PathBuf,
    pub source: Option<PathBuf>,
    pub metadata: Option<ExtractedMetadata>,
    pub outcome: FileOutcome,
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Target files processed
    pub files_considered: usize,
    /// Target files exiftool confirmed as updated
    pub files_updated: usize,
    /// One report per target file, in processing order
    pub reports: Vec<FileReport>,
    /// Entries skipped while enumerating either root
    pub scan_errors: Vec<String>,
}

impl RunSummary {
    fn record_scan_errors(&mut self, scan: &ScanResult) {
        self.scan_errors
            .extend(scan.errors.iter().map(|error| error.to_string()));
    }

    fn record(&mut self, report: FileReport) {
        self.files_considered += 1;
        if report.outcome.is_updated() {
            self.files_updated += 1;
        }
        self.reports.push(report);
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Tree of original files, scanned recursively
    pub source_root: PathBuf,
    /// Directory of processed files, scanned one level deep
    pub target_root: PathBuf,
    /// Extensions considered media files in both roots
    pub extensions: ExtensionSet,
    /// Model string written to every updated file
    pub model: Option<String>,
    /// Scanner configuration
    pub scan_config: ScanConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::new(),
            target_root: PathBuf::new(),
            extensions: ExtensionSet::default(),
            model: None,
            scan_config: ScanConfig::default(),
        }
    }
}

/// Builder for pipeline configuration
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
    tool: Option<Box<dyn MetadataTool>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tree of original files
    pub fn source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source_root = path.into();
        self
    }

    /// Set the directory of files to update
    pub fn target_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.target_root = path.into();
        self
    }

    /// Set the accepted extensions
    pub fn extensions(mut self, extensions: ExtensionSet) -> Self {
        self.config.extensions = extensions;
        self
    }

    /// Set the model string; empty means none
    pub fn model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.config.model = (!model.is_empty()).then_some(model);
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Set the metadata tool
    pub fn tool(mut self, tool: Box<dyn MetadataTool>) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<Pipeline, ClonerError> {
        let tool = self
            .tool
            .ok_or_else(|| ClonerError::Config("no metadata tool configured".to_string()))?;

        Ok(Pipeline {
            config: self.config,
            tool,
        })
    }
}

/// The metadata cloning pipeline
pub struct Pipeline {
    config: PipelineConfig,
    tool: Box<dyn MetadataTool>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<RunSummary, ClonerError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting.
    ///
    /// Errors are returned only for the preflight checks; every problem
    /// with an individual target file ends up in its [`FileReport`].
    pub fn run_with_events(&self, events: &EventSender) -> Result<RunSummary, ClonerError> {
        let config = &self.config;
        let scanner = MediaScanner::new(config.scan_config.clone(), config.extensions.clone());

        if !config.source_root.is_dir() {
            return Err(PreflightError::SourceNotFound {
                path: config.source_root.clone(),
            }
            .into());
        }
        let sources = scanner.scan_tree(&config.source_root, events)?;
        if sources.files.is_empty() {
            return Err(PreflightError::SourceEmpty {
                path: config.source_root.clone(),
            }
            .into());
        }

        if !config.target_root.is_dir() {
            return Err(PreflightError::TargetNotFound {
                path: config.target_root.clone(),
            }
            .into());
        }
        let targets = scanner.scan_dir(&config.target_root, events)?;

        events.send(Event::Run(RunEvent::Started {
            source_root: config.source_root.clone(),
            target_root: config.target_root.clone(),
            source_files: sources.files.len(),
            target_files: targets.files.len(),
        }));

        let mut summary = RunSummary::default();
        summary.record_scan_errors(&sources);
        summary.record_scan_errors(&targets);
        let total = targets.files.len();

        for (i, target) in targets.files.iter().enumerate() {
            events.send(Event::File(FileEvent::Started {
                index: i + 1,
                total,
                target: target.clone(),
            }));

            let report = self.process_target(target, &sources.files, events);
            summary.record(report);
        }

        events.send(Event::Run(RunEvent::Completed {
            files_considered: summary.files_considered,
            files_updated: summary.files_updated,
        }));

        Ok(summary)
    }

    fn process_target(&self, target: &Path, sources: &[PathBuf], events: &EventSender) -> FileReport {
        let mut report = FileReport {
            target: target.to_path_buf(),
            source: None,
            metadata: None,
            outcome: FileOutcome::NoMatch,
        };

        let Some(source) = find_source(&base_name(target), sources) else {
            events.send(Event::File(FileEvent::NoMatch {
                target: report.target.clone(),
            }));
            return report;
        };
        report.source = Some(source.to_path_buf());
        events.send(Event::File(FileEvent::SourceMatched {
            target: report.target.clone(),
            source: source.to_path_buf(),
        }));

        let metadata = match self.tool.read_metadata(source) {
            Ok(result) => {
                echo_transcript(target, &result.transcript, events);
                result.metadata
            }
            Err(e) => {
                report.outcome = self.tool_failed(target, e.to_string(), events);
                return report;
            }
        };
        events.send(Event::File(FileEvent::FieldsExtracted {
            target: report.target.clone(),
            creation_date_time: metadata.creation_date_time.clone(),
            gps_position: metadata.gps_position.clone(),
        }));

        let request = WriteRequest::build(self.config.model.as_deref(), &metadata);
        report.metadata = Some(metadata);

        let Some(request) = request else {
            events.send(Event::File(FileEvent::NoFields {
                target: report.target.clone(),
            }));
            report.outcome = FileOutcome::NoFields;
            return report;
        };

        events.send(Event::File(FileEvent::Writing {
            target: report.target.clone(),
        }));

        report.outcome = match self.tool.write_metadata(target, &request) {
            Ok(result) => {
                echo_transcript(target, &result.transcript, events);
                if result.updated {
                    events.send(Event::File(FileEvent::Updated {
                        target: report.target.clone(),
                    }));
                }
                for line in &result.unexpected {
                    events.send(Event::File(FileEvent::UnexpectedOutput {
                        target: report.target.clone(),
                        line: line.clone(),
                    }));
                }

                if result.updated {
                    FileOutcome::Updated {
                        warnings: result.unexpected,
                    }
                } else {
                    FileOutcome::Unexpected {
                        lines: result.unexpected,
                    }
                }
            }
            Err(e) => self.tool_failed(target, e.to_string(), events),
        };

        report
    }

    fn tool_failed(&self, target: &Path, message: String, events: &EventSender) -> FileOutcome {
        tracing::warn!(target = %target.display(), %message, "exiftool invocation failed");
        events.send(Event::File(FileEvent::ToolFailed {
            target: target.to_path_buf(),
            message: message.clone(),
        }));
        FileOutcome::ToolFailed { message }
    }
}

fn echo_transcript(target: &Path, transcript: &Transcript, events: &EventSender) {
    events.send(Event::File(FileEvent::ToolInvoked {
        target: target.to_path_buf(),
        command: transcript.command.clone(),
    }));
    for line in &transcript.lines {
        events.send(Event::File(FileEvent::ToolOutput {
            target: target.to_path_buf(),
            line: line.clone(),
        }));
    }
}
