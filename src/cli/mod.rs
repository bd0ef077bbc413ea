//! # CLI Module
//!
//! Command-line interface for the EXIF cloner.
//!
//! ## Usage
//! ```bash
//! # Copy dates and GPS from ~/raw (any depth) onto ~/processed
//! exif-cloner --exiftool_path /opt/exiftool --source_path ~/raw --target_path ~/processed
//!
//! # Only mov/mp4, stamping a camera model on every file
//! exif-cloner --exiftool_path /opt/exiftool --source_path ~/raw --target_path ~/processed \
//!     --ext "mov, mp4" --model "GoPro HERO12"
//!
//! # JSON report
//! exif-cloner ... --output json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use exif_cloner::core::exiftool::ExifTool;
use exif_cloner::core::pipeline::{Pipeline, RunSummary};
use exif_cloner::core::scanner::{ExtensionSet, ScanDepth, DEFAULT_EXTENSIONS};
use exif_cloner::error::{ClonerError, Result};
use exif_cloner::events::{Event, EventChannel, FileEvent, RunEvent, ScanEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

/// EXIF Cloner - Copy creation dates and GPS positions onto processed media
#[derive(Parser, Debug)]
#[command(name = "exif-cloner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the exiftool executable
    #[arg(long = "exiftool_path", visible_alias = "exiftool-path", value_name = "DIR")]
    exiftool_path: PathBuf,

    /// Tree of original files carrying the metadata to copy
    #[arg(long = "source_path", visible_alias = "source-path", value_name = "DIR")]
    source_path: PathBuf,

    /// Directory of processed files to update
    #[arg(long = "target_path", visible_alias = "target-path", value_name = "DIR")]
    target_path: PathBuf,

    /// Device/camera model to write to every updated file
    #[arg(long, default_value = "")]
    model: String,

    /// Comma-separated list of media file extensions
    #[arg(long, default_value = DEFAULT_EXTENSIONS)]
    ext: String,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable progress for every file
    Pretty,
    /// JSON run summary for scripting
    Json,
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let pretty = cli.output == OutputFormat::Pretty;

    match run_clone(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match &e {
                ClonerError::Preflight(_) => format!("Error: {}", e),
                _ => format!("Error: {}; aborting...", e),
            };
            if pretty {
                println!("{}", style(message).red());
            } else {
                println!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}

fn run_clone(cli: Cli) -> Result<()> {
    let term = Term::stdout();
    let pretty = cli.output == OutputFormat::Pretty;

    if pretty {
        term.write_line("").ok();
        term.write_line("Starting..").ok();
    }

    let tool = ExifTool::locate(&cli.exiftool_path)?;
    if pretty {
        term.write_line(&format!("Using {}...", tool.program().display()))
            .ok();
    }

    let extensions = ExtensionSet::parse(&cli.ext)?;
    if pretty && cli.verbose {
        let list: Vec<_> = extensions.iter().collect();
        term.write_line(&format!(
            "{} {}",
            style("Extensions:").dim(),
            list.join(", ")
        ))
        .ok();
    }

    let pipeline = Pipeline::builder()
        .source_root(cli.source_path)
        .target_root(cli.target_path)
        .extensions(extensions)
        .model(cli.model)
        .tool(Box::new(tool))
        .build()?;

    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let reporter = Reporter {
        term: term.clone(),
        progress: progress.clone(),
        verbose: cli.verbose,
    };

    // Render events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            if pretty {
                reporter.handle(event);
            }
        }
    });

    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    progress.finish_and_clear();

    let summary = result?;

    match cli.output {
        OutputFormat::Pretty => print_pretty_summary(&term, &summary),
        OutputFormat::Json => print_json_summary(&summary)?,
    }

    Ok(())
}

/// Prints the per-file narrative while the progress bar is running
struct Reporter {
    term: Term,
    progress: ProgressBar,
    verbose: bool,
}

impl Reporter {
    fn line(&self, text: impl AsRef<str>) {
        self.progress.suspend(|| {
            self.term.write_line(text.as_ref()).ok();
        });
    }

    fn handle(&self, event: Event) {
        self.track(&event);
        for text in self.render(&event) {
            self.line(text);
        }
    }

    /// Keep the progress bar in step with the run
    fn track(&self, event: &Event) {
        match event {
            Event::Run(RunEvent::Started { target_files, .. }) => {
                self.progress.set_length(*target_files as u64);
            }
            Event::File(FileEvent::Started { index, target, .. }) => {
                self.progress.set_position(index.saturating_sub(1) as u64);
                self.progress.set_message(
                    target
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .into_owned(),
                );
            }
            Event::Run(RunEvent::Completed { files_considered, .. }) => {
                self.progress.set_position(*files_considered as u64);
            }
            _ => {}
        }
    }

    fn render(&self, event: &Event) -> Vec<String> {
        match event {
            Event::Scan(ScanEvent::Started { root, depth }) => match depth {
                ScanDepth::Recursive => vec![format!(
                    "Building list of source files in \"{}\"...",
                    root.display()
                )],
                ScanDepth::Shallow => {
                    vec![format!("Processing files in \"{}\"...", root.display())]
                }
            },
            Event::Scan(ScanEvent::Error { message, .. }) => {
                vec![format!("  {} {}", style("* Skipped:").yellow(), message)]
            }
            Event::Scan(ScanEvent::Completed { root, total_files }) if self.verbose => {
                vec![format!(
                    "{}",
                    style(format!("  {} files in \"{}\"", total_files, root.display())).dim()
                )]
            }
            Event::Run(RunEvent::Started {
                target_root,
                target_files,
                ..
            }) => vec![format!(
                "Found {} target files in \"{}\":",
                target_files,
                target_root.display()
            )],
            Event::File(FileEvent::Started { index, target, .. }) => vec![
                String::new(),
                format!(
                    " {} Working on {}...",
                    style(format!("[{}]", index)).bold(),
                    target.display()
                ),
            ],
            Event::File(FileEvent::SourceMatched { source, .. }) => vec![
                format!("    Original file appears to be: {}", source.display()),
                "    Reading source file...".to_string(),
            ],
            Event::File(FileEvent::NoMatch { .. }) => vec![format!(
                "    {}",
                style("Original source file could not be located; skipping...").yellow()
            )],
            Event::File(FileEvent::ToolInvoked { command, .. }) if self.verbose => {
                vec![format!("      {}", style(format!("$ {}", command.join(" "))).dim())]
            }
            Event::File(FileEvent::ToolOutput { line, .. }) if self.verbose => {
                vec![format!("      {}", style(format!("| {}", line)).dim())]
            }
            Event::File(FileEvent::FieldsExtracted {
                creation_date_time,
                gps_position,
                ..
            }) => {
                let mut lines = Vec::new();
                if let Some(date) = creation_date_time {
                    lines.push(format!("     - Extracted creation date/time: {}", date));
                }
                if let Some(gps) = gps_position {
                    lines.push(format!("     - Extracted GPS coords: {}", gps));
                }
                lines
            }
            Event::File(FileEvent::NoFields { .. }) => vec![format!(
                "    {}",
                style("Failed to find any relevant EXIF metadata in original; skipping...")
                    .yellow()
            )],
            Event::File(FileEvent::Writing { .. }) => {
                vec!["    Attempting to update...".to_string()]
            }
            Event::File(FileEvent::Updated { .. }) => vec![format!(
                "    {}",
                style("Successfully updated EXIF metadata.").green()
            )],
            Event::File(FileEvent::UnexpectedOutput { line, .. }) => vec![
                format!("  {}", style("* Unexpected result:").yellow()),
                format!(" -> {}", line),
            ],
            Event::File(FileEvent::ToolFailed { message, .. }) => {
                vec![format!("  {} {}", style("* exiftool failed:").red(), message)]
            }
            Event::Scan(ScanEvent::Completed { .. })
            | Event::File(FileEvent::ToolInvoked { .. })
            | Event::File(FileEvent::ToolOutput { .. })
            | Event::Run(RunEvent::Completed { .. }) => Vec::new(),
        }
    }
}

fn print_pretty_summary(term: &Term, summary: &RunSummary) {
    term.write_line("").ok();
    term.write_line(&format!(
        "{} of {} file(s) updated.",
        style(summary.files_updated).cyan().bold(),
        summary.files_considered
    ))
    .ok();
    if !summary.scan_errors.is_empty() {
        term.write_line(&format!(
            "{} entries could not be read and were skipped.",
            style(summary.scan_errors.len()).yellow()
        ))
        .ok();
    }
    term.write_line("Done!").ok();
    term.write_line("").ok();
}

fn print_json_summary(summary: &RunSummary) -> Result<()> {
    let output = serde_json::to_string_pretty(summary)?;
    println!("{}", output);
    Ok(())
}
