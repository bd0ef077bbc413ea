//! # exif-cloner CLI
//!
//! Command-line interface for the EXIF cloner.
//!
//! ## Usage
//! ```bash
//! exif-cloner --exiftool_path /opt/exiftool --source_path ~/raw --target_path ~/processed
//! exif-cloner --exiftool_path /opt/exiftool --source_path ~/raw --target_path ~/processed --ext "mov, mp4" --model "GoPro HERO12"
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    exif_cloner::init_tracing();
    cli::run()
}
