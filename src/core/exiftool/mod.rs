//! # Exiftool Module
//!
//! Boundary to the external exiftool binary.
//!
//! ## Invocations
//! - **Read**: `exiftool -ee -n <source>`
//! - **Write**: `exiftool -overwrite_original [-model=..] [-CreateDate=..] [-gpsposition=..] <target>`
//!
//! Both run synchronously with no timeout. Results are judged only from
//! the printed text (see [`output`]); the exit status is logged and
//! otherwise ignored.

mod command;
pub mod output;
mod traits;

pub use command::{ExifTool, EXECUTABLE_NAME};
pub use output::{ReadResult, Transcript, WriteResult};
pub use traits::MetadataTool;
