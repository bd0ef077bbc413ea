//! # EXIF Cloner
//!
//! Copies creation timestamps and GPS positions from original media files
//! onto processed copies whose names still contain the original name.
//!
//! ## How it works
//! - Originals are found by name containment (`clip_0001.mov` is the
//!   source of `clip_0001_final.mp4`)
//! - All metadata reading and writing is done by the external `exiftool`
//!   binary; nothing here parses media files
//!
//! ## Architecture
//! - `core` - The cloning engine (UI-agnostic)
//! - `events` - Event-driven progress reporting
//! - `error` - Error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{ClonerError, Result};

/// Initialize tracing for the library
///
/// Filtered by `RUST_LOG` and written to stderr. Calling it more than
/// once is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
