//! # Pipeline Module
//!
//! Orchestrates a full cloning run.
//!
//! ## Pipeline Stages
//! 1. **Preflight** - Check both roots and enumerate source and target files
//! 2. **Match** - Find the original of each target by name containment
//! 3. **Read** - Pull creation date and GPS position from the original
//! 4. **Write** - Copy them onto the target in place
//!
//! Targets are processed one at a time, in sorted order. A failure on one
//! target is recorded in its report and never stops the run.

mod executor;

pub use executor::{
    FileOutcome, FileReport, Pipeline, PipelineBuilder, PipelineConfig, RunSummary,
};
