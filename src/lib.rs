//! sysample - Systematic sampling of a numbered population.
//!
//! ## Pipeline
//!
//! candidate parameters → validator → sampling engine → report / export
//!
//! - **Validator**: four ordered checks, each with a fixed user-facing message
//! - **Engine**: interval `k = floor(N / n)`, random start in `[1, k]`, every
//!   k-th student after it, plus a shuffled reserve list drawn from everyone
//!   else
//! - **Report**: the plain-text download, its filename, and a parser that
//!   reads the number lists back
//!
//! Randomness is injected through [`RandomSource`], so runs can be seeded or
//! scripted.

pub mod interactive;
pub mod models;
pub mod report;
pub mod sampling;
pub mod session;

// Re-exports for convenience
pub use models::{
    Config, ExportFormat, ParamCandidate, Result, SamplerError, SamplingParams, SamplingResult,
    ValidationError,
};
pub use report::{parse_report, render_report, render_summary, report_filename, Exporter};
pub use sampling::{
    validate, validate_within, RandomSource, SamplingEngine, SeededRandom, ThreadRandom,
    DEFAULT_MAX_TOTAL,
};
pub use session::Session;
