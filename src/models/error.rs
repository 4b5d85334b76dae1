//! Error types for sysample.
//!
//! Taxonomy:
//! - Rejected input: the parameter set cannot be sampled (validation)
//! - Environment failures: filesystem, malformed report files

use thiserror::Error;

/// A parameter set the validator refused.
///
/// Each variant carries the fixed message shown to the user; the checks run in
/// declaration order and the first failing one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Total, sample size, and reserve size must be positive numbers.")]
    NotPositive,

    #[error("Sample size cannot be greater than the total number of students.")]
    SampleExceedsTotal,

    #[error("The sum of sample size and reserve size cannot exceed the total.")]
    SampleAndReserveExceedTotal,

    #[error(
        "Cannot perform systematic sampling. The total is too small for the requested sample size, resulting in an interval less than 1."
    )]
    IntervalTooSmall,
}

/// Top-level error type for sysample.
#[derive(Debug, Error)]
pub enum SamplerError {
    // ═══════════════════════════════════════════════════════════════════
    // Rejected input
    // ═══════════════════════════════════════════════════════════════════

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A population of {total} students exceeds the limit of {max_total}.")]
    PopulationTooLarge { total: usize, max_total: usize },

    // ═══════════════════════════════════════════════════════════════════
    // Environment
    // ═══════════════════════════════════════════════════════════════════

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed report: {0}")]
    ReportParse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SamplerError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the user can fix this by editing the submitted parameters.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::PopulationTooLarge { .. })
    }
}

/// Result type alias for sysample.
pub type Result<T> = std::result::Result<T, SamplerError>;
