//! Parameter and result types for sysample.
//!
//! `ParamCandidate` is whatever the user typed. `SamplingParams` can only be
//! obtained by validating a candidate, so every value of that type satisfies
//! `0 < sample_size <= total` and `sample_size + reserve_size <= total`.

use crate::models::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unvalidated parameters as supplied by a form.
///
/// Numeric fields are `None` when the field was left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamCandidate {
    /// Free-form grade label
    #[serde(default)]
    pub grade: String,

    /// Population size (N)
    #[serde(default)]
    pub total: Option<i64>,

    /// Main sample size (n)
    #[serde(default)]
    pub sample_size: Option<i64>,

    /// Reserve list size
    #[serde(default)]
    pub reserve_size: Option<i64>,
}

impl ParamCandidate {
    /// Create a candidate with every numeric field present.
    pub fn new(grade: impl Into<String>, total: i64, sample_size: i64, reserve_size: i64) -> Self {
        Self {
            grade: grade.into(),
            total: Some(total),
            sample_size: Some(sample_size),
            reserve_size: Some(reserve_size),
        }
    }

    /// Build a candidate from raw form text.
    ///
    /// Blank or non-integer text becomes "no value".
    pub fn from_form(grade: &str, total: &str, sample_size: &str, reserve_size: &str) -> Self {
        Self {
            grade: grade.to_string(),
            total: parse_field(total),
            sample_size: parse_field(sample_size),
            reserve_size: parse_field(reserve_size),
        }
    }
}

fn parse_field(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Validated sampling parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ParamCandidate")]
pub struct SamplingParams {
    grade: String,
    total: usize,
    sample_size: usize,
    reserve_size: usize,
}

impl SamplingParams {
    /// Only the validator constructs params; callers go through `validate`.
    pub(crate) fn new_unchecked(
        grade: String,
        total: usize,
        sample_size: usize,
        reserve_size: usize,
    ) -> Self {
        Self {
            grade,
            total,
            sample_size,
            reserve_size,
        }
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn reserve_size(&self) -> usize {
        self.reserve_size
    }

    /// Sampling interval `k = floor(total / sample_size)`.
    pub fn interval(&self) -> usize {
        self.total / self.sample_size
    }

    /// Run the validator again over these params.
    ///
    /// Always succeeds for params produced by the validator.
    pub fn revalidate(&self) -> Result<SamplingParams, ValidationError> {
        crate::sampling::validate(&ParamCandidate::from(self.clone()))
    }
}

impl From<SamplingParams> for ParamCandidate {
    fn from(params: SamplingParams) -> Self {
        Self {
            grade: params.grade,
            total: Some(params.total as i64),
            sample_size: Some(params.sample_size as i64),
            reserve_size: Some(params.reserve_size as i64),
        }
    }
}

impl TryFrom<ParamCandidate> for SamplingParams {
    type Error = ValidationError;

    fn try_from(candidate: ParamCandidate) -> Result<Self, Self::Error> {
        crate::sampling::validate(&candidate)
    }
}

/// Outcome of one sampling run.
///
/// Serializes with the parameters flattened alongside the derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingResult {
    #[serde(flatten)]
    params: SamplingParams,
    interval: usize,
    start: usize,
    main_sample: Vec<usize>,
    reserve_list: Vec<usize>,
}

impl SamplingResult {
    pub(crate) fn new(
        params: SamplingParams,
        interval: usize,
        start: usize,
        main_sample: Vec<usize>,
        reserve_list: Vec<usize>,
    ) -> Self {
        Self {
            params,
            interval,
            start,
            main_sample,
            reserve_list,
        }
    }

    /// Parameters this result was drawn from.
    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    pub fn grade(&self) -> &str {
        self.params.grade()
    }

    pub fn total(&self) -> usize {
        self.params.total()
    }

    pub fn sample_size(&self) -> usize {
        self.params.sample_size()
    }

    pub fn reserve_size(&self) -> usize {
        self.params.reserve_size()
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Selected student numbers, strictly increasing.
    pub fn main_sample(&self) -> &[usize] {
        &self.main_sample
    }

    /// Alternates in draw order.
    pub fn reserve_list(&self) -> &[usize] {
        &self.reserve_list
    }
}

/// JSON export record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord<'a> {
    /// When the export was written
    pub generated_at: DateTime<Utc>,

    #[serde(flatten)]
    pub result: &'a SamplingResult,
}

impl<'a> ExportRecord<'a> {
    pub fn new(result: &'a SamplingResult) -> Self {
        Self {
            generated_at: Utc::now(),
            result,
        }
    }
}
