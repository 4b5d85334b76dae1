//! Parameter validation.
//!
//! Checks run in a fixed order and the first failure is reported.

use crate::models::{ParamCandidate, SamplerError, SamplingParams, ValidationError};
use tracing::debug;

/// Largest population sampled unless configured otherwise.
///
/// The engine enumerates every student number, so memory grows with the total.
pub const DEFAULT_MAX_TOTAL: usize = 1_000_000;

/// Validate a candidate parameter set.
///
/// Pure: no side effects beyond a debug log line.
pub fn validate(candidate: &ParamCandidate) -> Result<SamplingParams, ValidationError> {
    let (total, sample_size, reserve_size) =
        match (candidate.total, candidate.sample_size, candidate.reserve_size) {
            (Some(t), Some(n), Some(r)) if t > 0 && n > 0 && r >= 0 => (t, n, r),
            _ => return reject(ValidationError::NotPositive),
        };

    if sample_size > total {
        return reject(ValidationError::SampleExceedsTotal);
    }

    // Overflowing sums are larger than any total.
    match sample_size.checked_add(reserve_size) {
        Some(sum) if sum <= total => {}
        _ => return reject(ValidationError::SampleAndReserveExceedTotal),
    }

    if total / sample_size < 1 {
        return reject(ValidationError::IntervalTooSmall);
    }

    // Populations beyond the address space cannot be enumerated.
    let (Ok(total), Ok(sample_size), Ok(reserve_size)) = (
        usize::try_from(total),
        usize::try_from(sample_size),
        usize::try_from(reserve_size),
    ) else {
        return reject(ValidationError::SampleAndReserveExceedTotal);
    };

    Ok(SamplingParams::new_unchecked(
        candidate.grade.clone(),
        total,
        sample_size,
        reserve_size,
    ))
}

/// Validate, then refuse populations larger than `max_total`.
///
/// The four validation checks take precedence over the size limit.
pub fn validate_within(
    candidate: &ParamCandidate,
    max_total: usize,
) -> crate::models::Result<SamplingParams> {
    let params = validate(candidate)?;
    if params.total() > max_total {
        debug!(total = params.total(), max_total, "Population over limit");
        return Err(SamplerError::PopulationTooLarge {
            total: params.total(),
            max_total,
        });
    }
    Ok(params)
}

fn reject(error: ValidationError) -> Result<SamplingParams, ValidationError> {
    debug!(%error, "Rejected sampling parameters");
    Err(error)
}
