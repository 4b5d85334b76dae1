//! Application state for one user session.
//!
//! The session owns the result currently on screen. Generating replaces it,
//! reset clears it; nothing outlives the session.

use crate::models::{ParamCandidate, Result, SamplingResult};
use crate::sampling::{validate_within, RandomSource, SamplingEngine, DEFAULT_MAX_TOTAL};
use tracing::{debug, info};

/// Top-level controller state: the engine plus the displayed result.
pub struct Session<R> {
    engine: SamplingEngine<R>,
    current: Option<SamplingResult>,
    max_total: usize,
}

impl<R: RandomSource> Session<R> {
    pub fn new(rng: R) -> Self {
        Self {
            engine: SamplingEngine::new(rng),
            current: None,
            max_total: DEFAULT_MAX_TOTAL,
        }
    }

    /// Refuse populations larger than `max_total`.
    pub fn with_max_total(mut self, max_total: usize) -> Self {
        self.max_total = max_total;
        self
    }

    /// Validate the candidate and, on success, draw and display a new result.
    ///
    /// A rejected candidate leaves the displayed result untouched.
    pub fn generate(&mut self, candidate: &ParamCandidate) -> Result<&SamplingResult> {
        let params = validate_within(candidate, self.max_total)?;
        let result = self.engine.run(params);
        info!(
            grade = result.grade(),
            main = result.main_sample().len(),
            reserve = result.reserve_list().len(),
            "Generated sample"
        );
        Ok(&*self.current.insert(result))
    }

    /// Result currently on screen, if any.
    pub fn current(&self) -> Option<&SamplingResult> {
        self.current.as_ref()
    }

    /// Discard the displayed result, returning it.
    pub fn reset(&mut self) -> Option<SamplingResult> {
        debug!(had_result = self.current.is_some(), "Session reset");
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SamplerError, ValidationError};
    use crate::sampling::SeededRandom;

    #[test]
    fn test_generate_then_reset() {
        let mut session = Session::new(SeededRandom::new(8));
        assert!(session.current().is_none());

        let result = session
            .generate(&ParamCandidate::new("Grade 6", 30, 6, 3))
            .unwrap()
            .clone();
        assert_eq!(result.interval(), 5);
        assert_eq!(session.current(), Some(&result));

        assert_eq!(session.reset(), Some(result));
        assert!(session.current().is_none());
        assert!(session.reset().is_none());
    }

    #[test]
    fn test_rejected_candidate_keeps_current() {
        let mut session = Session::new(SeededRandom::new(8));
        session
            .generate(&ParamCandidate::new("Grade 6", 10, 10, 0))
            .unwrap();

        let err = session
            .generate(&ParamCandidate::new("Grade 6", 10, 3, 8))
            .unwrap_err();
        assert!(matches!(
            err,
            SamplerError::Validation(ValidationError::SampleAndReserveExceedTotal)
        ));
        assert_eq!(session.current().unwrap().total(), 10);
        assert_eq!(session.current().unwrap().sample_size(), 10);
    }

    #[test]
    fn test_new_result_replaces_old() {
        let mut session = Session::new(SeededRandom::new(8));
        session.generate(&ParamCandidate::new("A", 10, 10, 0)).unwrap();
        session.generate(&ParamCandidate::new("B", 20, 4, 2)).unwrap();

        let current = session.current().unwrap();
        assert_eq!(current.grade(), "B");
        assert_eq!(current.main_sample().len(), 4);
        assert_eq!(current.reserve_list().len(), 2);
    }

    #[test]
    fn test_population_over_limit_is_refused() {
        let mut session = Session::new(SeededRandom::new(1));
        let huge = ParamCandidate::new("G", 1 << 62, 1 << 62, 0);
        assert!(matches!(
            session.generate(&huge),
            Err(SamplerError::PopulationTooLarge { .. })
        ));
        assert!(session.current().is_none());

        let mut small = Session::new(SeededRandom::new(1)).with_max_total(20);
        assert!(small.generate(&ParamCandidate::new("G", 20, 4, 2)).is_ok());
        let err = small
            .generate(&ParamCandidate::new("G", 21, 3, 0))
            .unwrap_err();
        assert!(err.is_user_correctable());
        assert_eq!(small.current().unwrap().total(), 20);
    }
}
