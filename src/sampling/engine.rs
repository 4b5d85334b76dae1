//! Systematic sampling engine.
//!
//! Given validated params:
//! 1. interval `k = floor(N / n)`
//! 2. random start in `[1, k]`
//! 3. main sample `start + i*k` for `i in 0..n`
//! 4. reserve list: Fisher-Yates shuffle of the remaining numbers, first `r` kept

use crate::models::{SamplingParams, SamplingResult};
use crate::sampling::RandomSource;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Draws sampling results using an injected random source.
///
/// Every student number in `[1, total]` is enumerated for the reserve draw;
/// callers bound the population with `validate_within`.
pub struct SamplingEngine<R> {
    rng: R,
}

impl<R: RandomSource> SamplingEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Produce one result. Consumes the params; there is no error path.
    pub fn run(&mut self, params: SamplingParams) -> SamplingResult {
        let total = params.total();
        let sample_size = params.sample_size();
        let reserve_size = params.reserve_size();

        let interval = total / sample_size;
        debug_assert!(interval >= 1, "validated params always yield interval >= 1");

        let start = self.rng.uniform_inclusive(1, interval);
        let main_sample = main_sample(start, interval, sample_size, total);
        let reserve_list = self.reserve_list(&main_sample, total, reserve_size);

        debug!(
            total,
            sample_size,
            reserve_size,
            interval,
            start,
            reserves = reserve_list.len(),
            "Drew systematic sample"
        );

        SamplingResult::new(params, interval, start, main_sample, reserve_list)
    }

    /// Shuffle every number outside the main sample and keep the first `reserve_size`.
    fn reserve_list(
        &mut self,
        main_sample: &[usize],
        total: usize,
        reserve_size: usize,
    ) -> Vec<usize> {
        let selected: HashSet<usize> = main_sample.iter().copied().collect();
        let mut remaining: Vec<usize> = (1..=total).filter(|n| !selected.contains(n)).collect();

        for i in (1..remaining.len()).rev() {
            let j = self.rng.uniform_inclusive(0, i);
            remaining.swap(i, j);
        }

        remaining.truncate(reserve_size);
        remaining
    }
}

/// `start + i*interval` for `i in 0..sample_size`, stopping at the first value past `total`.
///
/// With `start <= interval = floor(total / sample_size)` the last value is at
/// most `sample_size * interval <= total`, so the cut-off never fires for
/// engine-drawn starts.
fn main_sample(start: usize, interval: usize, sample_size: usize, total: usize) -> Vec<usize> {
    let mut sample = Vec::new();
    for i in 0..sample_size {
        match i.checked_mul(interval).and_then(|offset| offset.checked_add(start)) {
            Some(number) if number <= total => sample.push(number),
            _ => {
                warn!(
                    start,
                    interval,
                    kept = sample.len(),
                    requested = sample_size,
                    "Main sample ran past the population, truncating"
                );
                break;
            }
        }
    }
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParamCandidate;
    use crate::sampling::{validate, SeededRandom};
    use std::collections::VecDeque;

    /// Replays scripted draws, then always answers `high` (no-op swaps).
    struct ScriptedRandom {
        script: VecDeque<usize>,
    }

    impl ScriptedRandom {
        fn new(script: &[usize]) -> Self {
            Self {
                script: script.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn uniform_inclusive(&mut self, low: usize, high: usize) -> usize {
            match self.script.pop_front() {
                Some(value) => {
                    assert!(
                        (low..=high).contains(&value),
                        "scripted {value} outside [{low}, {high}]"
                    );
                    value
                }
                None => high,
            }
        }
    }

    /// Always answers `low`.
    struct LowestRandom;

    impl RandomSource for LowestRandom {
        fn uniform_inclusive(&mut self, low: usize, _high: usize) -> usize {
            low
        }
    }

    fn params(total: i64, sample_size: i64, reserve_size: i64) -> SamplingParams {
        validate(&ParamCandidate::new("Grade 6", total, sample_size, reserve_size)).unwrap()
    }

    #[test]
    fn test_scenario_thirty_six_three() {
        let mut engine = SamplingEngine::new(ScriptedRandom::new(&[2]));
        let result = engine.run(params(30, 6, 3));

        assert_eq!(result.interval(), 5);
        assert_eq!(result.start(), 2);
        assert_eq!(result.main_sample(), &[2, 7, 12, 17, 22, 27]);
        // Identity shuffle: first three numbers not in the main sample.
        assert_eq!(result.reserve_list(), &[1, 3, 4]);
        assert_eq!(result.grade(), "Grade 6");
    }

    #[test]
    fn test_full_population_sample() {
        let mut engine = SamplingEngine::new(SeededRandom::new(1));
        let result = engine.run(params(10, 10, 0));

        assert_eq!(result.interval(), 1);
        assert_eq!(result.start(), 1);
        assert_eq!(result.main_sample(), (1..=10).collect::<Vec<_>>().as_slice());
        assert!(result.reserve_list().is_empty());
    }

    #[test]
    fn test_shuffle_uses_fisher_yates_draws() {
        // total=6, n=2 -> k=3, start=1 -> main [1, 4], remaining [2, 3, 5, 6]
        // i=3 swap with 0 -> [6, 3, 5, 2]
        // i=2 swap with 0 -> [5, 3, 6, 2]
        // i=1 swap with 0 -> [3, 5, 6, 2]
        let mut engine = SamplingEngine::new(LowestRandom);
        let result = engine.run(params(6, 2, 4));

        assert_eq!(result.start(), 1);
        assert_eq!(result.main_sample(), &[1, 4]);
        assert_eq!(result.reserve_list(), &[3, 5, 6, 2]);
    }

    #[test]
    fn test_start_at_interval_upper_bound() {
        // total=11, n=3 -> k=3, start=3 -> [3, 6, 9]
        let mut engine = SamplingEngine::new(ScriptedRandom::new(&[3]));
        let result = engine.run(params(11, 3, 0));
        assert_eq!(result.main_sample(), &[3, 6, 9]);
    }

    #[test]
    fn test_main_sample_truncates_past_total() {
        assert_eq!(main_sample(4, 3, 4, 12), vec![4, 7, 10]);
        assert_eq!(main_sample(1, 3, 4, 12), vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_main_sample_does_not_preallocate_or_overflow() {
        // A requested size far beyond the population stops at the population.
        assert_eq!(main_sample(1, 1, usize::MAX, 3), vec![1, 2, 3]);
        // Offsets that overflow count as past the population.
        let half = usize::MAX / 2;
        assert_eq!(main_sample(2, half, 3, usize::MAX), vec![2, half + 2]);
    }

    #[test]
    fn test_properties_hold_for_all_small_inputs() {
        let mut engine = SamplingEngine::new(SeededRandom::new(2024));

        for total in 1..=40i64 {
            for sample_size in 1..=total {
                let spare = total - sample_size;
                for reserve_size in [0, spare.min(1), spare / 2, spare] {
                    let result = engine.run(params(total, sample_size, reserve_size));
                    let (n, k) = (sample_size as usize, result.interval());
                    let total = total as usize;

                    assert_eq!(k, total / n);
                    assert!(k >= 1);
                    assert!((1..=k).contains(&result.start()));

                    let main = result.main_sample();
                    assert_eq!(main.len(), n);
                    for (i, &number) in main.iter().enumerate() {
                        assert_eq!(number, result.start() + i * k);
                        assert!((1..=total).contains(&number));
                    }
                    assert!(main.windows(2).all(|w| w[0] < w[1]));

                    let reserve = result.reserve_list();
                    assert_eq!(reserve.len(), (reserve_size as usize).min(total - main.len()));
                    let unique: HashSet<_> = reserve.iter().collect();
                    assert_eq!(unique.len(), reserve.len());
                    for number in reserve {
                        assert!((1..=total).contains(number));
                        assert!(!main.contains(number));
                    }
                }
            }
        }
    }

    #[test]
    fn test_reserve_covers_whole_complement() {
        let mut engine = SamplingEngine::new(SeededRandom::new(5));
        let result = engine.run(params(12, 4, 8));

        let mut everything: Vec<usize> = result
            .main_sample()
            .iter()
            .chain(result.reserve_list())
            .copied()
            .collect();
        everything.sort_unstable();
        assert_eq!(everything, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_start_is_spread_over_interval() {
        let mut engine = SamplingEngine::new(SeededRandom::new(11));
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(engine.run(params(30, 6, 3)).start());
        }
        assert_eq!(seen, (1..=5).collect::<HashSet<_>>());
    }
}
