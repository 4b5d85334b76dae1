//! Randomness capability for the sampling engine.
//!
//! The engine never touches a global RNG: it draws through `RandomSource`, so
//! a seeded or scripted source can be swapped in.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Uniform integer in `[low, high]`, both inclusive. Requires `low <= high`.
    fn uniform_inclusive(&mut self, low: usize, high: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_inclusive(&mut self, low: usize, high: usize) -> usize {
        (**self).uniform_inclusive(low, high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform_inclusive(&mut self, low: usize, high: usize) -> usize {
        (**self).uniform_inclusive(low, high)
    }
}

/// Thread-local OS-seeded generator; every run is independently randomized.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform_inclusive(&mut self, low: usize, high: usize) -> usize {
        rand::rng().random_range(low..=high)
    }
}

/// Reproducible generator seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.rng.random_range(low..=high)
    }
}

/// Pick a seeded source when a seed is given, else the thread generator.
pub fn source_for(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}
