//! Random draws for probabilistic decisions
//!
//! Every decision in a tick pulls from one sequential stream so that a
//! fixed seed and draw order reproduce a run exactly.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform draws in [0, 1)
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;

    /// Draw once and compare against a probability
    fn roll(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }
}

impl<R: RngCore + Send> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Default stream: seeded ChaCha8 when a seed is given, entropy otherwise
pub fn default_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(ChaCha8Rng::from_entropy()),
    }
}

/// Scripted draws, replayed in order
///
/// Once the script runs out every draw returns `fallback`, which defaults to
/// a value no probability below 1.0 can beat.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    draws: Vec<f64>,
    cursor: usize,
    fallback: f64,
}

impl SequenceRng {
    pub fn new(draws: Vec<f64>) -> Self {
        Self {
            draws,
            cursor: 0,
            fallback: 0.999_999,
        }
    }

    /// Value returned once the script is exhausted
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback.clamp(0.0, 0.999_999);
        self
    }

    /// Number of scripted draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor.min(self.draws.len())
    }

    pub fn remaining(&self) -> usize {
        self.draws.len().saturating_sub(self.cursor)
    }
}

impl RandomSource for SequenceRng {
    fn next_unit(&mut self) -> f64 {
        let value = self
            .draws
            .get(self.cursor)
            .copied()
            .unwrap_or(self.fallback);
        self.cursor += 1;
        value
    }
}
