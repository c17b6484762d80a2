//! Injectable randomness for update rules.
//!
//! Update rules never reach for a global generator; they draw from the
//! [`SimRng`] handed to them by the store. A seeded `SimRng` replays the same
//! draw sequence, and a scripted one returns fixed values for tests.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of unit draws.
pub trait RandomSource: Send {
    /// Next draw, nominally in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Test double that replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<f64>,
    pending: VecDeque<f64>,
}

impl ScriptedSource {
    /// An empty script always yields `0.5`, the neutral draw for unbiased jitter.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let script: Vec<f64> = values.into_iter().collect();
        Self {
            pending: script.iter().copied().collect(),
            script,
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.script.is_empty() {
            return 0.5;
        }
        if self.pending.is_empty() {
            self.pending.extend(self.script.iter().copied());
        }
        self.pending.pop_front().unwrap_or(0.5)
    }
}

/// Random handle passed to every update rule.
pub struct SimRng {
    source: Box<dyn RandomSource>,
    draws: u64,
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self::from_source(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_source(StdRng::from_entropy())
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn scripted(values: impl IntoIterator<Item = f64>) -> Self {
        Self::from_source(ScriptedSource::new(values))
    }

    pub fn from_source(source: impl RandomSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            draws: 0,
        }
    }

    /// Raw draw, the equivalent of `Math.random()`.
    pub fn unit(&mut self) -> f64 {
        self.draws += 1;
        self.source.next_unit()
    }

    /// `(random() - bias) * scale`
    pub fn jitter(&mut self, bias: f64, scale: f64) -> f64 {
        (self.unit() - bias) * scale
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform index in `0..n`. Returns 0 when `n` is 0.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let idx = (self.unit() * n as f64).floor();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(n - 1)
        }
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.below(items.len());
        items.get(idx)
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl std::fmt::Debug for SimRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimRng").field("draws", &self.draws).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_cycles() {
        let mut rng = SimRng::scripted([0.1, 0.9]);
        assert_eq!(rng.unit(), 0.1);
        assert_eq!(rng.unit(), 0.9);
        assert_eq!(rng.unit(), 0.1);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn empty_script_is_neutral() {
        let mut rng = SimRng::scripted(Vec::<f64>::new());
        assert_eq!(rng.jitter(0.5, 10.0), 0.0);
    }

    #[test]
    fn below_stays_in_range_for_out_of_range_draws() {
        let mut rng = SimRng::scripted([1.0, 7.5, -2.0]);
        assert_eq!(rng.below(3), 2);
        assert_eq!(rng.below(3), 2);
        assert_eq!(rng.below(3), 0);
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn pick_on_empty_slice_is_none() {
        let mut rng = SimRng::seeded(1);
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
    }
}
