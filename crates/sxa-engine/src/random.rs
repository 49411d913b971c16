//! Injectable randomness.
//!
//! Combat and mission draws only ever ask for a bounded integer or a unit
//! float, so the engine depends on this small capability rather than on a
//! concrete generator. Production sessions use a seeded [`StdRng`]; tests
//! feed a [`ScriptedRandomness`] with exact values.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// A source of random numbers.
pub trait Randomness {
    /// Uniform integer in `0..bound`. `bound` must be non-zero.
    fn next_int(&mut self, bound: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_float(&mut self) -> f64;
}

impl Randomness for StdRng {
    fn next_int(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }

    fn next_float(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// A replayable stream of predetermined values.
///
/// Integers and floats are queued separately. Queued integers are reduced
/// modulo the requested bound. When a queue runs dry it yields `0` /
/// `0.99` (a minimum roll and no critical hit).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandomness {
    ints: VecDeque<u32>,
    floats: VecDeque<f64>,
}

impl ScriptedRandomness {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue integer results.
    pub fn with_ints(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.ints.extend(values);
        self
    }

    /// Queue float results.
    pub fn with_floats(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(values);
        self
    }

    /// Number of queued integers not yet consumed.
    pub fn remaining_ints(&self) -> usize {
        self.ints.len()
    }
}

impl Randomness for ScriptedRandomness {
    fn next_int(&mut self, bound: u32) -> u32 {
        self.ints.pop_front().unwrap_or(0) % bound.max(1)
    }

    fn next_float(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(0.99)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            assert_eq!(a.next_int(10), b.next_int(10));
            assert_eq!(a.next_float().to_bits(), b.next_float().to_bits());
        }
    }

    #[test]
    fn seeded_rng_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            assert!(rng.next_int(10) < 10);
            let f = rng.next_float();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn scripted_values_in_order() {
        let mut rng = ScriptedRandomness::new()
            .with_ints([3, 14])
            .with_floats([0.1]);
        assert_eq!(rng.next_int(10), 3);
        assert_eq!(rng.next_int(10), 4);
        assert!((rng.next_float() - 0.1).abs() < f64::EPSILON);
        assert_eq!(rng.remaining_ints(), 0);
    }

    #[test]
    fn scripted_defaults_when_exhausted() {
        let mut rng = ScriptedRandomness::new();
        assert_eq!(rng.next_int(10), 0);
        assert!(rng.next_float() >= 0.2);
    }
}
