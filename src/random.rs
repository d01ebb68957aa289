//! Injected random source.
//!
//! Every random decision in the engine (intelligence draw, damage
//! variance, critical rolls, narration choice) reads from a
//! `RandomSource` passed in by the caller. Nothing reads an ambient
//! generator, so two battles with independently seeded sources never
//! interfere.

use rand::RngCore;

/// A source of uniform draws in `[0, 1)`.
///
/// Every `rand` generator implements this, so production code passes
/// `rand::thread_rng()` and tests pass a seeded `ChaCha8Rng`.
///
/// # Examples
///
/// ```rust
/// use dinoarena::RandomSource;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let x = rng.next_unit();
/// assert!((0.0..1.0).contains(&x));
/// ```
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `low..=high`.
    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        let span = f64::from(high - low + 1);
        let offset = (self.next_unit() * span).floor() as u32;
        low + offset.min(high - low)
    }

    /// Uniform index into a slice of length `len` (`len > 0`).
    fn index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        // 53 random mantissa bits, the same construction `rand` uses for f64.
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Used to script exact battles. Values are clamped into `[0, 1)`.
///
/// # Examples
///
/// ```rust
/// use dinoarena::{RandomSource, SequenceRandom};
///
/// let mut rng = SequenceRandom::new(vec![0.25, 0.75]);
/// assert_eq!(rng.next_unit(), 0.25);
/// assert_eq!(rng.next_unit(), 0.75);
/// assert_eq!(rng.next_unit(), 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
