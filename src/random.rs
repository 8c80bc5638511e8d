//! Synthetic data generation
//!
//! Every value the pipeline reports is drawn here, from one seedable
//! source, within the documented range for its domain.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Gene expression fold change.
pub const GENE_EXPRESSION_RANGE: Range<f64> = 0.0..2.0;
/// Pathway enrichment score.
pub const PATHWAY_SCORE_RANGE: Range<f64> = 0.5..1.0;
/// Structural variant position.
pub const VARIANT_POSITION_RANGE: Range<u64> = 0..1_000_000;
/// Structural variant impact.
pub const VARIANT_IMPACT_RANGE: Range<f64> = 0.0..1.0;
/// Qubit coherence time in microseconds.
pub const COHERENCE_TIME_RANGE: Range<f64> = 50.0..100.0;
/// Gate error rate.
pub const GATE_ERROR_RANGE: Range<f64> = 0.0..0.01;
/// Quantum volume.
pub const QUANTUM_VOLUME_RANGE: Range<u32> = 512..1024;
/// Circuit depth in gates.
pub const CIRCUIT_DEPTH_RANGE: Range<u32> = 100..200;
/// Optimizer convergence rate.
pub const CONVERGENCE_RATE_RANGE: Range<f64> = 0.7..1.0;
/// Speedup over a classical baseline.
pub const SPEEDUP_RANGE: Range<f64> = 50.0..100.0;
/// Normalized trait prediction.
pub const TRAIT_VALUE_RANGE: Range<f64> = 0.5..1.0;
/// Trait prediction uncertainty.
pub const UNCERTAINTY_RANGE: Range<f64> = 0.0..0.1;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Seedable source of synthetic values.
///
/// # Example
///
/// ```rust
/// use genomic_pipeline::random::{RandomDataGenerator, PATHWAY_SCORE_RANGE};
///
/// let mut gen = RandomDataGenerator::seeded(7);
/// let score = gen.pathway_score();
/// assert!(PATHWAY_SCORE_RANGE.contains(&score));
/// ```
#[derive(Debug, Clone)]
pub struct RandomDataGenerator {
    rng: StdRng,
}

impl RandomDataGenerator {
    /// Generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded if `seed` is set, entropy otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Derive an independent child generator.
    ///
    /// Children forked in a fixed order from a seeded parent are themselves
    /// deterministic, regardless of the order in which they are consumed.
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.rng.gen())
    }

    /// Uniform value in `range`.
    pub fn uniform(&mut self, range: Range<f64>) -> f64 {
        self.rng.gen_range(range)
    }

    /// `base` perturbed by uniform noise in `[-half_width, half_width)`.
    pub fn jitter(&mut self, base: f64, half_width: f64) -> f64 {
        if half_width <= 0.0 {
            return base;
        }
        base + self.rng.gen_range(-half_width..half_width)
    }

    /// `true` with probability `p`; `p` outside `[0, 1]` is clamped, NaN never fires.
    pub fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() {
            return false;
        }
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform pick from a non-empty slice.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    /// Nine-character lowercase base-36 identifier.
    pub fn identifier(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| char::from(*self.pick(ID_ALPHABET)))
            .collect()
    }

    /// Gene expression fold change.
    pub fn gene_expression(&mut self) -> f64 {
        self.uniform(GENE_EXPRESSION_RANGE)
    }

    /// Pathway enrichment score.
    pub fn pathway_score(&mut self) -> f64 {
        self.uniform(PATHWAY_SCORE_RANGE)
    }

    /// Structural variant position.
    pub fn variant_position(&mut self) -> u64 {
        self.rng.gen_range(VARIANT_POSITION_RANGE)
    }

    /// Structural variant impact.
    pub fn variant_impact(&mut self) -> f64 {
        self.uniform(VARIANT_IMPACT_RANGE)
    }

    /// Coherence time in microseconds.
    pub fn coherence_time(&mut self) -> f64 {
        self.uniform(COHERENCE_TIME_RANGE)
    }

    /// Gate error rate.
    pub fn gate_error(&mut self) -> f64 {
        self.uniform(GATE_ERROR_RANGE)
    }

    /// Quantum volume.
    pub fn quantum_volume(&mut self) -> u32 {
        self.rng.gen_range(QUANTUM_VOLUME_RANGE)
    }

    /// Circuit depth.
    pub fn circuit_depth(&mut self) -> u32 {
        self.rng.gen_range(CIRCUIT_DEPTH_RANGE)
    }

    /// Convergence rate.
    pub fn convergence_rate(&mut self) -> f64 {
        self.uniform(CONVERGENCE_RATE_RANGE)
    }

    /// One energy landscape sample in `(-10, 0]`.
    pub fn energy(&mut self) -> f64 {
        -self.uniform(0.0..10.0)
    }

    /// Speedup factor.
    pub fn speedup(&mut self) -> f64 {
        self.uniform(SPEEDUP_RANGE)
    }

    /// Normalized trait value.
    pub fn trait_value(&mut self) -> f64 {
        self.uniform(TRAIT_VALUE_RANGE)
    }

    /// Prediction uncertainty.
    pub fn uncertainty(&mut self) -> f64 {
        self.uniform(UNCERTAINTY_RANGE)
    }

    /// `count` samples of `sample`.
    pub fn series(&mut self, count: usize, mut sample: impl FnMut(&mut Self) -> f64) -> Vec<f64> {
        (0..count).map(|_| sample(self)).collect()
    }
}

impl Default for RandomDataGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = RandomDataGenerator::seeded(42);
        let mut b = RandomDataGenerator::seeded(42);
        assert_eq!(a.identifier(), b.identifier());
        assert_eq!(a.coherence_time().to_bits(), b.coherence_time().to_bits());
    }

    #[test]
    fn test_identifier_shape() {
        let mut gen = RandomDataGenerator::seeded(1);
        let id = gen.identifier();
        assert_eq!(id.len(), 9);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_energy_is_non_positive() {
        let mut gen = RandomDataGenerator::seeded(3);
        for _ in 0..1000 {
            let e = gen.energy();
            assert!(e <= 0.0 && e > -10.0);
        }
    }

    #[test]
    fn test_jitter_zero_width_is_identity() {
        let mut gen = RandomDataGenerator::seeded(5);
        assert!((gen.jitter(30.0, 0.0) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_chance_extremes() {
        let mut gen = RandomDataGenerator::seeded(9);
        assert!(!gen.chance(0.0));
        assert!(gen.chance(1.0));
        assert!(gen.chance(7.0));
    }

    #[test]
    fn test_forks_differ_from_each_other() {
        let mut parent = RandomDataGenerator::seeded(11);
        let mut a = parent.fork();
        let mut b = parent.fork();
        assert_ne!(a.identifier(), b.identifier());
    }
}
