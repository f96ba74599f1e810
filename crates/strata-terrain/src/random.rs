//! Seeded random source: stateful uniform draws plus a stateless 2D noise field.
//!
//! Every pass of the generation pipeline shares one [`NoiseRandom`]. Draws
//! (`next_u32`, `int`, `double`) advance a ChaCha8 stream and therefore depend
//! on call order. Field samples (`noise`, [`NoiseField::octave_sum`]) are pure
//! functions of their coordinates and the seed.

use noise::{NoiseFn, Simplex};
use rand::distr::uniform::SampleRange;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Frequency applied to every field coordinate before sampling.
///
/// Pass scales (1.6, 7, 10, 16, 22, ...) are expressed in tiles; multiplying by
/// this brings them into the range where simplex noise varies smoothly.
pub const NOISE_FREQUENCY: f64 = 0.01;

/// Largest absolute value of a 1, 1/2, 1/4 weighted three-octave sum.
pub const MAX_OCTAVE_SUM: f64 = 1.75;

/// Immutable 2D simplex noise field.
///
/// Holds no mutable state, so a shared reference can be sampled from many
/// threads at once.
#[derive(Clone, Debug)]
pub struct NoiseField {
    simplex: Simplex,
}

impl NoiseField {
    /// Create a field for the given world seed.
    pub fn new(seed: u64) -> Self {
        Self {
            simplex: Simplex::new(seed as u32),
        }
    }

    /// Sample the field at `(x, y)`. Output lies in roughly `[-1, 1]`.
    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.simplex.get([x * NOISE_FREQUENCY, y * NOISE_FREQUENCY])
    }

    /// Three-octave sum at base `scale`: octaves at `scale`, `scale / 2` and
    /// `scale / 4`, weighted 1, 1/2 and 1/4.
    ///
    /// Nominal magnitude is at most [`MAX_OCTAVE_SUM`].
    pub fn octave_sum(&self, x: f64, y: f64, scale: f64) -> f64 {
        let mut total = 0.0;
        let mut divisor = 1.0;
        for _ in 0..3 {
            total += self.sample(x * scale / divisor, y * scale / divisor) / divisor;
            divisor *= 2.0;
        }
        total
    }
}

/// Deterministic random/noise source seeded once per generator.
#[derive(Clone, Debug)]
pub struct NoiseRandom {
    rng: ChaCha8Rng,
    field: NoiseField,
}

impl NoiseRandom {
    /// Seed a new source. The same seed always yields the same sequence.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            field: NoiseField::new(seed),
        }
    }

    /// Raw stateful draw.
    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    /// Uniform integer over `range`.
    ///
    /// The bound convention is chosen by the caller: `a..b` excludes `b`,
    /// `a..=b` includes it.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    pub fn int<R: SampleRange<i32>>(&mut self, range: R) -> i32 {
        self.rng.random_range(range)
    }

    /// Uniform real in `[min, max)`.
    ///
    /// Returns `min` without drawing when the range is empty, contains a NaN,
    /// or has a non-finite width.
    pub fn double(&mut self, min: f64, max: f64) -> f64 {
        if !(min < max && (max - min).is_finite()) {
            return min;
        }
        self.rng.random_range(min..max)
    }

    /// Sample the stateless noise field at `(x, y)`.
    #[inline]
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        self.field.sample(x, y)
    }

    /// Borrow the stateless noise field.
    pub fn field(&self) -> &NoiseField {
        &self.field
    }
}
