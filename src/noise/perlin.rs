//! Seeded two-dimensional gradient noise with fractal octave summation
//!
//! The permutation table is shuffled once per seed and duplicated to 512
//! entries so corner hashing never needs a wrap-around check. Sampling is
//! allocation-free; it runs once per output pixel per octave.

use crate::io::configuration::MAX_OCTAVES;
use crate::math::interpolation::{fade, lerp};
use crate::math::random::SeededRandom;

/// Number of distinct lattice cells along each axis before the pattern repeats
pub const TABLE_SIZE: usize = 256;

/// Frequency multiplier between successive octaves
pub const LACUNARITY: f64 = 2.0;

/// Shuffled lattice hash table, duplicated to avoid index wrapping
#[derive(Debug, Clone)]
pub struct PermutationTable {
    values: [u8; TABLE_SIZE * 2],
}

impl PermutationTable {
    /// Build the table for `seed` with a Fisher–Yates pass over `0..=255`
    pub fn new(seed: u32) -> Self {
        let mut stream = SeededRandom::new(seed);
        let mut base: [u8; TABLE_SIZE] = std::array::from_fn(|i| i as u8);
        for i in (1..TABLE_SIZE).rev() {
            let j = stream.next_index(i + 1);
            base.swap(i, j);
        }

        let values =
            std::array::from_fn(|i| base.get(i % TABLE_SIZE).copied().unwrap_or_default());
        Self { values }
    }

    /// All 512 entries
    pub const fn as_slice(&self) -> &[u8] {
        &self.values
    }

    // Callers mask lattice coordinates to 0..=255 so every lookup stays below 512
    #[allow(clippy::indexing_slicing)]
    #[inline]
    fn at(&self, index: usize) -> usize {
        usize::from(self.values[index])
    }
}

/// Perlin gradient noise generator for a single seed
#[derive(Debug, Clone)]
pub struct GradientNoise {
    permutation: PermutationTable,
}

impl GradientNoise {
    /// Create a generator whose lattice is shuffled by `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            permutation: PermutationTable::new(seed),
        }
    }

    /// Permutation table backing this generator
    pub const fn permutation(&self) -> &PermutationTable {
        &self.permutation
    }

    /// Sample the noise field at `(x, y)`, result in `[-1, 1]`
    ///
    /// Integer lattice points always sample to zero.
    #[inline]
    pub fn noise_2d(&self, x: f64, y: f64) -> f64 {
        let cell_x = x.floor();
        let cell_y = y.floor();
        let xi = (cell_x as i64 & 255) as usize;
        let yi = (cell_y as i64 & 255) as usize;
        let xf = x - cell_x;
        let yf = y - cell_y;

        let u = fade(xf);
        let v = fade(yf);

        let p = &self.permutation;
        let a = p.at(xi) + yi;
        let b = p.at(xi + 1) + yi;

        let bottom = lerp(
            gradient(p.at(a), xf, yf),
            gradient(p.at(b), xf - 1.0, yf),
            u,
        );
        let top = lerp(
            gradient(p.at(a + 1), xf, yf - 1.0),
            gradient(p.at(b + 1), xf - 1.0, yf - 1.0),
            u,
        );

        lerp(bottom, top, v).clamp(-1.0, 1.0)
    }

    /// Fractal sum of `octaves` noise layers, normalized back into `[-1, 1]`
    ///
    /// Each octave doubles the frequency and multiplies the amplitude by
    /// `persistence`. A single octave returns exactly [`Self::noise_2d`].
    /// Octaves beyond [`MAX_OCTAVES`] are ignored so the frequency stays finite.
    #[inline]
    pub fn octave_noise(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut amplitude_sum = 0.0;

        for _ in 0..octaves.min(MAX_OCTAVES) {
            total += self.noise_2d(x * frequency, y * frequency) * amplitude;
            amplitude_sum += amplitude;
            amplitude *= persistence;
            frequency *= LACUNARITY;
        }

        if amplitude_sum <= 0.0 {
            return 0.0;
        }
        (total / amplitude_sum).clamp(-1.0, 1.0)
    }
}

// Diagonal gradient selected by the low two hash bits, dotted with (x, y)
#[inline]
const fn gradient(hash: usize, x: f64, y: f64) -> f64 {
    match hash & 3 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        _ => -x - y,
    }
}
