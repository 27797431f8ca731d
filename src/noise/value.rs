//! Smooth value noise used for style textures
//!
//! Random values sit on an integer lattice and are blended with a cubic
//! smoothstep. Lattice values and the hash permutation come from a
//! seeded `StdRng`, independent of the gradient noise stream.

use crate::math::interpolation::{lerp, smoothstep};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

const LATTICE_SIZE: usize = 256;

/// Seeded lattice value noise with output in `[-1, 1]`
#[derive(Debug, Clone)]
pub struct ValueNoise {
    lattice: [f64; LATTICE_SIZE],
    permutation: [u8; LATTICE_SIZE * 2],
}

impl ValueNoise {
    /// Build the lattice for `seed`
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let lattice = std::array::from_fn(|_| rng.random_range(-1.0..=1.0));

        let mut order: Vec<u8> = (0..=u8::MAX).collect();
        order.shuffle(&mut rng);
        let permutation =
            std::array::from_fn(|i| order.get(i % LATTICE_SIZE).copied().unwrap_or_default());

        Self {
            lattice,
            permutation,
        }
    }

    /// Sample the noise at `(x, y)`
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let cell_x = x.floor();
        let cell_y = y.floor();
        let xi = (cell_x as i64 & 255) as usize;
        let yi = (cell_y as i64 & 255) as usize;
        let u = smoothstep(x - cell_x);
        let v = smoothstep(y - cell_y);

        let bottom = lerp(self.corner(xi, yi), self.corner(xi + 1, yi), u);
        let top = lerp(self.corner(xi, yi + 1), self.corner(xi + 1, yi + 1), u);
        lerp(bottom, top, v).clamp(-1.0, 1.0)
    }

    /// Sample remapped into `[0, 1]`
    pub fn sample_unit(&self, x: f64, y: f64) -> f64 {
        (self.sample(x, y) + 1.0) * 0.5
    }

    fn corner(&self, xi: usize, yi: usize) -> f64 {
        let row = self.hash(xi);
        let index = self.hash(row + yi);
        self.lattice.get(index).copied().unwrap_or_default()
    }

    fn hash(&self, index: usize) -> usize {
        self.permutation
            .get(index)
            .copied()
            .map_or(0, usize::from)
    }
}
