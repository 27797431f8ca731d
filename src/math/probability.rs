//! Normal distribution sampling on top of the seeded stream

use crate::math::random::SeededRandom;
use std::f64::consts::TAU;

/// Floor applied to the first uniform draw so its logarithm stays finite
pub const GAUSSIAN_EPSILON: f64 = 1e-12;

/// Draw a normally distributed value using the Box–Muller transform
///
/// Consumes exactly two draws from `stream`.
pub fn gaussian(stream: &mut SeededRandom, mean: f64, std_dev: f64) -> f64 {
    let u1 = stream.next_f64().max(GAUSSIAN_EPSILON);
    let u2 = stream.next_f64();
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    z.mul_add(std_dev, mean)
}
