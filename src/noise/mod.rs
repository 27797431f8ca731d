//! Coherent noise generators and the palette-mapped noise field
//!
//! This module contains:
//! - Seeded Perlin gradient noise with fractal octaves
//! - Value noise for secondary textures
//! - Palette mapping from scalar samples to colors
//! - The noise field image generator

/// Noise field image generation
pub mod field;
/// Color stops and palette interpolation
pub mod palette;
/// Perlin gradient noise and permutation tables
pub mod perlin;
/// Lattice value noise
pub mod value;

pub use field::{NoiseConfig, generate_noise_field};
