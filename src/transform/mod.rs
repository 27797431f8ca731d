//! Image-to-image transforms

/// Iterative forward-noise / partial-denoise transform
pub mod diffusion;
/// Noise-texture style blending
pub mod style;

pub use diffusion::{DiffusionConfig, diffuse};
pub use style::{StyleConfig, stylize};
