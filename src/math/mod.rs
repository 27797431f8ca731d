//! Mathematical utilities for the synthesis engine

/// sRGB and CIE L*a*b* color conversions
pub mod color;
/// Fade curves and interpolation primitives
pub mod interpolation;
/// Normal distribution sampling
pub mod probability;
/// Seeded deterministic random stream
pub mod random;
