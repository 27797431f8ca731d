//! Seeded procedural texture synthesis
//!
//! The engine generates palette-mapped gradient noise fields, runs a
//! diffusion-style noise and denoise pipeline over existing images, and blends
//! procedural style textures into them. Every operation is deterministic for a
//! given seed. Jobs are plain request values that a bounded worker pool
//! executes in parallel, moving pixel buffers between threads instead of
//! sharing them.

#![forbid(unsafe_code)]

/// Job requests, cancellation and the worker pool
pub mod dispatch;
/// Input/output operations, configuration and error handling
pub mod io;
/// Random streams, sampling, interpolation and color math
pub mod math;
/// Gradient noise, value noise and palette mapping
pub mod noise;
/// RGBA pixel buffers
pub mod raster;
/// Image-to-image transforms
pub mod transform;

pub use io::error::{Result, SynthError};
