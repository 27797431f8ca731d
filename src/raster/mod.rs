//! Pixel storage shared by every synthesis job

/// Move-only RGBA buffer and dimension validation
pub mod buffer;

pub use buffer::PixelBuffer;
