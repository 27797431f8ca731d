//! Move-only RGBA pixel buffer handed between the orchestrator and workers
//!
//! `PixelBuffer` implements neither `Clone` nor `Copy`: handing
//! a buffer to a job moves its allocation, so the sender cannot observe or
//! mutate it afterwards and concurrent jobs never alias the same memory.

use crate::io::configuration::MAX_IMAGE_DIMENSION;
use crate::io::error::{Result, SynthError};

/// Number of channels per pixel (RGBA)
pub const CHANNELS: usize = 4;

/// Index of the alpha channel within a pixel
pub const ALPHA_CHANNEL: usize = 3;

/// Flat RGBA8 image with a fixed length of `width * height * 4`
#[derive(Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a transparent black buffer
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension exceeds the supported maximum
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Wrap existing RGBA data, taking ownership of the allocation
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension exceeds the supported maximum or
    /// if `data.len()` differs from `width * height * 4`
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(SynthError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Length of the channel data in bytes
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds zero pixels
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Channel data in row-major RGBA order
    pub const fn as_bytes(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Mutable channel data in row-major RGBA order
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Release the underlying allocation
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`, or `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let rgba = self.data.get(start..start + CHANNELS)?;
        <[u8; 4]>::try_from(rgba).ok()
    }
}

/// Byte length of an RGBA image, validating the dimensions first
///
/// # Errors
///
/// Returns an error if either dimension exceeds the supported maximum
pub fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(SynthError::DimensionTooLarge {
            width,
            height,
            max: MAX_IMAGE_DIMENSION,
        });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(SynthError::DimensionTooLarge {
            width,
            height,
            max: MAX_IMAGE_DIMENSION,
        })
}
