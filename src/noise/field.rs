//! Noise field image generation
//!
//! Each pixel starts from a vertical gradient position (0 at the top row,
//! 1 at the bottom row), displaced by fractal noise scaled by `amplitude`,
//! and is colored through the palette.

use crate::io::configuration::{
    DEFAULT_AMPLITUDE, DEFAULT_COLOR_STOPS, DEFAULT_NOISE_SCALE, DEFAULT_OCTAVES,
    DEFAULT_PERSISTENCE, DEFAULT_SEED, MAX_OCTAVES,
};
use crate::io::error::{Result, invalid_parameter};
use crate::noise::palette::{ColorStop, Palette};
use crate::noise::perlin::GradientNoise;
use crate::raster::buffer::{CHANNELS, PixelBuffer, byte_len};
use serde::Deserialize;

/// Parameters of a noise field job
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoiseConfig {
    /// Spatial frequency applied to pixel coordinates
    pub scale: f64,
    /// Number of fractal layers
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves
    pub persistence: f64,
    /// Vertical displacement of the base gradient by the noise value
    pub amplitude: f64,
    /// Seed of the permutation table
    pub seed: u32,
    /// Ordered palette anchors
    pub color_stops: Vec<ColorStop>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_NOISE_SCALE,
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            amplitude: DEFAULT_AMPLITUDE,
            seed: DEFAULT_SEED,
            color_stops: DEFAULT_COLOR_STOPS
                .iter()
                .map(|&(offset, color)| ColorStop::new(offset, color))
                .collect(),
        }
    }
}

impl NoiseConfig {
    /// Check every field before any pixel work begins
    ///
    /// # Errors
    ///
    /// Returns an error if `scale` is not a positive finite number, `octaves`
    /// is zero or above [`MAX_OCTAVES`], `persistence` lies outside `(0, 1]`,
    /// `amplitude` is not finite, or the color stops are malformed
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(invalid_parameter(
                "scale",
                &self.scale,
                &"must be a positive finite number",
            ));
        }
        if self.octaves == 0 {
            return Err(invalid_parameter(
                "octaves",
                &self.octaves,
                &"at least one octave is required",
            ));
        }
        if self.octaves > MAX_OCTAVES {
            return Err(invalid_parameter(
                "octaves",
                &self.octaves,
                &format!("at most {MAX_OCTAVES} octaves are supported"),
            ));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(invalid_parameter(
                "persistence",
                &self.persistence,
                &"must lie in (0, 1]",
            ));
        }
        if !self.amplitude.is_finite() {
            return Err(invalid_parameter(
                "amplitude",
                &self.amplitude,
                &"must be finite",
            ));
        }
        crate::noise::palette::validate_color_stops(&self.color_stops)
    }
}

/// Check that a `width` x `height` field is non-empty and within the size limit
///
/// # Errors
///
/// Returns an error if either dimension is zero or exceeds the maximum
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(invalid_parameter(
            "dimensions",
            &format!("{width}x{height}"),
            &"width and height must be at least 1",
        ));
    }
    byte_len(width, height).map(|_| ())
}

/// Render a `width` x `height` noise field
///
/// # Errors
///
/// Returns an error if the configuration is invalid, either dimension is
/// zero, or the image would exceed the maximum dimension
#[tracing::instrument(skip(config), fields(seed = config.seed, octaves = config.octaves))]
pub fn generate_noise_field(width: u32, height: u32, config: &NoiseConfig) -> Result<PixelBuffer> {
    config.validate()?;
    validate_dimensions(width, height)?;

    let palette = Palette::new(&config.color_stops)?;
    let noise = GradientNoise::new(config.seed);
    let mut buffer = PixelBuffer::new(width, height)?;

    let row_len = width as usize * CHANNELS;
    let gradient_span = f64::from(height.saturating_sub(1).max(1));

    for (y, row) in buffer.as_bytes_mut().chunks_exact_mut(row_len).enumerate() {
        let base = y as f64 / gradient_span;
        let ny = y as f64 * config.scale;
        for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let n = noise.octave_noise(
                x as f64 * config.scale,
                ny,
                config.octaves,
                config.persistence,
            );
            let [r, g, b] = palette.color_at(n.mul_add(config.amplitude, base));
            if let [pr, pg, pb, pa] = pixel {
                *pr = r;
                *pg = g;
                *pb = b;
                *pa = u8::MAX;
            }
        }
    }

    tracing::debug!(width, height, "noise field generated");
    Ok(buffer)
}
