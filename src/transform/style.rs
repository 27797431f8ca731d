//! Noise-texture style blending with optional brush-stroke modulation

use crate::io::configuration::{
    BRUSH_STROKE_INTENSITY, DEFAULT_COLOR_BLEND, DEFAULT_NOISE_FREQUENCY, DEFAULT_SEED,
    DEFAULT_TEXTURE_SCALE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::math::interpolation::to_channel;
use crate::noise::value::ValueNoise;
use crate::raster::buffer::{CHANNELS, PixelBuffer};
use ndarray::Array2;
use serde::Deserialize;
use std::f64::consts::TAU;

/// Parameters of a style blend job
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    /// Frequency of the texture noise in cycles per pixel
    pub noise_frequency: f64,
    /// Add sinusoidal brush-stroke modulation
    pub brush_strokes: bool,
    /// Strength of the texture blend
    pub color_blend: f64,
    /// Spatial scale of the texture; larger values stretch it
    pub texture_scale: f64,
    /// Seed of the texture noise
    pub seed: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            noise_frequency: DEFAULT_NOISE_FREQUENCY,
            brush_strokes: false,
            color_blend: DEFAULT_COLOR_BLEND,
            texture_scale: DEFAULT_TEXTURE_SCALE,
            seed: DEFAULT_SEED,
        }
    }
}

impl StyleConfig {
    /// Check every field before any pixel work begins
    ///
    /// # Errors
    ///
    /// Returns an error if `noise_frequency` or `texture_scale` is not a
    /// positive finite number, or `color_blend` is not finite
    pub fn validate(&self) -> Result<()> {
        if !self.noise_frequency.is_finite() || self.noise_frequency <= 0.0 {
            return Err(invalid_parameter(
                "noise_frequency",
                &self.noise_frequency,
                &"must be a positive finite number",
            ));
        }
        if !self.texture_scale.is_finite() || self.texture_scale <= 0.0 {
            return Err(invalid_parameter(
                "texture_scale",
                &self.texture_scale,
                &"must be a positive finite number",
            ));
        }
        if !self.color_blend.is_finite() {
            return Err(invalid_parameter(
                "color_blend",
                &self.color_blend,
                &"must be finite",
            ));
        }
        Ok(())
    }
}

/// Build the per-pixel texture, indexed `(row, col)`, with values in `[0, 1]`
pub fn build_texture(width: u32, height: u32, config: &StyleConfig) -> Array2<f64> {
    let noise = ValueNoise::new(u64::from(config.seed));
    let frequency = config.noise_frequency / config.texture_scale;
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        noise.sample_unit(x as f64 * frequency, y as f64 * frequency)
    })
}

/// Blend a noise texture into `image`
///
/// Color channels become `c * (1 + (t - 0.5) * blend)`, plus
/// `sin(2πt) * blend * 50` when brush strokes are enabled. Alpha passes
/// through untouched.
///
/// # Errors
///
/// Returns an error if the configuration is invalid
#[tracing::instrument(skip_all, fields(seed = config.seed, brush_strokes = config.brush_strokes))]
pub fn stylize(mut image: PixelBuffer, config: &StyleConfig) -> Result<PixelBuffer> {
    config.validate()?;

    let texture = build_texture(image.width(), image.height(), config);
    let strength = config.color_blend;

    for (pixel, &t) in image
        .as_bytes_mut()
        .chunks_exact_mut(CHANNELS)
        .zip(texture.iter())
    {
        let gain = (t - 0.5).mul_add(strength, 1.0);
        let stroke = if config.brush_strokes {
            (t * TAU).sin() * strength * BRUSH_STROKE_INTENSITY
        } else {
            0.0
        };
        for channel in pixel.iter_mut().take(CHANNELS - 1) {
            *channel = to_channel(f64::from(*channel).mul_add(gain, stroke));
        }
    }

    Ok(image)
}
