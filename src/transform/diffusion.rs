//! Forward-noise / partial-denoise image transform
//!
//! Every step perturbs the current image with Gaussian noise whose strength
//! decays linearly, then pulls the result back towards the original image
//! with a strength that grows linearly. Both strengths are derived from the
//! step index alone. The last step adds no noise and applies the full
//! denoising strength.

use crate::dispatch::context::JobContext;
use crate::io::configuration::{
    DEFAULT_DENOISING_STRENGTH, DEFAULT_DIFFUSION_NOISE_SCALE, DEFAULT_DIFFUSION_STEPS,
    DEFAULT_SEED,
};
use crate::io::error::{Result, invalid_parameter};
use crate::math::interpolation::to_channel;
use crate::math::probability::gaussian;
use crate::math::random::SeededRandom;
use crate::raster::buffer::{CHANNELS, PixelBuffer};
use serde::Deserialize;

/// Parameters of a diffusion job
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiffusionConfig {
    /// Number of noise/denoise iterations
    pub steps: u32,
    /// Initial noise strength as a fraction of the channel range
    pub noise_scale: f64,
    /// Blend weight towards the original reached at the final step
    pub denoising_strength: f64,
    /// Seed of the Gaussian noise stream
    pub seed: u32,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_DIFFUSION_STEPS,
            noise_scale: DEFAULT_DIFFUSION_NOISE_SCALE,
            denoising_strength: DEFAULT_DENOISING_STRENGTH,
            seed: DEFAULT_SEED,
        }
    }
}

impl DiffusionConfig {
    /// Check every field before any pixel work begins
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` is zero, `noise_scale` is negative or not
    /// finite, or `denoising_strength` lies outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(invalid_parameter(
                "steps",
                &self.steps,
                &"at least one step is required",
            ));
        }
        if !self.noise_scale.is_finite() || self.noise_scale < 0.0 {
            return Err(invalid_parameter(
                "noise_scale",
                &self.noise_scale,
                &"must be a non-negative finite number",
            ));
        }
        if !(0.0..=1.0).contains(&self.denoising_strength) {
            return Err(invalid_parameter(
                "denoising_strength",
                &self.denoising_strength,
                &"must lie in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Noise strength applied at 1-based `step`
    pub fn noise_strength(&self, step: u32) -> f64 {
        self.noise_scale * (1.0 - self.progress(step))
    }

    /// Denoising strength applied at 1-based `step`
    pub fn denoise_strength(&self, step: u32) -> f64 {
        self.denoising_strength * self.progress(step)
    }

    fn progress(&self, step: u32) -> f64 {
        f64::from(step.min(self.steps)) / f64::from(self.steps.max(1))
    }
}

/// Run the diffusion transform over `image`
///
/// Cancellation is checked before every step. The returned buffer has the
/// same dimensions and alpha channel as the input.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the job is cancelled
#[tracing::instrument(skip_all, fields(steps = config.steps, seed = config.seed))]
pub fn diffuse(
    image: PixelBuffer,
    config: &DiffusionConfig,
    ctx: &JobContext,
) -> Result<PixelBuffer> {
    config.validate()?;

    let (width, height) = (image.width(), image.height());
    let original = image.into_raw();
    let mut current = original.clone();
    let mut noisy = vec![0u8; original.len()];
    let mut stream = SeededRandom::new(config.seed);

    for step in 1..=config.steps {
        ctx.checkpoint()?;

        let noise_strength = config.noise_strength(step);
        add_noise(&current, &mut noisy, noise_strength, &mut stream);

        let denoise_strength = config.denoise_strength(step);
        denoise(&noisy, &original, &mut current, denoise_strength);
    }

    PixelBuffer::from_raw(width, height, current)
}

/// Write `source` plus Gaussian noise (std-dev `255 * strength`) into `target`
///
/// Alpha is copied unchanged. With zero strength no draws are taken and the
/// copy is exact.
pub fn add_noise(source: &[u8], target: &mut [u8], strength: f64, stream: &mut SeededRandom) {
    let std_dev = 255.0 * strength;
    for (src, dst) in source
        .chunks_exact(CHANNELS)
        .zip(target.chunks_exact_mut(CHANNELS))
    {
        dst.copy_from_slice(src);
        if std_dev <= 0.0 {
            continue;
        }
        for channel in dst.iter_mut().take(CHANNELS - 1) {
            *channel = to_channel(f64::from(*channel) + gaussian(stream, 0.0, std_dev));
        }
    }
}

/// Blend `noisy` towards `original` by `strength` into `target`
///
/// Alpha is taken from `original`.
pub fn denoise(noisy: &[u8], original: &[u8], target: &mut [u8], strength: f64) {
    for ((n, o), dst) in noisy
        .chunks_exact(CHANNELS)
        .zip(original.chunks_exact(CHANNELS))
        .zip(target.chunks_exact_mut(CHANNELS))
    {
        for ((dst_channel, &noisy_value), &original_value) in
            dst.iter_mut().zip(n).zip(o).take(CHANNELS - 1)
        {
            let blended = f64::from(noisy_value)
                .mul_add(1.0 - strength, f64::from(original_value) * strength);
            *dst_channel = to_channel(blended);
        }
        if let (Some(dst_alpha), Some(&alpha)) = (dst.last_mut(), o.last()) {
            *dst_alpha = alpha;
        }
    }
}
