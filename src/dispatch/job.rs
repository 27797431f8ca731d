//! Job request/response contract between the orchestrator and workers
//!
//! A job is one message: its configuration plus, for image transforms, the
//! source buffer it takes ownership of. Executing a job consumes it and
//! yields exactly one result buffer.

use crate::dispatch::cancel::CancellationToken;
use crate::dispatch::context::JobContext;
use crate::io::error::{Result, invalid_parameter};
use crate::noise::field::{NoiseConfig, generate_noise_field, validate_dimensions};
use crate::raster::PixelBuffer;
use crate::transform::diffusion::{DiffusionConfig, diffuse};
use crate::transform::style::{StyleConfig, stylize};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Identifier correlating a request with its response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(u64);

impl JobId {
    /// Wrap a raw identifier
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three kinds of work a worker can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Palette-mapped noise field generation
    Noise,
    /// Diffusion-style transform of a source image
    Diffusion,
    /// Style texture blend of a source image
    Style,
}

impl JobKind {
    /// Lowercase name used in logs and manifests
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Noise => "noise",
            Self::Diffusion => "diffusion",
            Self::Style => "style",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration record of a request, tagged by `type` in manifests
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JobConfig {
    /// Noise field options
    Noise(NoiseConfig),
    /// Diffusion options
    Diffusion(DiffusionConfig),
    /// Style blend options
    Style(StyleConfig),
}

/// A validated unit of work
#[derive(Debug)]
pub enum Job {
    /// Generate a noise field from scratch
    Noise {
        /// Output width in pixels
        width: u32,
        /// Output height in pixels
        height: u32,
        /// Generation options
        config: NoiseConfig,
    },
    /// Diffuse a source image
    Diffusion {
        /// Image the worker takes ownership of
        source: PixelBuffer,
        /// Transform options
        config: DiffusionConfig,
    },
    /// Blend a style texture into a source image
    Style {
        /// Image the worker takes ownership of
        source: PixelBuffer,
        /// Blend options
        config: StyleConfig,
    },
}

impl Job {
    /// Assemble a job from the loosely shaped request fields
    ///
    /// Noise jobs need `width` and `height` and no source; transforms need a
    /// source, and any explicit dimensions must match it.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields do not fit the configuration type, or
    /// if noise dimensions are zero or above the size limit
    pub fn from_parts(
        source: Option<PixelBuffer>,
        width: Option<u32>,
        height: Option<u32>,
        config: JobConfig,
    ) -> Result<Self> {
        match config {
            JobConfig::Noise(config) => {
                if source.is_some() {
                    return Err(invalid_parameter(
                        "source_image",
                        &"present",
                        &"noise jobs generate from scratch and take no source image",
                    ));
                }
                match (width, height) {
                    (Some(width), Some(height)) => {
                        validate_dimensions(width, height)?;
                        Ok(Self::Noise {
                            width,
                            height,
                            config,
                        })
                    }
                    _ => Err(invalid_parameter(
                        "dimensions",
                        &format!("{width:?}x{height:?}"),
                        &"noise jobs require both width and height",
                    )),
                }
            }
            JobConfig::Diffusion(config) => {
                let source = require_source(source, width, height, JobKind::Diffusion)?;
                Ok(Self::Diffusion { source, config })
            }
            JobConfig::Style(config) => {
                let source = require_source(source, width, height, JobKind::Style)?;
                Ok(Self::Style { source, config })
            }
        }
    }

    /// Kind of work this job performs
    pub const fn kind(&self) -> JobKind {
        match self {
            Self::Noise { .. } => JobKind::Noise,
            Self::Diffusion { .. } => JobKind::Diffusion,
            Self::Style { .. } => JobKind::Style,
        }
    }

    /// Validate the configuration and output size without doing any pixel work
    ///
    /// # Errors
    ///
    /// Returns the first configuration or dimension error found
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Noise {
                width,
                height,
                config,
            } => {
                validate_dimensions(*width, *height)?;
                config.validate()
            }
            Self::Diffusion { config, .. } => config.validate(),
            Self::Style { config, .. } => config.validate(),
        }
    }

    /// Run the job to completion on the calling thread
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the job is
    /// cancelled; no partial buffer is ever produced
    #[tracing::instrument(skip_all, fields(job = ctx.id().get(), kind = %self.kind()))]
    pub fn execute(self, ctx: &JobContext) -> Result<PixelBuffer> {
        ctx.checkpoint()?;
        match self {
            Self::Noise {
                width,
                height,
                config,
            } => generate_noise_field(width, height, &config),
            Self::Diffusion { source, config } => diffuse(source, &config, ctx),
            Self::Style { source, config } => stylize(source, &config),
        }
    }
}

fn require_source(
    source: Option<PixelBuffer>,
    width: Option<u32>,
    height: Option<u32>,
    kind: JobKind,
) -> Result<PixelBuffer> {
    let Some(source) = source else {
        return Err(invalid_parameter(
            "source_image",
            &"missing",
            &format!("{kind} jobs require a source image"),
        ));
    };
    let width_matches = width.is_none_or(|w| w == source.width());
    let height_matches = height.is_none_or(|h| h == source.height());
    if !(width_matches && height_matches) {
        return Err(invalid_parameter(
            "dimensions",
            &format!("{width:?}x{height:?}"),
            &format!(
                "source image is {}x{}",
                source.width(),
                source.height()
            ),
        ));
    }
    Ok(source)
}

/// A job queued for a worker together with its correlation data
#[derive(Debug)]
pub struct JobRequest {
    /// Identifier echoed back in the response
    pub id: JobId,
    /// Work to perform
    pub job: Job,
    /// Token the caller can use to cancel the job
    pub cancel: CancellationToken,
}

/// The single response produced for every request
#[derive(Debug)]
pub struct JobResponse {
    /// Identifier of the originating request
    pub id: JobId,
    /// Kind of work performed
    pub kind: JobKind,
    /// Wall time spent executing the job
    pub elapsed: Duration,
    /// Result buffer, moved to the receiver, or the reason there is none
    pub result: Result<PixelBuffer>,
}
