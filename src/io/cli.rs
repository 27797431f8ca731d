//! Command-line interface for single jobs and manifest-driven batches

use crate::dispatch::context::JobContext;
use crate::dispatch::job::{Job, JobId, JobResponse};
use crate::dispatch::pool::WorkerPool;
use crate::io::configuration::{
    DEFAULT_AMPLITUDE, DEFAULT_COLOR_BLEND, DEFAULT_DENOISING_STRENGTH,
    DEFAULT_DIFFUSION_NOISE_SCALE, DEFAULT_DIFFUSION_STEPS, DEFAULT_NOISE_FREQUENCY,
    DEFAULT_NOISE_SCALE, DEFAULT_OCTAVES, DEFAULT_PERSISTENCE, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_SEED, DEFAULT_TEXTURE_SCALE, OUTPUT_SUFFIX, default_worker_count,
};
use crate::io::error::{Result, SynthError, pool_error};
use crate::io::image::{load_png, save_png};
use crate::io::manifest::Manifest;
use crate::io::progress::ProgressManager;
use crate::noise::field::NoiseConfig;
use crate::noise::palette::ColorStop;
use crate::transform::diffusion::DiffusionConfig;
use crate::transform::style::StyleConfig;
use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(name = "texsynth")]
#[command(
    author,
    version,
    about = "Generate and transform textures with seeded procedural noise"
)]
/// Command-line arguments for the synthesis tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and informational logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Maximum log level selected by the global flags
    pub const fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a palette-mapped noise field
    Noise(NoiseArgs),
    /// Run the diffusion pipeline over an image
    Diffuse(DiffuseArgs),
    /// Blend a style texture into an image
    Stylize(StylizeArgs),
    /// Run every job of a JSON manifest on the worker pool
    Batch(BatchArgs),
}

/// Options of the `noise` subcommand
#[derive(Args)]
pub struct NoiseArgs {
    /// Output width in pixels
    #[arg(short = 'W', long)]
    pub width: u32,

    /// Output height in pixels
    #[arg(short = 'H', long)]
    pub height: u32,

    /// Output PNG path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u32,

    /// Spatial frequency of the noise
    #[arg(long, default_value_t = DEFAULT_NOISE_SCALE)]
    pub scale: f64,

    /// Number of fractal octaves
    #[arg(long, default_value_t = DEFAULT_OCTAVES)]
    pub octaves: u32,

    /// Amplitude decay per octave
    #[arg(long, default_value_t = DEFAULT_PERSISTENCE)]
    pub persistence: f64,

    /// Vertical displacement of the palette gradient
    #[arg(long, default_value_t = DEFAULT_AMPLITUDE)]
    pub amplitude: f64,

    /// Palette stop as OFFSET:#RRGGBB, repeatable (default palette when omitted)
    #[arg(long = "stop", value_name = "OFFSET:#RRGGBB")]
    pub stops: Vec<ColorStop>,
}

impl NoiseArgs {
    /// Build the job configuration from the flags
    pub fn to_config(&self) -> NoiseConfig {
        let defaults = NoiseConfig::default();
        NoiseConfig {
            scale: self.scale,
            octaves: self.octaves,
            persistence: self.persistence,
            amplitude: self.amplitude,
            seed: self.seed,
            color_stops: if self.stops.is_empty() {
                defaults.color_stops
            } else {
                self.stops.clone()
            },
        }
    }
}

/// Options of the `diffuse` subcommand
#[derive(Args)]
pub struct DiffuseArgs {
    /// Source image
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output PNG path (defaults to `<input>_result.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of diffusion steps
    #[arg(long, default_value_t = DEFAULT_DIFFUSION_STEPS)]
    pub steps: u32,

    /// Noise strength at the first step
    #[arg(long, default_value_t = DEFAULT_DIFFUSION_NOISE_SCALE)]
    pub noise_scale: f64,

    /// Denoise strength reached at the last step
    #[arg(long, default_value_t = DEFAULT_DENOISING_STRENGTH)]
    pub denoising_strength: f64,

    /// Random seed for reproducible noise
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u32,
}

impl DiffuseArgs {
    /// Build the job configuration from the flags
    pub const fn to_config(&self) -> DiffusionConfig {
        DiffusionConfig {
            steps: self.steps,
            noise_scale: self.noise_scale,
            denoising_strength: self.denoising_strength,
            seed: self.seed,
        }
    }
}

/// Options of the `stylize` subcommand
#[derive(Args)]
pub struct StylizeArgs {
    /// Source image
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output PNG path (defaults to `<input>_result.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Frequency of the texture noise
    #[arg(long, default_value_t = DEFAULT_NOISE_FREQUENCY)]
    pub noise_frequency: f64,

    /// Add sinusoidal brush-stroke modulation
    #[arg(long)]
    pub brush_strokes: bool,

    /// Strength of the texture blend
    #[arg(long, default_value_t = DEFAULT_COLOR_BLEND)]
    pub color_blend: f64,

    /// Spatial scale of the texture, larger is coarser
    #[arg(long, default_value_t = DEFAULT_TEXTURE_SCALE)]
    pub texture_scale: f64,

    /// Random seed for the texture
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u32,
}

impl StylizeArgs {
    /// Build the job configuration from the flags
    pub const fn to_config(&self) -> StyleConfig {
        StyleConfig {
            noise_frequency: self.noise_frequency,
            brush_strokes: self.brush_strokes,
            color_blend: self.color_blend,
            texture_scale: self.texture_scale,
            seed: self.seed,
        }
    }
}

/// Options of the `batch` subcommand
#[derive(Args)]
pub struct BatchArgs {
    /// JSON manifest listing the jobs
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Worker threads (defaults to available parallelism)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Jobs queued before submission blocks
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,
}

/// Output path used when none is given: `<stem>_result.<ext>` beside the input
pub fn default_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path
        .extension()
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| OsStr::new("png"));
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Runs the selected subcommand
pub struct JobRunner {
    cli: Cli,
}

impl JobRunner {
    /// Create a runner for the parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read, a configuration is
    /// invalid, an output cannot be written, or any batch job fails
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Noise(args) => {
                let job = Job::Noise {
                    width: args.width,
                    height: args.height,
                    config: args.to_config(),
                };
                Self::run_single(job, &args.output)
            }
            Command::Diffuse(args) => {
                let job = Job::Diffusion {
                    source: load_png(&args.input)?,
                    config: args.to_config(),
                };
                let output = args
                    .output
                    .clone()
                    .unwrap_or_else(|| default_output_path(&args.input));
                Self::run_single(job, &output)
            }
            Command::Stylize(args) => {
                let job = Job::Style {
                    source: load_png(&args.input)?,
                    config: args.to_config(),
                };
                let output = args
                    .output
                    .clone()
                    .unwrap_or_else(|| default_output_path(&args.input));
                Self::run_single(job, &output)
            }
            Command::Batch(args) => self.run_batch(args),
        }
    }

    fn run_single(job: Job, output: &Path) -> Result<()> {
        let kind = job.kind();
        let ctx = JobContext::detached(JobId::new(1));
        let started = Instant::now();
        let buffer = job.execute(&ctx)?;
        save_png(&buffer, output)?;
        tracing::info!(
            %kind,
            width = buffer.width(),
            height = buffer.height(),
            output = %output.display(),
            elapsed = ?started.elapsed(),
            "job finished"
        );
        Ok(())
    }

    fn run_batch(&self, args: &BatchArgs) -> Result<()> {
        let manifest = Manifest::from_path(&args.manifest)?;
        let base_dir = args.manifest.parent().unwrap_or_else(|| Path::new(""));
        let total = manifest.jobs.len();
        if total == 0 {
            tracing::info!(manifest = %args.manifest.display(), "manifest lists no jobs");
            return Ok(());
        }

        // Resolve every entry up front so a bad manifest fails before any work starts
        let jobs = manifest
            .jobs
            .into_iter()
            .map(|entry| entry.into_job(base_dir))
            .collect::<Result<Vec<_>>>()?;
        for (job, _) in &jobs {
            job.validate()?;
        }

        let workers = args.workers.unwrap_or_else(default_worker_count);
        let mut pool = WorkerPool::new(workers, args.queue_capacity)?;
        let mut progress = if self.cli.should_show_progress() {
            ProgressManager::new(total)
        } else {
            ProgressManager::hidden(total)
        };
        tracing::info!(jobs = total, workers, "batch started");

        let mut outputs = HashMap::with_capacity(total);
        for (job, output) in jobs {
            let ticket = pool.submit(job)?;
            outputs.insert(ticket.id, output);
            while let Some(response) = pool.try_recv() {
                Self::handle_response(response, &outputs, &mut progress);
            }
        }
        while let Some(response) = pool.recv() {
            Self::handle_response(response, &outputs, &mut progress);
        }
        pool.shutdown();
        progress.finish();

        let failed = progress.failed();
        if failed > 0 {
            return Err(SynthError::BatchFailed { failed, total });
        }
        tracing::info!(jobs = total, "batch finished");
        Ok(())
    }

    fn handle_response(
        response: JobResponse,
        outputs: &HashMap<JobId, PathBuf>,
        progress: &mut ProgressManager,
    ) {
        let JobResponse {
            id,
            kind,
            elapsed,
            result,
        } = response;
        let written = result.and_then(|buffer| match outputs.get(&id) {
            Some(path) => save_png(&buffer, path),
            None => Err(pool_error(&format!("response for unknown job {id}"))),
        });
        if let Err(error) = &written {
            tracing::warn!(job = id.get(), %kind, %error, "job produced no output");
        }
        progress.complete_job(id, kind, elapsed, written.is_ok());
    }
}
