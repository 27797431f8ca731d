//! Synthesis constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u32 = 42;

/// Default spatial frequency of the noise field
pub const DEFAULT_NOISE_SCALE: f64 = 0.01;
/// Default number of fractal octaves
pub const DEFAULT_OCTAVES: u32 = 4;
/// Largest accepted octave count; further layers fall below 8-bit precision
pub const MAX_OCTAVES: u32 = 32;
/// Default per-octave amplitude decay
pub const DEFAULT_PERSISTENCE: f64 = 0.5;
/// Default vertical displacement of the base gradient
pub const DEFAULT_AMPLITUDE: f64 = 0.2;
/// Default palette as `(offset, rgb)` pairs: deep blue through slate to parchment
pub const DEFAULT_COLOR_STOPS: [(f64, [u8; 3]); 3] = [
    (0.0, [0x0b, 0x1d, 0x3a]),
    (0.5, [0x3f, 0x7c, 0xac]),
    (1.0, [0xf4, 0xe9, 0xcd]),
];

/// Default number of diffusion steps
pub const DEFAULT_DIFFUSION_STEPS: u32 = 20;
/// Default initial noise strength of the diffusion pipeline
pub const DEFAULT_DIFFUSION_NOISE_SCALE: f64 = 0.3;
/// Default final denoising strength of the diffusion pipeline
pub const DEFAULT_DENOISING_STRENGTH: f64 = 0.7;

/// Default frequency of the style texture noise
pub const DEFAULT_NOISE_FREQUENCY: f64 = 0.05;
/// Default blend strength of the style texture
pub const DEFAULT_COLOR_BLEND: f64 = 0.5;
/// Default spatial scale of the style texture
pub const DEFAULT_TEXTURE_SCALE: f64 = 1.0;

// Brush stroke modulation is expressed in channel units
/// Channel offset applied at full brush modulation and unit blend strength
pub const BRUSH_STROKE_INTENSITY: f64 = 50.0;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed image width or height
pub const MAX_IMAGE_DIMENSION: u32 = 16_384;

// Worker pool settings
/// Number of queued jobs accepted before `submit` blocks
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

/// Number of worker threads used when none is requested
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}
