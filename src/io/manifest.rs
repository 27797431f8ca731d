//! JSON batch manifests describing many jobs at once
//!
//! ```json
//! {
//!   "jobs": [
//!     { "output": "sky.png", "width": 256, "height": 256,
//!       "config": { "type": "noise", "octaves": 5, "seed": 7 } },
//!     { "source": "photo.png", "output": "photo_soft.png",
//!       "config": { "type": "diffusion", "steps": 12, "noiseScale": 0.2 } }
//!   ]
//! }
//! ```

use crate::dispatch::job::{Job, JobConfig};
use crate::io::error::{Result, SynthError};
use crate::io::image::load_png;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One entry of a manifest, mirroring the job request shape
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestEntry {
    /// Source image for transform jobs
    #[serde(default)]
    pub source: Option<PathBuf>,
    /// Output width for noise jobs
    #[serde(default)]
    pub width: Option<u32>,
    /// Output height for noise jobs
    #[serde(default)]
    pub height: Option<u32>,
    /// Where the result is written
    pub output: PathBuf,
    /// Job options
    pub config: JobConfig,
}

impl ManifestEntry {
    /// Load the source image (if any) and build the job
    ///
    /// Relative paths are resolved against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be loaded or the fields do not
    /// fit the configuration type
    pub fn into_job(self, base_dir: &Path) -> Result<(Job, PathBuf)> {
        let source = self
            .source
            .map(|path| load_png(base_dir.join(path)))
            .transpose()?;
        let job = Job::from_parts(source, self.width, self.height, self.config)?;
        Ok((job, base_dir.join(self.output)))
    }
}

/// A list of jobs to run through the worker pool
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Entries in submission order
    pub jobs: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse a manifest from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest
    pub fn from_json(text: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SynthError::Manifest {
            path: origin.to_path_buf(),
            source: e,
        })
    }

    /// Read and parse a manifest file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SynthError::FileSystem {
            path: path.to_path_buf(),
            operation: "read manifest",
            source: e,
        })?;
        Self::from_json(&text, path)
    }
}
