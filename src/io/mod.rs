//! Input/output adapters, configuration constants and error handling

/// Command-line argument parsing and subcommand runner
pub mod cli;
/// Default parameters and resource limits
pub mod configuration;
/// Error types for the synthesis engine
pub mod error;
/// PNG import and export
pub mod image;
/// JSON batch manifests
pub mod manifest;
/// Batch progress display
pub mod progress;
