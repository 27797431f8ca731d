//! CLI entry point for the procedural texture synthesis engine

use clap::Parser;
use texsynth::io::cli::{Cli, JobRunner};

fn main() -> texsynth::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let runner = JobRunner::new(cli);
    runner.run()
}
