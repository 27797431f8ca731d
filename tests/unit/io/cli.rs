//! Tests for command-line parsing and subcommand execution

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use texsynth::SynthError;
    use texsynth::io::cli::{Cli, Command, JobRunner, default_output_path};
    use texsynth::io::configuration::{DEFAULT_OCTAVES, DEFAULT_SEED};
    use texsynth::io::image::{load_png, save_png};
    use texsynth::noise::palette::ColorStop;
    use texsynth::raster::PixelBuffer;
    use tracing::Level;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("texsynth").chain(args.iter().copied()))
    }

    fn write_source(dir: &Path) -> PathBuf {
        let path = dir.join("photo.png");
        let data = (0..8 * 8 * 4).map(|i| (i * 7 % 256) as u8).collect();
        let buffer = PixelBuffer::from_raw(8, 8, data).expect("valid data");
        save_png(&buffer, &path).expect("save succeeds");
        path
    }

    // Tests the noise subcommand takes defaults from configuration
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_parse_noise_defaults() {
        let cli = parse(&["noise", "--width", "16", "--height", "8", "--output", "n.png"]);
        let Command::Noise(args) = &cli.command else {
            panic!("expected noise subcommand");
        };
        let config = args.to_config();
        assert_eq!((args.width, args.height), (16, 8));
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.octaves, DEFAULT_OCTAVES);
        assert_eq!(config.color_stops.len(), 3);
        assert!(cli.should_show_progress());
        assert_eq!(cli.log_level(), Level::INFO);
    }

    // Tests repeated stop flags replace the default palette
    // Verified by appending parsed stops to the defaults
    #[test]
    fn test_parse_noise_stops() {
        let cli = parse(&[
            "noise", "-W", "4", "-H", "4", "-o", "n.png", "--seed", "9",
            "--stop", "0:#000000", "--stop", "1:#ffffff",
        ]);
        let Command::Noise(args) = &cli.command else {
            panic!("expected noise subcommand");
        };
        let config = args.to_config();
        assert_eq!(config.seed, 9);
        assert_eq!(
            config.color_stops,
            vec![ColorStop::new(0.0, [0, 0, 0]), ColorStop::new(1.0, [255, 255, 255])]
        );
        let malformed = ["texsynth", "noise", "-W", "4", "-H", "4", "-o", "n.png", "--stop", "x"];
        assert!(Cli::try_parse_from(malformed).is_err());
    }

    // Tests transform subcommands and global flags
    // Verified by making --quiet local to the top-level command
    #[test]
    fn test_parse_transform_subcommands() {
        let cli = parse(&["diffuse", "in.png", "--steps", "5", "--noise-scale", "0.1", "-q"]);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_level(), Level::WARN);
        let Command::Diffuse(args) = &cli.command else {
            panic!("expected diffuse subcommand");
        };
        assert_eq!(args.input, PathBuf::from("in.png"));
        assert_eq!(args.to_config().steps, 5);
        assert!(args.output.is_none());

        let cli = parse(&[
            "--verbose",
            "stylize",
            "in.png",
            "--brush-strokes",
            "--color-blend",
            "0.8",
        ]);
        assert_eq!(cli.log_level(), Level::DEBUG);
        let Command::Stylize(args) = &cli.command else {
            panic!("expected stylize subcommand");
        };
        assert!(args.to_config().brush_strokes);

        assert!(Cli::try_parse_from(["texsynth", "batch", "m.json", "-q", "-v"]).is_err());
    }

    // Tests output filename generation with suffix
    // Verified by changing output suffix to verify path generation
    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("dir/photo.png")),
            PathBuf::from("dir/photo_result.png")
        );
        assert_eq!(
            default_output_path(Path::new("photo")),
            PathBuf::from("photo_result.png")
        );
    }

    // Tests the noise subcommand writes a PNG of the requested size
    // Verified by skipping the save step
    #[test]
    fn test_run_noise_writes_output() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = temp_dir.path().join("noise.png");
        let output_arg = output.to_string_lossy().to_string();
        let cli = parse(&["noise", "-W", "12", "-H", "6", "-o", &output_arg, "-q"]);

        JobRunner::new(cli).run().expect("noise run succeeds");
        let written = load_png(&output).expect("output is a png");
        assert_eq!((written.width(), written.height()), (12, 6));
    }

    // Tests the diffuse subcommand writes beside the input by default
    // Verified by writing the result over the input
    #[test]
    fn test_run_diffuse_default_output() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = write_source(temp_dir.path());
        let input_arg = input.to_string_lossy().to_string();
        let cli = parse(&["diffuse", &input_arg, "--steps", "3", "-q"]);

        JobRunner::new(cli).run().expect("diffuse run succeeds");
        assert!(temp_dir.path().join("photo_result.png").exists());
    }

    // Tests error handling for missing input files
    // Verified by removing error return for nonexistent files
    #[test]
    fn test_run_missing_input() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("nope.png");
        let input_arg = input.to_string_lossy().to_string();
        let cli = parse(&["stylize", &input_arg, "-q"]);
        assert!(matches!(
            JobRunner::new(cli).run(),
            Err(SynthError::ImageLoad { .. })
        ));
    }

    // Tests batch runs write every output and report failures
    // Verified by ignoring failed responses when computing the exit result
    #[test]
    fn test_run_batch() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_source(temp_dir.path());
        let manifest = temp_dir.path().join("batch.json");
        std::fs::write(
            &manifest,
            r#"{ "jobs": [
                { "output": "a.png", "width": 5, "height": 5, "config": { "type": "noise" } },
                { "source": "photo.png", "output": "b.png", "config": { "type": "style" } },
                { "source": "photo.png", "output": "c.png",
                  "config": { "type": "diffusion", "steps": 2 } }
            ] }"#,
        )
        .expect("write succeeds");
        let manifest_arg = manifest.to_string_lossy().to_string();

        let cli = parse(&["batch", &manifest_arg, "--workers", "2", "-q"]);
        JobRunner::new(cli).run().expect("batch succeeds");
        for name in ["a.png", "b.png", "c.png"] {
            assert!(temp_dir.path().join(name).exists(), "{name} missing");
        }

        std::fs::write(
            &manifest,
            r#"{ "jobs": [
                { "output": "bad.png", "width": 5, "height": 5,
                  "config": { "type": "noise", "octaves": 0 } }
            ] }"#,
        )
        .expect("write succeeds");
        let cli = parse(&["batch", &manifest_arg, "-q"]);
        assert!(JobRunner::new(cli).run().is_err());
        assert!(!temp_dir.path().join("bad.png").exists());
    }
}
