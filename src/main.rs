use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use qcanvas::config::FIELD_PRESETS;
use qcanvas::headless::{HeadlessSurfaces, ManualScheduler};
use qcanvas::{
    Animator, CircuitConfig, FieldConfig, FieldStats, ParticleField, Point, SceneConfig, Size,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands, Format};

const SURFACE_ID: &str = "simulation";

/// Result of a headless run
#[derive(Debug, Serialize)]
struct Summary {
    preset: String,
    width: f64,
    height: f64,
    seed: u64,
    /// Draw calls issued by the last frame
    draw_calls: usize,
    stats: FieldStats,
}

struct SimulateArgs<'a> {
    preset: &'a str,
    config: Option<&'a Path>,
    overrides: &'a [String],
    size: Size,
    frames: usize,
    seed: u64,
    clicks: &'a [Point],
    pointer: Option<Point>,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn field_config(
    preset: &str,
    path: Option<&Path>,
    overrides: &[String],
) -> anyhow::Result<FieldConfig> {
    let mut config = match path {
        Some(path) => FieldConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => FieldConfig::preset(preset)?,
    };
    for patch in overrides {
        config = config
            .with_overrides(patch)
            .with_context(|| format!("failed to apply override {patch:?}"))?;
    }
    Ok(config)
}

fn simulate(args: SimulateArgs<'_>) -> anyhow::Result<Summary> {
    let config = field_config(args.preset, args.config, args.overrides)?;
    let surfaces = HeadlessSurfaces::new().with_surface(SURFACE_ID, args.size);
    let scheduler = ManualScheduler::new();
    let rng = SmallRng::seed_from_u64(args.seed);

    let animator = Animator::create(&surfaces, SURFACE_ID, scheduler.clone(), |size| {
        ParticleField::new(config, size, rng)
    })?;
    let recorder = surfaces
        .recorder(SURFACE_ID)
        .context("headless surface disappeared")?;

    if let Some(at) = args.pointer {
        animator.pointer_move(at);
    }
    for &at in args.clicks {
        animator.click(at);
    }

    let mut draw_calls = 0;
    for _ in 0..args.frames {
        scheduler.run_frames(1);
        draw_calls = recorder.take_commands().len();
    }

    let stats = animator.scene().stats();
    animator.destroy();
    tracing::debug!(frames = stats.frame, particles = stats.particles, "simulation finished");

    Ok(Summary {
        preset: args
            .config
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| args.preset.to_lowercase()),
        width: args.size.width,
        height: args.size.height,
        seed: args.seed,
        draw_calls,
        stats,
    })
}

fn print_summary(summary: &Summary, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        Format::Text => {
            let stats = &summary.stats;
            println!("preset:     {}", summary.preset);
            println!("surface:    {}x{}", summary.width, summary.height);
            println!("seed:       {}", summary.seed);
            println!("frames:     {}", stats.frame);
            println!("particles:  {} ({} transient)", stats.particles, stats.transient);
            println!("waves:      {}", stats.waves);
            println!("trail:      {}", stats.longest_trail);
            println!("mean speed: {:.3}", stats.mean_speed);
            println!("draw calls: {}", summary.draw_calls);
        }
    }
    Ok(())
}

fn circuit(
    path: Option<&Path>,
    tracks: Option<usize>,
    gates: Option<usize>,
    seed: u64,
) -> anyhow::Result<String> {
    let mut config = match path {
        Some(path) => CircuitConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => CircuitConfig::default(),
    };
    if let Some(tracks) = tracks {
        config.tracks = tracks;
    }
    if let Some(gates) = gates {
        config.gate_count = gates;
    }
    config.validate()?;

    let mut rng = SmallRng::seed_from_u64(seed);
    let events = qcanvas::circuit::generate(config.tracks, &config, &mut rng);
    Ok(serde_json::to_string_pretty(&events)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Preset { name } => {
            let config = FieldConfig::preset(&name)
                .with_context(|| format!("available presets: {}", FIELD_PRESETS.join(", ")))?;
            print!("{}", config.to_yaml_string()?);
        }
        Commands::Simulate {
            preset,
            config,
            overrides,
            width,
            height,
            frames,
            seed,
            click,
            pointer,
            format,
        } => {
            let summary = simulate(SimulateArgs {
                preset: &preset,
                config: config.as_deref(),
                overrides: &overrides,
                size: Size::new(width, height),
                frames,
                seed: seed.unwrap_or_else(clock_seed),
                clicks: &click,
                pointer,
            })?;
            print_summary(&summary, format)?;
        }
        Commands::Circuit {
            config,
            tracks,
            gates,
            seed,
        } => {
            let json = circuit(config.as_deref(), tracks, gates, seed.unwrap_or_else(clock_seed))?;
            println!("{json}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args<'a>(preset: &'a str, frames: usize, clicks: &'a [Point]) -> SimulateArgs<'a> {
        SimulateArgs {
            preset,
            config: None,
            overrides: &[],
            size: Size::new(400.0, 300.0),
            frames,
            seed: 42,
            clicks,
            pointer: None,
        }
    }

    #[test]
    fn cli_parses_simulate_with_defaults() {
        let cli = Cli::try_parse_from(["qcanvas", "simulate"]).unwrap();
        match cli.command {
            Commands::Simulate {
                preset,
                frames,
                width,
                format,
                seed,
                click,
                ..
            } => {
                assert_eq!(preset, "quantum");
                assert_eq!(frames, 300);
                assert_eq!(width, 800.0);
                assert_eq!(format, Format::Text);
                assert!(seed.is_none());
                assert!(click.is_empty());
            }
            _ => panic!("Expected Simulate command"),
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parses_clicks_and_overrides() {
        let cli = Cli::try_parse_from([
            "qcanvas",
            "-vv",
            "simulate",
            "--click",
            "10,20",
            "--click",
            "30.5, 40",
            "--set",
            "target_count: 5",
            "--config",
            "field.yaml",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Simulate {
                click,
                overrides,
                config,
                format,
                ..
            } => {
                assert_eq!(click, vec![Point::new(10.0, 20.0), Point::new(30.5, 40.0)]);
                assert_eq!(overrides, vec!["target_count: 5".to_string()]);
                assert_eq!(config, Some(PathBuf::from("field.yaml")));
                assert_eq!(format, Format::Json);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn cli_rejects_malformed_points() {
        assert!(Cli::try_parse_from(["qcanvas", "simulate", "--click", "10"]).is_err());
        assert!(Cli::try_parse_from(["qcanvas", "simulate", "--click", "a,b"]).is_err());
    }

    #[test]
    fn cli_rejects_non_finite_extents() {
        for bad in ["inf", "NaN", "wide"] {
            assert!(Cli::try_parse_from(["qcanvas", "simulate", "--width", bad]).is_err());
            assert!(Cli::try_parse_from(["qcanvas", "simulate", "--height", bad]).is_err());
        }
        assert!(Cli::try_parse_from(["qcanvas", "simulate", "--width", "0"]).is_ok());
    }

    #[test]
    fn cli_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["qcanvas"]).is_err());
    }

    #[test]
    fn simulate_runs_requested_frames() {
        let summary = simulate(args("quantum", 30, &[])).unwrap();
        assert_eq!(summary.stats.frame, 30);
        assert_eq!(summary.stats.particles, 100);
        assert!(summary.draw_calls > 0);
    }

    #[test]
    fn simulate_applies_clicks_before_first_frame() {
        let clicks = [Point::new(100.0, 100.0), Point::new(200.0, 100.0)];
        let summary = simulate(args("hero", 0, &clicks)).unwrap();
        assert_eq!(summary.stats.frame, 0);
        assert_eq!(summary.stats.particles, 150 + 2 * 30);
        assert_eq!(summary.stats.waves, 2);
        assert_eq!(summary.draw_calls, 0);
    }

    #[test]
    fn simulate_applies_overrides() {
        let overrides = ["target_count: 7".to_string(), "links: {distance: 0}".to_string()];
        let summary = simulate(SimulateArgs {
            overrides: &overrides,
            ..args("ambient", 1, &[])
        })
        .unwrap();
        assert_eq!(summary.stats.particles, 7);
        // Clear plus one core per particle
        assert_eq!(summary.draw_calls, 8);
    }

    #[test]
    fn simulate_rejects_unknown_preset() {
        assert!(simulate(args("sparkle", 1, &[])).is_err());
    }

    #[test]
    fn circuit_honours_track_and_gate_counts() {
        let json = circuit(None, Some(2), Some(4), 5).unwrap();
        let events: Vec<qcanvas::GateEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.track < 2));
    }

    #[test]
    fn circuit_rejects_zero_tracks() {
        assert!(circuit(None, Some(0), None, 1).is_err());
    }
}
