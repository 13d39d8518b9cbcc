use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use qcanvas::Point;

/// Inspect and tune the homepage canvas animations without a browser.
#[derive(Parser, Debug)]
#[command(name = "qcanvas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a particle-field preset as YAML
    Preset {
        /// Preset name (quantum, hero, ambient)
        name: String,
    },
    /// Run a particle field off-screen and summarize the result
    Simulate {
        /// Preset to start from
        #[arg(short, long, default_value = "quantum")]
        preset: String,

        /// YAML or JSON config file; replaces the preset
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Inline YAML merged over the config, e.g. "target_count: 20"
        #[arg(long = "set", value_name = "YAML")]
        overrides: Vec<String>,

        #[arg(long, default_value_t = 800.0, value_parser = parse_extent)]
        width: f64,

        #[arg(long, default_value_t = 600.0, value_parser = parse_extent)]
        height: f64,

        /// Frames to run
        #[arg(short, long, default_value_t = 300)]
        frames: usize,

        /// RNG seed; defaults to the system clock
        #[arg(short, long)]
        seed: Option<u64>,

        /// Click at X,Y before the first frame (repeatable)
        #[arg(long, value_name = "X,Y", value_parser = parse_point)]
        click: Vec<Point>,

        /// Hold the pointer at X,Y for the whole run
        #[arg(long, value_name = "X,Y", value_parser = parse_point)]
        pointer: Option<Point>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Generate a gate sequence and print it as JSON
    Circuit {
        /// YAML or JSON circuit config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of tracks
        #[arg(long)]
        tracks: Option<usize>,

        /// Number of gates
        #[arg(long)]
        gates: Option<usize>,

        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Parse a surface extent in logical pixels
pub fn parse_extent(s: &str) -> Result<f64, String> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad extent {s:?}: {e}"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("extent must be a finite number >= 0, got {s:?}"))
    }
}

/// Parse `X,Y` into a point
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate {v:?}: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}
