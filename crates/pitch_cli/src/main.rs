//! pitchplot CLI
//!
//! Renders pitch diagrams to SVG:
//! - `blank`: pitch markings only
//! - `demo`: showcase scene with players, all pass types and a heatmap

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pitch_core::{CanvasConfig, Color, PassType, PitchCanvas, Position, Surface, SvgSurface};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pitchplot")]
#[command(about = "Draw soccer pitch diagrams as SVG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an empty pitch
    Blank {
        /// Output SVG file path
        #[arg(long)]
        out: PathBuf,

        /// Canvas config JSON (defaults to $PITCHPLOT_CONFIG, then built-in)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render the showcase scene
    Demo {
        /// Output SVG file path
        #[arg(long)]
        out: PathBuf,

        /// Canvas config JSON (defaults to $PITCHPLOT_CONFIG, then built-in)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Blank { out, config } => {
            let canvas = open_canvas(&out, load_config(config.as_deref())?)?;
            present(canvas, &out)?;
        }
        Commands::Demo { out, config } => {
            let mut canvas = open_canvas(&out, load_config(config.as_deref())?)?;
            draw_showcase(&mut canvas)?;
            present(canvas, &out)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<CanvasConfig> {
    match path {
        Some(path) => CanvasConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(CanvasConfig::from_env_or_default()),
    }
}

fn open_canvas(out: &Path, config: CanvasConfig) -> Result<PitchCanvas<SvgSurface>> {
    let surface = SvgSurface::to_file(out, config.dpi);
    PitchCanvas::with_config(config, surface).context("Failed to create pitch canvas")
}

fn present(mut canvas: PitchCanvas<SvgSurface>, out: &Path) -> Result<()> {
    canvas.show().with_context(|| format!("Failed to write SVG: {}", out.display()))?;
    info!(path = %out.display(), elements = canvas.surface().scene().len(), "pitch rendered");
    Ok(())
}

/// Players, one pass of each type and a midfield heatmap, laid out as a
/// fraction of the configured pitch so any dimensions work.
fn draw_showcase(canvas: &mut PitchCanvas<SvgSurface>) -> Result<()> {
    let dims = *canvas.dimensions();
    let at = |fx: f64, fy: f64| Position::new(dims.width * fx, dims.height * fy);

    let xs: Vec<f64> = HEAT_SAMPLES.iter().map(|(fx, _)| dims.width * fx).collect();
    let ys: Vec<f64> = HEAT_SAMPLES.iter().map(|(_, fy)| dims.height * fy).collect();
    canvas.draw_heatmap(&xs, &ys, None)?;

    for &(number, fx, fy) in &HOME_PLAYERS {
        canvas.draw_player(at(fx, fy), Some(number), None)?;
    }
    canvas.draw_player(at(0.62, 0.55), Some(4), Some(Color::BLUE))?;

    canvas.draw_pass(at(0.35, 0.5), at(0.5, 0.3), PassType::Low, None)?;
    canvas.draw_pass(at(0.5, 0.3), at(0.55, 0.7), PassType::Ground, Some(Color::ORANGE))?;
    canvas.draw_pass(at(0.55, 0.7), at(0.75, 0.45), PassType::High, Some(Color::PURPLE))?;
    Ok(())
}

const HOME_PLAYERS: [(u32, f64, f64); 4] =
    [(6, 0.35, 0.5), (8, 0.5, 0.3), (10, 0.55, 0.7), (9, 0.75, 0.45)];

const HEAT_SAMPLES: [(f64, f64); 8] = [
    (0.40, 0.45),
    (0.45, 0.50),
    (0.50, 0.40),
    (0.48, 0.55),
    (0.52, 0.48),
    (0.42, 0.38),
    (0.58, 0.52),
    (0.46, 0.62),
];
