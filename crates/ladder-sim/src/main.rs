//! Price ladder simulator - Entry Point
//!
//! Sweeps the position through a sine wave and writes one ladder frame
//! per step as JSON lines, for an external renderer to animate.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::Parser;
use ladder_sim::{Application, FrameRecorder, SimConfig};
use tracing::info;

/// Position-skewed price ladder simulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via LADDER_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Frame output file (JSON lines). Overrides `output.path`; stdout if unset.
    #[arg(short, long)]
    output: Option<String>,

    /// Number of sweep frames. Overrides `sweep.frames`.
    #[arg(short, long)]
    frames: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    ladder_telemetry::init_logging()?;

    info!("Starting ladder-sim v{}", env!("CARGO_PKG_VERSION"));

    let mut config = SimConfig::load(args.config)?;
    if let Some(frames) = args.frames {
        config.sweep.frames = frames;
    }
    if let Some(output) = args.output {
        config.output.path = Some(output);
    }

    let writer: Box<dyn Write> = match &config.output.path {
        Some(path) => {
            info!(path = %path, "Writing frames to file");
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut recorder = FrameRecorder::new(writer);

    let mut app = Application::new(config)?;
    let summary = app.run(&mut recorder)?;

    info!(frames = summary.frames, "Done");
    Ok(())
}
