//! Price ladder simulator.
//!
//! Drives a scripted position sweep through the ladder and records one
//! frame per position update for an external renderer:
//! - Configuration loading (TOML)
//! - Sinusoidal position sweep
//! - Ladder recompute and whole-table publish
//! - JSON-lines frame output

pub mod app;
pub mod config;
pub mod error;
pub mod recorder;
pub mod sweep;

pub use app::{Application, RunSummary};
pub use config::{OutputConfig, SimConfig, SweepConfig};
pub use error::{AppError, AppResult};
pub use recorder::FrameRecorder;
pub use sweep::PositionSweep;
