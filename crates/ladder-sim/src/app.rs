//! Main application orchestration.
//!
//! Builds the ladder from configuration, then for each position in the
//! sweep: recompute, record metrics, publish the snapshot and write the
//! frame.

use std::io::Write;
use std::sync::Arc;

use ladder_pricer::{LadderPublisher, PriceLadder, Pricer};
use ladder_telemetry::Metrics;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::AppResult;
use crate::recorder::FrameRecorder;
use crate::sweep::PositionSweep;

/// Totals for one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    pub frames: usize,
    /// Frames where at least one row was redistributed.
    pub redistributed_frames: usize,
    pub max_abs_position: f64,
}

/// Main application.
pub struct Application {
    config: SimConfig,
    ladder: PriceLadder,
    publisher: LadderPublisher,
}

impl Application {
    /// Create a new application. Fails if the pricer configuration is invalid.
    pub fn new(config: SimConfig) -> AppResult<Self> {
        config.validate()?;
        let pricer = Arc::new(Pricer::from_config(&config.pricer)?);
        let ladder = PriceLadder::new(Arc::clone(&pricer))?;
        let publisher = LadderPublisher::new(ladder.snapshot()?);

        info!(
            buckets = ladder.len(),
            min_half_spread = pricer.min_half_spread(),
            skew_factor = pricer.skew_factor(),
            redistribution = ?pricer.redistribution(),
            curve_axis = ?pricer.curve_axis(),
            price_scale = pricer.price_scale(),
            "Price ladder initialized"
        );

        Ok(Self {
            config,
            ladder,
            publisher,
        })
    }

    /// Handle for readers of the published ladder.
    pub fn publisher(&self) -> LadderPublisher {
        self.publisher.clone()
    }

    pub fn ladder(&self) -> &PriceLadder {
        &self.ladder
    }

    /// Run the configured sweep, writing one frame per position.
    pub fn run<W: Write>(&mut self, recorder: &mut FrameRecorder<W>) -> AppResult<RunSummary> {
        let sweep = PositionSweep::new(
            self.config.sweep.amplitude,
            self.config.sweep.cycles,
            self.config.sweep.frames,
        );
        info!(frames = sweep.len(), amplitude = self.config.sweep.amplitude, "Starting sweep");

        let mut summary = RunSummary::default();
        for position in sweep {
            let recompute = self.ladder.recompute(position)?;
            Metrics::recompute(
                position,
                recompute.redistributed_bids,
                recompute.redistributed_asks,
            );

            let generation = self.publisher.publish(self.ladder.snapshot()?);
            recorder.record(generation, &self.publisher.latest())?;

            summary.frames += 1;
            if recompute.redistributed_rows() > 0 {
                summary.redistributed_frames += 1;
            }
            summary.max_abs_position = summary.max_abs_position.max(position.abs());
        }
        recorder.flush()?;

        info!(
            frames = summary.frames,
            redistributed_frames = summary.redistributed_frames,
            max_abs_position = summary.max_abs_position,
            "Sweep complete"
        );
        let metrics = Metrics::encode()?;
        debug!(metrics = %metrics, "Final metrics");
        Ok(summary)
    }
}
