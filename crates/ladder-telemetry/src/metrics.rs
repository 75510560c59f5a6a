//! Prometheus metrics for the price ladder.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means duplicate metric
//! names, which is a programming error and should crash at first use.

use ladder_core::Side;
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge, register_histogram, register_int_counter, CounterVec,
    Encoder, Gauge, Histogram, IntCounter, TextEncoder,
};

use crate::error::TelemetryResult;

/// Total ladder recomputes.
pub static RECOMPUTE_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("ladder_recompute_total", "Total ladder recomputes").unwrap()
});

/// Total rows redistributed, by pinned side.
pub static REDISTRIBUTION_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ladder_redistribution_total",
        "Total rows whose quote was pinned at the minimum half-spread",
        &["side"]
    )
    .unwrap()
});

/// Rows redistributed per recompute.
pub static REDISTRIBUTED_ROWS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "ladder_redistributed_rows",
        "Rows redistributed per recompute",
        vec![0.0, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0]
    )
    .unwrap()
});

/// Position used by the last recompute.
pub static POSITION: Lazy<Gauge> =
    Lazy::new(|| register_gauge!("ladder_position", "Position of the last recompute").unwrap());

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Record a completed recompute.
    pub fn recompute(position: f64, redistributed_bids: usize, redistributed_asks: usize) {
        RECOMPUTE_TOTAL.inc();
        POSITION.set(position);
        REDISTRIBUTION_TOTAL
            .with_label_values(&[Side::Bid.as_str()])
            .inc_by(redistributed_bids as f64);
        REDISTRIBUTION_TOTAL
            .with_label_values(&[Side::Ask.as_str()])
            .inc_by(redistributed_asks as f64);
        REDISTRIBUTED_ROWS.observe((redistributed_bids + redistributed_asks) as f64);
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn encode() -> TelemetryResult<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recompute_updates_metrics() {
        let before = RECOMPUTE_TOTAL.get();
        let asks_before = REDISTRIBUTION_TOTAL.with_label_values(&["ask"]).get();

        Metrics::recompute(12.5, 0, 3);

        assert!(RECOMPUTE_TOTAL.get() > before);
        assert!(REDISTRIBUTION_TOTAL.with_label_values(&["ask"]).get() >= asks_before + 3.0);

        let text = Metrics::encode().unwrap();
        assert!(text.contains("ladder_recompute_total"));
        assert!(text.contains("ladder_redistribution_total"));
    }
}
