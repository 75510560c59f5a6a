//! Price ladder: one skewed quote per bucket, recomputed in place.
//!
//! Built once at zero position to capture each row's baseline half-spread,
//! then recomputed whenever the position changes. Rows are never added or
//! removed after construction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ladder_core::{CoreError, Price, Result, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pricer::Pricer;

/// One bucket's quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LadderRow {
    /// Zero-based row ordinal.
    pub index: usize,
    /// Notional bucket size.
    pub bucket: f64,
    /// Value the curve is evaluated at (bucket or ordinal).
    pub curve_x: f64,
    /// Baseline half-spread captured at zero position.
    pub half_spread: f64,
    pub bid: f64,
    pub ask: f64,
    pub redistributed: Option<Side>,
}

/// Outcome of one recompute.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecomputeSummary {
    pub position: f64,
    /// Rows whose bid was pinned at `-min_half_spread`.
    pub redistributed_bids: usize,
    /// Rows whose ask was pinned at `min_half_spread`.
    pub redistributed_asks: usize,
}

impl RecomputeSummary {
    pub fn redistributed_rows(&self) -> usize {
        self.redistributed_bids + self.redistributed_asks
    }
}

/// Published row: `(bucket, bid, ask)` with decimal prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub index: usize,
    pub bucket: f64,
    pub bid: Price,
    pub ask: Price,
}

impl SnapshotRow {
    pub fn spread(&self) -> Price {
        self.ask - self.bid
    }
}

/// Immutable copy of the ladder for rendering consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LadderSnapshot {
    pub position: f64,
    pub captured_at: DateTime<Utc>,
    pub rows: Vec<SnapshotRow>,
}

impl LadderSnapshot {
    /// `(bucket, bid, ask)` triples in bucket order.
    pub fn triples(&self) -> impl Iterator<Item = (f64, Price, Price)> + '_ {
        self.rows.iter().map(|r| (r.bucket, r.bid, r.ask))
    }
}

/// Mutable ladder table. Single writer; share snapshots, not the ladder.
#[derive(Debug, Clone)]
pub struct PriceLadder {
    pricer: Arc<Pricer>,
    rows: Vec<LadderRow>,
    position: f64,
}

impl PriceLadder {
    /// Build the ladder at zero position.
    pub fn new(pricer: Arc<Pricer>) -> Result<Self> {
        let mut rows = Vec::with_capacity(pricer.buckets().len());
        for (index, bucket) in pricer.buckets().iter().enumerate() {
            let curve_x = pricer.curve_x(index, bucket);
            let base = pricer.baseline(curve_x)?;
            rows.push(LadderRow {
                index,
                bucket,
                curve_x,
                half_spread: base.half_spread(),
                bid: base.bid,
                ask: base.ask,
                redistributed: None,
            });
        }
        debug!(rows = rows.len(), "price ladder built");
        Ok(Self {
            pricer,
            rows,
            position: 0.0,
        })
    }

    /// Recompute every row for `position`.
    ///
    /// All quotes are computed before any row is written, so a failure
    /// leaves the previous table intact.
    pub fn recompute(&mut self, position: f64) -> Result<RecomputeSummary> {
        if !position.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "position must be finite, got {position}"
            )));
        }

        let quotes = self
            .rows
            .iter()
            .map(|row| self.pricer.quote(row.curve_x, row.half_spread, position))
            .collect::<Result<Vec<_>>>()?;

        let mut summary = RecomputeSummary {
            position,
            ..Default::default()
        };
        for (row, quote) in self.rows.iter_mut().zip(quotes) {
            row.bid = quote.bid;
            row.ask = quote.ask;
            row.redistributed = quote.redistributed;
            match quote.redistributed {
                Some(Side::Bid) => summary.redistributed_bids += 1,
                Some(Side::Ask) => summary.redistributed_asks += 1,
                None => {}
            }
        }
        self.position = position;

        debug!(
            position,
            redistributed_bids = summary.redistributed_bids,
            redistributed_asks = summary.redistributed_asks,
            "ladder recomputed"
        );
        Ok(summary)
    }

    /// Add `delta` to the current position and recompute.
    pub fn add_position(&mut self, delta: f64) -> Result<RecomputeSummary> {
        let position = self.position + delta;
        if !position.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "position {} + {delta} is not finite",
                self.position
            )));
        }
        self.recompute(position)
    }

    /// Decimal snapshot at the pricer's configured scale.
    ///
    /// Prices that would round inside `min_half_spread` are rounded away
    /// from mid, so published rows never cross.
    pub fn snapshot(&self) -> Result<LadderSnapshot> {
        let scale = self.pricer.price_scale();
        let floor = self.pricer.min_half_spread();
        let rows = self
            .rows
            .iter()
            .map(|row| -> Result<SnapshotRow> {
                Ok(SnapshotRow {
                    index: row.index,
                    bucket: row.bucket,
                    bid: Price::from_quote(row.bid, Side::Bid, floor, scale)?,
                    ask: Price::from_quote(row.ask, Side::Ask, floor, scale)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LadderSnapshot {
            position: self.position,
            captured_at: Utc::now(),
            rows,
        })
    }

    pub fn rows(&self) -> &[LadderRow] {
        &self.rows
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CurveAxis, PricerConfig};
    use crate::curve::PolynomialCurve;
    use ladder_core::Buckets;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn default_ladder() -> PriceLadder {
        let pricer = Pricer::from_config(&PricerConfig::default()).unwrap();
        PriceLadder::new(Arc::new(pricer)).unwrap()
    }

    /// Half-width `0.00001 * x`, buckets 1..=3.
    fn linear_ladder() -> PriceLadder {
        let config = PricerConfig {
            buckets: Buckets::sequential(3),
            ..Default::default()
        };
        let curve = Arc::new(PolynomialCurve::linear(0.0, 0.00001));
        PriceLadder::new(Arc::new(Pricer::with_curve(&config, curve).unwrap())).unwrap()
    }

    #[test]
    fn test_new_ladder_is_symmetric_at_zero() {
        let ladder = default_ladder();
        assert_eq!(ladder.len(), 27);
        assert_eq!(ladder.position(), 0.0);
        for row in ladder.rows() {
            assert_eq!(row.ask, -row.bid);
            assert_eq!(row.half_spread, row.ask);
            assert!(row.ask >= 0.00003);
        }
    }

    #[test]
    fn test_half_spread_widens_with_bucket() {
        let ladder = default_ladder();
        for pair in ladder.rows().windows(2) {
            assert!(pair[1].half_spread >= pair[0].half_spread);
        }
    }

    #[test]
    fn test_recompute_updates_in_place() {
        let mut ladder = linear_ladder();
        let baseline: Vec<f64> = ladder.rows().iter().map(|r| r.half_spread).collect();

        // Breach positions are 1, 2, 3 for buckets 1, 2, 3.
        let summary = ladder.recompute(1.5).unwrap();
        assert_eq!(summary.position, 1.5);
        assert_eq!(summary.redistributed_asks, 1);
        assert_eq!(summary.redistributed_bids, 0);
        assert_eq!(ladder.position(), 1.5);

        assert_eq!(ladder.rows()[0].redistributed, Some(Side::Ask));
        assert_eq!(ladder.rows()[0].ask, 0.00003);
        assert_eq!(ladder.rows()[1].redistributed, None);

        // Baselines never change.
        let after: Vec<f64> = ladder.rows().iter().map(|r| r.half_spread).collect();
        assert_eq!(baseline, after);
    }

    #[test]
    fn test_recompute_short_pins_bids() {
        let mut ladder = linear_ladder();
        let summary = ladder.recompute(-10.0).unwrap();
        assert_eq!(summary.redistributed_bids, 3);
        assert_eq!(summary.redistributed_rows(), 3);
        for row in ladder.rows() {
            assert_eq!(row.bid, -0.00003);
            assert!((row.ask - (2.0 * row.half_spread - 0.00003)).abs() < 1e-15);
        }
    }

    #[test]
    fn test_recompute_rejects_non_finite_and_keeps_table() {
        let mut ladder = linear_ladder();
        ladder.recompute(0.5).unwrap();
        let before = ladder.rows().to_vec();

        let err = ladder.recompute(f64::NAN).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert_eq!(ladder.rows(), before.as_slice());
        assert_eq!(ladder.position(), 0.5);
    }

    #[test]
    fn test_add_position_accumulates() {
        let mut ladder = linear_ladder();
        ladder.add_position(0.5).unwrap();
        ladder.add_position(0.25).unwrap();
        assert_eq!(ladder.position(), 0.75);

        let mut direct = linear_ladder();
        direct.recompute(0.75).unwrap();
        assert_eq!(ladder.rows(), direct.rows());

        assert!(ladder.add_position(f64::INFINITY).is_err());
        assert_eq!(ladder.position(), 0.75);
    }

    #[test]
    fn test_return_to_zero_restores_baseline() {
        let mut ladder = default_ladder();
        let baseline = ladder.rows().to_vec();
        ladder.recompute(40.0).unwrap();
        ladder.recompute(0.0).unwrap();
        assert_eq!(ladder.rows(), baseline.as_slice());
    }

    #[test]
    fn test_empty_buckets_give_empty_ladder() {
        let config = PricerConfig {
            buckets: Buckets::new(vec![]).unwrap(),
            ..Default::default()
        };
        let pricer = Pricer::from_config(&config).unwrap();
        let mut ladder = PriceLadder::new(Arc::new(pricer)).unwrap();
        assert!(ladder.is_empty());
        let summary = ladder.recompute(5.0).unwrap();
        assert_eq!(summary.redistributed_rows(), 0);
        assert!(ladder.snapshot().unwrap().rows.is_empty());
    }

    #[test]
    fn test_ordinal_axis_evaluates_curve_at_index() {
        let config = PricerConfig {
            buckets: Buckets::new(vec![10_000.0, 50_000.0, 100_000.0]).unwrap(),
            curve_axis: CurveAxis::Ordinal,
            ..Default::default()
        };
        let curve = Arc::new(PolynomialCurve::linear(0.0, 0.00001));
        let pricer = Pricer::with_curve(&config, curve).unwrap();
        let ladder = PriceLadder::new(Arc::new(pricer)).unwrap();

        let rows = ladder.rows();
        assert_eq!(rows[2].bucket, 100_000.0);
        assert_eq!(rows[2].curve_x, 2.0);
        assert!((rows[0].half_spread - 0.00003).abs() < 1e-15);
        assert!((rows[2].half_spread - 0.00005).abs() < 1e-15);
    }

    #[test]
    fn test_snapshot_rounds_prices() {
        let mut ladder = linear_ladder();
        ladder.recompute(2.0).unwrap();
        let snapshot = ladder.snapshot().unwrap();

        assert_eq!(snapshot.position, 2.0);
        assert_eq!(snapshot.rows.len(), 3);

        // Bucket 1: ask pinned at 0.00003, bid pushed to -0.00005.
        let row = &snapshot.rows[0];
        assert_eq!(row.ask.inner(), dec!(0.00003));
        assert_eq!(row.bid.inner(), dec!(-0.00005));
        assert_eq!(row.spread().inner(), dec!(0.00008));

        // Bucket 3: unclamped, 0.00006 - 0.00002.
        let row = &snapshot.rows[2];
        assert_eq!(row.ask.inner(), dec!(0.00004));
        assert_eq!(row.bid.inner(), dec!(-0.00008));

        let triples: Vec<_> = snapshot.triples().collect();
        assert_eq!(triples[1].0, 2.0);
    }

    #[test]
    fn test_snapshot_never_rounds_inside_min_half_spread() {
        // Floors finer than the 5dp price grid.
        for k in 0..100 {
            let min = k as f64 * 1e-6 + 5e-7;
            let config = PricerConfig {
                min_half_spread: min,
                buckets: Buckets::sequential(3),
                price_scale: 5,
                ..Default::default()
            };
            let curve = Arc::new(PolynomialCurve::linear(0.0, 0.00001));
            let pricer = Pricer::with_curve(&config, curve).unwrap();
            let mut ladder = PriceLadder::new(Arc::new(pricer)).unwrap();
            let floor = Decimal::from_f64_retain(min).unwrap();

            for position in [1e4, -1e4, 0.0] {
                ladder.recompute(position).unwrap();
                for row in ladder.snapshot().unwrap().rows {
                    assert!(row.ask.inner() >= floor, "min {min}: ask {}", row.ask);
                    assert!(row.bid.inner() <= -floor, "min {min}: bid {}", row.bid);
                    assert!(row.spread().inner() >= floor * Decimal::TWO);
                }
            }
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let ladder = linear_ladder();
        let snapshot = ladder.snapshot().unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: LadderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows, snapshot.rows);
    }
}
