//! Position-skewed price ladder.
//!
//! Computes a bid and ask for each notional bucket from a calibrated
//! half-width curve and the current net position:
//! - Curve evaluation (unskewed half-width per bucket)
//! - Position skew (both sides shift together)
//! - Redistribution when a side would cross into the minimum half-spread
//!
//! # Architecture
//!
//! ```text
//! position update → PriceLadder.recompute()
//!                    ├─ Pricer.quote() per row
//!                    │    ├─ CurveModel: base half-width
//!                    │    ├─ skew: position * skew_factor
//!                    │    └─ redistribution guard
//!                    └─ snapshot() → LadderPublisher.publish()
//!                         ↓
//!                    renderer reads LadderPublisher.latest()
//! ```

pub mod config;
pub mod curve;
pub mod ladder;
pub mod pricer;
pub mod publish;

pub use config::{CurveAxis, PricerConfig, RedistributionMode};
pub use curve::{CurveModel, PolynomialCurve};
pub use ladder::{LadderRow, LadderSnapshot, PriceLadder, RecomputeSummary, SnapshotRow};
pub use pricer::{unskewed_price, Pricer, Quote};
pub use publish::LadderPublisher;
