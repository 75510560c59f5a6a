//! Skewed two-sided quote calculation.
//!
//! Computes bid/ask prices relative to mid from:
//! - The base half-width curve at the bucket
//! - A fixed minimum half-spread
//! - Position skew (both sides shift by `position * skew_factor`)
//! - Redistribution when skew pushes a side inside the minimum half-spread
//!
//! # Redistribution
//!
//! ```text
//!   position = 0              long, skew past breach
//!
//!   ask  +h                   ask  +min     (pinned at floor)
//!   ---- +min ----            ---- +min ----
//!   mid                       mid
//!   ---- -min ----            ---- -min ----
//!   bid  -h                   bid  -2h + min (absorbs the width)
//! ```
//!
//! The pinned side stays at its floor and the other side keeps the row's
//! baseline width `2h`. Short positions mirror this on the bid.

use std::sync::Arc;

use ladder_core::{Buckets, CoreError, Price, Result, Side};
use serde::Serialize;
use tracing::trace;

use crate::config::{CurveAxis, PricerConfig, RedistributionMode};
use crate::curve::{CurveModel, PolynomialCurve};

/// A computed two-sided quote, relative to mid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub bid: f64,
    pub ask: f64,
    /// Side pinned at its floor by redistribution, if any.
    pub redistributed: Option<Side>,
}

impl Quote {
    /// Total quoted width `ask - bid`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.ask - self.bid
    }

    #[inline]
    pub fn half_spread(&self) -> f64 {
        self.width() / 2.0
    }
}

/// Unskewed price for one side at `x`: `±(curve(x) + min_half_spread)`.
#[inline]
pub fn unskewed_price(curve: &dyn CurveModel, x: f64, side: Side, min_half_spread: f64) -> f64 {
    side.sign() * (curve.base_halfwidth(x) + min_half_spread)
}

/// Quote calculator. Immutable after construction and safe to share
/// across threads.
#[derive(Debug, Clone)]
pub struct Pricer {
    min_half_spread: f64,
    skew_factor: f64,
    curve: Arc<dyn CurveModel>,
    buckets: Buckets,
    curve_axis: CurveAxis,
    redistribution: RedistributionMode,
    price_scale: u32,
}

impl Pricer {
    /// Build a pricer with the polynomial curve from `config`.
    pub fn from_config(config: &PricerConfig) -> Result<Self> {
        let curve = PolynomialCurve::new(config.curve_coefficients.clone())?;
        Self::with_curve(config, Arc::new(curve))
    }

    /// Build a pricer with an injected curve. `config.curve_coefficients`
    /// is ignored.
    pub fn with_curve(config: &PricerConfig, curve: Arc<dyn CurveModel>) -> Result<Self> {
        config.validate()?;
        let pricer = Self {
            min_half_spread: config.min_half_spread,
            skew_factor: config.skew_factor,
            curve,
            buckets: config.buckets.clone(),
            curve_axis: config.curve_axis,
            redistribution: config.redistribution,
            price_scale: config.price_scale,
        };
        let points = pricer.curve_points();
        pricer.curve.check_monotone(&points)?;
        pricer.check_publishable(&points)?;
        Ok(pricer)
    }

    pub fn min_half_spread(&self) -> f64 {
        self.min_half_spread
    }

    pub fn skew_factor(&self) -> f64 {
        self.skew_factor
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub fn curve(&self) -> &dyn CurveModel {
        self.curve.as_ref()
    }

    pub fn curve_axis(&self) -> CurveAxis {
        self.curve_axis
    }

    pub fn redistribution(&self) -> RedistributionMode {
        self.redistribution
    }

    pub fn price_scale(&self) -> u32 {
        self.price_scale
    }

    /// Curve input for the bucket at row `index`.
    pub fn curve_x(&self, index: usize, bucket: f64) -> f64 {
        match self.curve_axis {
            CurveAxis::Notional => bucket,
            CurveAxis::Ordinal => index as f64,
        }
    }

    /// Curve inputs for every configured bucket, in bucket order.
    pub fn curve_points(&self) -> Vec<f64> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, b)| self.curve_x(i, b))
            .collect()
    }

    /// Price shift applied to both sides for `position`.
    #[inline]
    pub fn skew(&self, position: f64) -> f64 {
        position * self.skew_factor
    }

    /// Position magnitude beyond which a row with `half_spread` starts to
    /// redistribute (ask side for long, bid side for short).
    pub fn breach_position(&self, half_spread: f64) -> f64 {
        ((half_spread - self.min_half_spread) / self.skew_factor).max(0.0)
    }

    /// Quote at zero position.
    pub fn baseline(&self, x: f64) -> Result<Quote> {
        self.validate_x(x)?;
        let ask = unskewed_price(self.curve(), x, Side::Ask, self.min_half_spread);
        let bid = unskewed_price(self.curve(), x, Side::Bid, self.min_half_spread);
        if !ask.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "curve is not finite at bucket {x}"
            )));
        }
        Ok(Quote {
            bid,
            ask,
            redistributed: None,
        })
    }

    /// Skewed quote for curve input `x`.
    ///
    /// `half_spread` is the row's baseline half-spread captured at zero
    /// position. It sets the total width kept when one side is pinned.
    pub fn quote(&self, x: f64, half_spread: f64, position: f64) -> Result<Quote> {
        if !position.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "position must be finite, got {position}"
            )));
        }
        if !half_spread.is_finite() || half_spread < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "half_spread must be finite and non-negative, got {half_spread}"
            )));
        }
        let base = self.baseline(x)?;

        let shift = self.skew(position);
        let ask = base.ask - shift;
        let bid = base.bid - shift;

        let quote = match self.redistribution {
            RedistributionMode::Exclusive => self.redistribute_exclusive(bid, ask, half_spread),
            RedistributionMode::Sequential => self.redistribute_sequential(bid, ask, half_spread),
        };

        if let Some(side) = quote.redistributed {
            trace!(
                x,
                position,
                side = %side,
                bid = quote.bid,
                ask = quote.ask,
                "quote redistributed"
            );
        }
        Ok(quote)
    }

    fn redistribute_exclusive(&self, bid: f64, ask: f64, half_spread: f64) -> Quote {
        let min = self.min_half_spread;
        let width = half_spread.max(min);
        if ask < min {
            Quote {
                bid: -2.0 * width + min,
                ask: min,
                redistributed: Some(Side::Ask),
            }
        } else if bid > -min {
            Quote {
                bid: -min,
                ask: 2.0 * width - min,
                redistributed: Some(Side::Bid),
            }
        } else {
            Quote {
                bid,
                ask,
                redistributed: None,
            }
        }
    }

    fn redistribute_sequential(&self, mut bid: f64, mut ask: f64, half_spread: f64) -> Quote {
        let min = self.min_half_spread;
        let mut redistributed = None;
        if ask < min {
            ask = min;
            bid = -2.0 * half_spread + min;
            redistributed = Some(Side::Ask);
        }
        // Sees the bid written above, so it can overwrite the ask guard.
        if bid > -min {
            bid = -min;
            ask = 2.0 * half_spread - min;
            redistributed = Some(Side::Bid);
        }
        Quote {
            bid,
            ask,
            redistributed,
        }
    }

    /// Every baseline must fit the published decimal price.
    fn check_publishable(&self, points: &[f64]) -> Result<()> {
        let hint = match self.curve_axis {
            CurveAxis::Notional => "; evaluate the curve by row with curve_axis = \"ordinal\"",
            CurveAxis::Ordinal => "",
        };
        for &x in points {
            let ask = self.baseline(x)?.ask;
            Price::from_quote(ask, Side::Ask, self.min_half_spread, self.price_scale).map_err(
                |e| {
                    CoreError::InvalidConfig(format!(
                        "curve value at x = {x} cannot be published ({e}){hint}"
                    ))
                },
            )?;
        }
        Ok(())
    }

    fn validate_x(&self, x: f64) -> Result<()> {
        if !x.is_finite() || x < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "bucket must be finite and non-negative, got {x}"
            )));
        }
        Ok(())
    }
}
