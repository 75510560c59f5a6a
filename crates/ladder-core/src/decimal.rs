//! Precision-safe decimal price for published ladders.
//!
//! Pricing runs in `f64` so that non-finite inputs can be detected and
//! rejected. Once a ladder is computed, prices are converted to `Decimal`
//! and rounded to a fixed scale before they leave the pricer, so consumers
//! never see binary-float artifacts like `0.000030000000000000001`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::side::Side;

/// Price with exact decimal precision, relative to mid.
///
/// Wraps `Decimal` so published prices cannot be mixed up with bucket
/// sizes or positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    /// Convert one side of a quote, rounding to `scale` decimal places.
    ///
    /// Rounds to nearest unless that would bring the price within `floor`
    /// of mid. In that case the price is rounded away from mid instead
    /// (ask up, bid down), so a quote that clears `floor` in `f64` still
    /// clears it once published.
    ///
    /// Fails for NaN/infinite values or magnitudes `Decimal` cannot hold.
    pub fn from_quote(value: f64, side: Side, floor: f64, scale: u32) -> Result<Self> {
        if !value.is_finite() {
            return Err(CoreError::PriceConversion(format!(
                "non-finite {side} price {value}"
            )));
        }
        let d = Decimal::from_f64_retain(value).ok_or_else(|| {
            CoreError::PriceConversion(format!("{side} price {value} out of decimal range"))
        })?;

        let nearest = d.round_dp(scale);
        let distance = side.sign() * nearest.to_f64().unwrap_or(0.0);
        if distance >= floor {
            return Ok(Self(nearest));
        }
        let strategy = match side {
            Side::Ask => RoundingStrategy::ToPositiveInfinity,
            Side::Bid => RoundingStrategy::ToNegativeInfinity,
        };
        Ok(Self(d.round_dp_with_strategy(scale, strategy)))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
