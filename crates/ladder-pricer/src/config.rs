//! Pricing configuration.

use ladder_core::{Buckets, CoreError, Result};
use serde::{Deserialize, Serialize};

/// How the two mid-crossing guards combine when a quote is skewed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RedistributionMode {
    /// Ask guard first; the bid guard only runs if the ask guard did not fire.
    /// Redistributed width is floored at `min_half_spread`.
    #[default]
    Exclusive,
    /// Both guards run in order and the bid guard overwrites the ask guard.
    /// Kept to reproduce legacy ladders.
    Sequential,
}

/// What the curve is evaluated at for each ladder row.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CurveAxis {
    /// Bucket notional size.
    #[default]
    Notional,
    /// Zero-based row ordinal. Used when buckets span several orders of
    /// magnitude (10k .. 1bn) and the curve is calibrated on row index.
    Ordinal,
}

/// Pricer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricerConfig {
    /// Minimum distance from mid for either quote (price units).
    #[serde(default = "default_min_half_spread")]
    pub min_half_spread: f64,

    /// Price shift per unit of position.
    /// A long position shifts both quotes down (sell more eagerly, buy less).
    #[serde(default = "default_skew_factor")]
    pub skew_factor: f64,

    /// Polynomial coefficients, lowest order first.
    #[serde(default = "default_curve_coefficients")]
    pub curve_coefficients: Vec<f64>,

    /// Notional bucket sizes, strictly increasing.
    #[serde(default = "default_buckets")]
    pub buckets: Buckets,

    #[serde(default)]
    pub curve_axis: CurveAxis,

    #[serde(default)]
    pub redistribution: RedistributionMode,

    /// Decimal places kept in published snapshots.
    #[serde(default = "default_price_scale")]
    pub price_scale: u32,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            min_half_spread: default_min_half_spread(),
            skew_factor: default_skew_factor(),
            curve_coefficients: default_curve_coefficients(),
            buckets: default_buckets(),
            curve_axis: CurveAxis::default(),
            redistribution: RedistributionMode::default(),
            price_scale: default_price_scale(),
        }
    }
}

impl PricerConfig {
    /// Check parameters that cannot be enforced by the type system.
    ///
    /// Pricing parameters fail with `InvalidInput`; curve and output
    /// settings with `InvalidConfig`.
    pub fn validate(&self) -> Result<()> {
        if !self.min_half_spread.is_finite() || self.min_half_spread <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "min_half_spread must be finite and > 0, got {}",
                self.min_half_spread
            )));
        }
        if !self.skew_factor.is_finite() || self.skew_factor <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "skew_factor must be finite and > 0, got {}",
                self.skew_factor
            )));
        }
        if self.curve_coefficients.is_empty() {
            return Err(CoreError::InvalidConfig(
                "curve_coefficients must not be empty".to_string(),
            ));
        }
        // Decimal holds at most 28 fractional digits.
        if self.price_scale > 28 {
            return Err(CoreError::InvalidConfig(format!(
                "price_scale must be <= 28, got {}",
                self.price_scale
            )));
        }
        Ok(())
    }
}

fn default_min_half_spread() -> f64 {
    0.00003
}
fn default_skew_factor() -> f64 {
    0.00001
}
/// Degree-8 calibration. All terms are non-negative so the curve is
/// monotone on x >= 0; ~0.00026 at bucket 27.
fn default_curve_coefficients() -> Vec<f64> {
    vec![
        0.0, 4.0e-6, 8.0e-8, 2.0e-9, 5.0e-11, 1.0e-12, 2.0e-14, 4.0e-16, 1.0e-17,
    ]
}
fn default_buckets() -> Buckets {
    Buckets::sequential(27)
}
fn default_price_scale() -> u32 {
    8
}
