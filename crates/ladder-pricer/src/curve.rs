//! Base half-width curve.
//!
//! The curve gives the unskewed half-width of the ladder at a bucket:
//! deeper size, wider natural spread. It is calibration data, so the
//! pricer only sees it through [`CurveModel`].

use std::fmt;

use ladder_core::{CoreError, Result};

/// Unskewed half-width as a function of bucket size.
pub trait CurveModel: fmt::Debug + Send + Sync {
    /// Half-width at `x`. Pure and total for `x >= 0`.
    fn base_halfwidth(&self, x: f64) -> f64;

    /// Verify the curve is finite, non-negative and non-decreasing over
    /// `points` (which must be sorted ascending).
    fn check_monotone(&self, points: &[f64]) -> Result<()> {
        let mut prev: Option<(f64, f64)> = None;
        for &x in points {
            let y = self.base_halfwidth(x);
            if !y.is_finite() || y < 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "curve value {y} at x = {x} must be finite and non-negative"
                )));
            }
            if let Some((px, py)) = prev {
                if y < py {
                    return Err(CoreError::InvalidConfig(format!(
                        "curve decreases between x = {px} ({py}) and x = {x} ({y})"
                    )));
                }
            }
            prev = Some((x, y));
        }
        Ok(())
    }
}

/// Polynomial curve evaluated with Horner's scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialCurve {
    /// Lowest order first: `c0 + c1*x + c2*x^2 + ...`.
    coefficients: Vec<f64>,
}

impl PolynomialCurve {
    pub fn new(coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(CoreError::InvalidConfig(
                "polynomial needs at least one coefficient".to_string(),
            ));
        }
        if let Some(c) = coefficients.iter().find(|c| !c.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "polynomial coefficient {c} is not finite"
            )));
        }
        Ok(Self { coefficients })
    }

    /// `intercept + slope * x`.
    pub fn linear(intercept: f64, slope: f64) -> Self {
        Self {
            coefficients: vec![intercept, slope],
        }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }
}

impl CurveModel for PolynomialCurve {
    #[inline]
    fn base_halfwidth(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * x + c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricerConfig;

    #[test]
    fn test_linear_evaluation() {
        let curve = PolynomialCurve::linear(0.5, 2.0);
        assert_eq!(curve.degree(), 1);
        assert_eq!(curve.base_halfwidth(0.0), 0.5);
        assert_eq!(curve.base_halfwidth(3.0), 6.5);
    }

    #[test]
    fn test_horner_matches_power_sum() {
        let coefficients = vec![1.0, -2.0, 0.5, 0.25];
        let curve = PolynomialCurve::new(coefficients.clone()).unwrap();
        for x in [0.0_f64, 0.5, 1.0, 2.0, 7.75] {
            let expected: f64 = coefficients
                .iter()
                .enumerate()
                .map(|(i, c)| c * x.powi(i as i32))
                .sum();
            let actual = curve.base_halfwidth(x);
            assert!((actual - expected).abs() <= 1e-12 * expected.abs().max(1.0));
        }
    }

    #[test]
    fn test_default_calibration_is_degree_8_and_monotone() {
        let config = PricerConfig::default();
        let curve = PolynomialCurve::new(config.curve_coefficients).unwrap();
        assert_eq!(curve.degree(), 8);
        assert!(curve.check_monotone(config.buckets.as_slice()).is_ok());

        // Natural spread widens with size.
        assert!(curve.base_halfwidth(27.0) > curve.base_halfwidth(1.0));
        assert!(curve.base_halfwidth(27.0) < 0.001);
    }

    #[test]
    fn test_rejects_bad_coefficients() {
        assert!(matches!(
            PolynomialCurve::new(vec![]),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(PolynomialCurve::new(vec![0.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_check_monotone_detects_decrease() {
        // 1 - x/10 falls over [0, 5].
        let curve = PolynomialCurve::linear(1.0, -0.1);
        let err = curve.check_monotone(&[0.0, 1.0, 5.0]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_check_monotone_detects_negative() {
        let curve = PolynomialCurve::linear(-0.001, 0.0);
        assert!(curve.check_monotone(&[1.0]).is_err());
    }
}
