//! Notional bucket sizes.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Ordered notional sizes the ladder quotes, one row per bucket.
///
/// Invariant: every size is finite and positive, and the sequence is
/// strictly increasing. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Buckets(Vec<f64>);

impl Buckets {
    /// Validate and wrap a bucket list. An empty list is allowed.
    pub fn new(sizes: Vec<f64>) -> Result<Self> {
        for (i, size) in sizes.iter().enumerate() {
            if !size.is_finite() || *size <= 0.0 {
                return Err(CoreError::InvalidInput(format!(
                    "bucket[{i}] = {size} must be finite and positive"
                )));
            }
        }
        if let Some(i) = sizes.windows(2).position(|w| w[1] <= w[0]) {
            return Err(CoreError::InvalidInput(format!(
                "buckets must be strictly increasing: bucket[{}] = {} follows {}",
                i + 1,
                sizes[i + 1],
                sizes[i]
            )));
        }
        Ok(Self(sizes))
    }

    /// Buckets `1, 2, ..., n`.
    pub fn sequential(n: usize) -> Self {
        Self((1..=n).map(|i| i as f64).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl<'de> Deserialize<'de> for Buckets {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let sizes = Vec::<f64>::deserialize(deserializer)?;
        Buckets::new(sizes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential() {
        let buckets = Buckets::sequential(27);
        assert_eq!(buckets.len(), 27);
        assert_eq!(buckets.as_slice()[0], 1.0);
        assert_eq!(buckets.as_slice()[26], 27.0);
    }

    #[test]
    fn test_empty_is_valid() {
        let buckets = Buckets::new(vec![]).unwrap();
        assert!(buckets.is_empty());
        assert_eq!(buckets.iter().count(), 0);
    }

    #[test]
    fn test_rejects_non_increasing() {
        let err = Buckets::new(vec![1.0, 2.0, 2.0]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(Buckets::new(vec![3.0, 1.0]).is_err());
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        assert!(Buckets::new(vec![0.0, 1.0]).is_err());
        assert!(Buckets::new(vec![-1.0]).is_err());
        assert!(Buckets::new(vec![1.0, f64::NAN]).is_err());
        assert!(Buckets::new(vec![1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Buckets = serde_json::from_str("[10000.0, 50000.0, 100000.0]").unwrap();
        assert_eq!(ok.len(), 3);

        let bad: std::result::Result<Buckets, _> = serde_json::from_str("[5.0, 4.0]");
        assert!(bad.is_err());
    }
}
