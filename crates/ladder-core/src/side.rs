//! Quote side.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ladder side: bid (below mid) or ask (above mid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// Returns -1 for bid, 1 for ask (direction away from mid).
    pub fn sign(&self) -> f64 {
        match self {
            Self::Bid => -1.0,
            Self::Ask => 1.0,
        }
    }

    /// Metric/log label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
