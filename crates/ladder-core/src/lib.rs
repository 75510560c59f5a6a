//! Core domain types for the price ladder.
//!
//! This crate provides the primitives shared by the pricer and its consumers:
//! - `Side`: which side of the ladder a quote belongs to
//! - `Buckets`: the validated, strictly increasing notional sizes
//! - `Price`: precision-safe decimal price for published snapshots
//! - `CoreError`: input/config validation failures

pub mod bucket;
pub mod decimal;
pub mod error;
pub mod side;

pub use bucket::Buckets;
pub use decimal::Price;
pub use error::{CoreError, Result};
pub use side::Side;
