//! Metrics calculation module
//!
//! Reduces a filtered user collection to the canonical [`BaseMetrics`].
//! Every number the dashboard displays is derived from this one value.

pub mod base;

pub use base::{compute_base_metrics, CONVERSION_FACTOR};
pub use crate::models::BaseMetrics;
