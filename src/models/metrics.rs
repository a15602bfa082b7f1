//! Metrics data types
//!
//! The canonical aggregate every dashboard surface is derived from

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::user::Country;

/// Aggregates over one filtered user collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseMetrics {
    pub total_revenue: u64,
    pub active_users: usize,
    pub inactive_users: usize,
    pub pending_users: usize,
    pub total_users: usize,
    /// Active share as a percentage (0-100)
    pub conversion_rate: f64,
    pub conversions: u64,
    pub avg_revenue: f64,
    /// Only countries present in the collection appear here
    pub country_distribution: BTreeMap<Country, usize>,
}

impl BaseMetrics {
    /// Metrics of an empty collection
    pub fn empty() -> Self {
        Self {
            total_revenue: 0,
            active_users: 0,
            inactive_users: 0,
            pending_users: 0,
            total_users: 0,
            conversion_rate: 0.0,
            conversions: 0,
            avg_revenue: 0.0,
            country_distribution: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_users == 0
    }
}

impl Default for BaseMetrics {
    fn default() -> Self {
        Self::empty()
    }
}
