//! Insights module
//!
//! Rule-based observations about the filtered user segment (revenue level,
//! engagement, growth, sample size), computed from the same snapshot as the
//! base metrics.

pub mod engine;
pub mod types;

pub use engine::generate_insights;
pub use types::{Impact, Insight, InsightCategory, InsightInput, InsightSummary, InsightType};
