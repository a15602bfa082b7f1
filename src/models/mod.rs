//! Data models module
//!
//! Contains the data structures shared across the pipeline:
//! - User and report records
//! - Filter specifications
//! - Canonical base metrics

pub mod filter;
pub mod metrics;
pub mod report;
pub mod user;

pub use filter::{FilterSpec, RawFilter, StatusFilter};
pub use metrics::BaseMetrics;
pub use report::{NewReport, ReportRecord, ReportStatus};
pub use user::{Country, UserRecord, UserStatus};
