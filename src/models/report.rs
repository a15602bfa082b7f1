//! Report catalog types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Generation status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Completed,
    Processing,
    Scheduled,
}

/// A generated (or scheduled) report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: ReportStatus,
    pub last_generated: NaiveDate,
    /// Human readable size, e.g. "2.4 MB"
    pub size: String,
    /// File type label, e.g. "PDF"
    pub report_type: String,
}

/// A report submitted by the UI before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub status: ReportStatus,
    pub last_generated: NaiveDate,
    pub size: String,
    pub report_type: String,
}

impl NewReport {
    /// Attach an id
    pub fn with_id(self, id: u64) -> ReportRecord {
        ReportRecord {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            last_generated: self.last_generated,
            size: self.size,
            report_type: self.report_type,
        }
    }
}

/// Next free report id: one past the largest id in use
pub fn next_report_id(reports: &[ReportRecord]) -> u64 {
    reports.iter().map(|r| r.id).max().unwrap_or(0) + 1
}
