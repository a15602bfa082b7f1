//! Export module for CSV and text report output
//!
//! Every export renders the exact filtered collection of a dashboard snapshot
//! (see `Dashboard::export_snapshot`), never a re-filtered copy.

pub mod csv_export;
pub mod text_report;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::UserRecord;
use crate::DashboardError;

pub use csv_export::{render_user_summary_csv, render_users_csv};
pub use text_report::{format_signup_date, render_text_report};

/// Export kinds offered by the users tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    /// Full seven-column CSV
    Csv,
    /// Four-column CSV (name, email, signup, status)
    SummaryCsv,
    /// Plain-text user report
    Text,
}

impl std::str::FromStr for ExportKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportKind::Csv),
            "summary-csv" => Ok(ExportKind::SummaryCsv),
            "text" | "txt" => Ok(ExportKind::Text),
            _ => Err(DashboardError::InvalidExportKind(s.to_string())),
        }
    }
}

impl ExportKind {
    /// Get file extension for the kind
    pub fn extension(&self) -> &'static str {
        match self {
            ExportKind::Csv | ExportKind::SummaryCsv => "csv",
            ExportKind::Text => "txt",
        }
    }

    /// File name prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            ExportKind::Csv => "enhanced-analytics-data",
            ExportKind::SummaryCsv => "users-data",
            ExportKind::Text => "users-report",
        }
    }

    /// `<prefix>-YYYY-MM-DD.<ext>`
    pub fn file_name(&self, date: NaiveDate) -> String {
        generate_export_filename(self.prefix(), date, self.extension())
    }
}

/// Get the default export directory (Downloads folder or temp dir)
pub fn get_export_directory() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(std::env::temp_dir)
}

/// Generate a dated filename for exports
pub fn generate_export_filename(prefix: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}-{}.{}", prefix, date.format("%Y-%m-%d"), extension)
}

/// Render `users` as `kind`
pub fn render(
    kind: ExportKind,
    users: &[UserRecord],
    report_title: &str,
    today: NaiveDate,
) -> Result<String, DashboardError> {
    match kind {
        ExportKind::Csv => render_users_csv(users),
        ExportKind::SummaryCsv => render_user_summary_csv(users),
        ExportKind::Text => Ok(render_text_report(users, report_title, today)),
    }
}

/// Render `users` and write them into `dir`, returning the written path
pub fn write_export(
    kind: ExportKind,
    users: &[UserRecord],
    dir: &Path,
    report_title: &str,
    today: NaiveDate,
) -> Result<PathBuf, DashboardError> {
    let content = render(kind, users, report_title, today)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(kind.file_name(today));
    std::fs::write(&path, content)?;

    tracing::info!("Exported {} users to {}", users.len(), path.display());

    Ok(path)
}
