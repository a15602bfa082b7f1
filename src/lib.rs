//! Insightboard - analytics dashboard core
//!
//! This library provides the filtering and derived-data pipeline behind the
//! Insightboard dashboard. It handles:
//! - Mock base dataset generation (users and reports)
//! - Filter evaluation over the base dataset
//! - Canonical base metrics for the filtered set
//! - Summary cards, analytics and chart series built from those metrics
//! - Insights, table paging and CSV/text export over the same snapshot
//! - The dashboard state orchestrator and its auto-refresh task

pub mod config;
pub mod dashboard;
pub mod export;
pub mod filter;
pub mod generator;
pub mod insights;
pub mod metrics;
pub mod models;
pub mod table;
pub mod views;

use tracing_subscriber::EnvFilter;

use config::DashboardConfig;
use dashboard::Dashboard;

/// Error type for the dashboard pipeline
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Load failed: {0}")]
    LoadFailure(String),

    #[error("Filter apply failed: {0}")]
    FilterApplyFailure(String),

    #[error("Refresh failed: {0}")]
    RefreshFailure(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid country: {0}")]
    InvalidCountry(String),

    #[error("Invalid export kind: {0}")]
    InvalidExportKind(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dashboard has been shut down")]
    TornDown,
}

// Serialized as the display string for UI consumers
impl serde::Serialize for DashboardError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Install the fmt subscriber; `RUST_LOG` overrides the `info` default.
/// Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// ============================================================================
// Application Setup
// ============================================================================

pub async fn run() -> Result<(), DashboardError> {
    init_tracing();

    tracing::info!("Starting Insightboard");

    let config = DashboardConfig::from_env()?;
    tracing::info!(
        "Generating {} users, auto-refresh every {}s",
        config.user_count,
        config.auto_refresh_secs
    );

    let dashboard = Dashboard::new(config.clone())?;

    // Load failures are kept in dashboard state; keep serving stale data
    if let Err(e) = dashboard.initialize().await {
        tracing::warn!("Initial load failed: {}", e);
    }

    let snapshot = dashboard.snapshot().await;
    for card in &snapshot.summary {
        tracing::info!("{}: {} ({})", card.title, card.value, card.change);
    }
    for insight in &snapshot.insights.insights {
        tracing::info!("{} {}", insight.insight_type.icon(), insight.title);
    }

    let _auto_refresh = dashboard
        .start_auto_refresh(config.auto_refresh_period())
        .await?;

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down");
    dashboard.shutdown().await;

    Ok(())
}
