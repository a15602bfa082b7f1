//! Periodic background refresh
//!
//! The task is owned by an [`AutoRefreshHandle`]. Dropping or cancelling the
//! handle aborts it, and `Dashboard::shutdown` aborts every task it started.

use std::time::Duration;

use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::Dashboard;
use crate::DashboardError;

/// Guard for a running auto-refresh task
#[derive(Debug)]
pub struct AutoRefreshHandle {
    task: JoinHandle<()>,
    period: Duration,
}

impl AutoRefreshHandle {
    /// `period` must be non-zero
    pub(crate) fn spawn(dashboard: Dashboard, period: Duration) -> Self {
        let task = tokio::spawn(auto_refresh_task(dashboard, period));
        Self { task, period }
    }

    pub(crate) fn abort_handle(&self) -> AbortHandle {
        self.task.abort_handle()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the task; no further ticks fire
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for AutoRefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Refresh once per `period`, first tick one period after start
async fn auto_refresh_task(dashboard: Dashboard, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!("Auto-refresh started every {:?}", period);

    loop {
        ticker.tick().await;

        match dashboard.refresh().await {
            Ok(snapshot) => {
                tracing::debug!("Auto-refresh produced snapshot {}", snapshot.generation);
            }
            Err(DashboardError::TornDown) => {
                tracing::info!("Dashboard torn down, stopping auto-refresh");
                break;
            }
            Err(e) => {
                tracing::warn!("Auto-refresh failed: {}", e);
            }
        }
    }
}
