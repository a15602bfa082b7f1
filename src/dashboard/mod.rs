//! Dashboard state orchestrator
//!
//! Owns the base dataset, the draft and applied filters, and the loading and
//! error status. Every change to the base dataset or the applied filter
//! produces a new [`DerivedSnapshot`]; readers only ever see whole snapshots.
//!
//! - `initialize` / `refresh` go through the [`DataSource`] after a simulated
//!   latency
//! - `apply_filter` is last-writer-wins: each call takes a ticket when it is
//!   made, and only the newest ticket may commit
//! - `reset_filter` commits immediately and invalidates in-flight applies
//! - after `shutdown`, every pending continuation discards its result

pub mod auto_refresh;
pub mod snapshot;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::task::AbortHandle;

use crate::config::DashboardConfig;
use crate::export::{self, ExportKind};
use crate::generator::{BaseDataset, DataSource, MockDataSource};
use crate::models::report::next_report_id;
use crate::models::{Country, FilterSpec, NewReport, RawFilter, ReportRecord, UserRecord};
use crate::table::{countries_present, TablePage, TableQuery};
use crate::DashboardError;

pub use auto_refresh::AutoRefreshHandle;
pub use snapshot::DerivedSnapshot;

/// User-visible message for a failed load
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load data";
/// User-visible message for a failed filter apply
pub const FILTER_FAILURE_MESSAGE: &str = "Failed to apply filters";
/// User-visible message for a failed refresh
pub const REFRESH_FAILURE_MESSAGE: &str = "Failed to refresh data";

/// Lifecycle of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardStatus {
    /// First load has not settled yet
    Initializing,
    Ready,
}

/// Source of "today" for generation and insights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Result of a filter apply that was not torn down
#[derive(Debug, Clone)]
pub enum ApplyOutcome {
    /// This call's filter is now the applied filter
    Committed(Arc<DerivedSnapshot>),
    /// A later apply or a reset was issued first; nothing was written
    Superseded,
}

impl ApplyOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, ApplyOutcome::Committed(_))
    }
}

struct DashboardState {
    base: BaseDataset,
    draft: FilterSpec,
    applied: FilterSpec,
    snapshot: Arc<DerivedSnapshot>,
    status: DashboardStatus,
    error: Option<String>,
    last_updated: Option<DateTime<Local>>,
    /// Latest filter ticket handed out
    apply_ticket: u64,
    generation: u64,
    /// Jitter source for derived views
    rng: StdRng,
    torn_down: bool,
    auto_refresh: Vec<AbortHandle>,
}

impl DashboardState {
    fn new(rng: StdRng) -> Self {
        Self {
            base: BaseDataset::default(),
            draft: FilterSpec::default(),
            applied: FilterSpec::default(),
            snapshot: Arc::new(DerivedSnapshot::initial()),
            status: DashboardStatus::Initializing,
            error: None,
            last_updated: None,
            apply_ticket: 0,
            generation: 0,
            rng,
            torn_down: false,
            auto_refresh: Vec::new(),
        }
    }

    fn ensure_live(&self) -> Result<(), DashboardError> {
        if self.torn_down {
            Err(DashboardError::TornDown)
        } else {
            Ok(())
        }
    }

    /// Enter a simulated-latency step; it stays pending until the guard drops
    fn begin<'a>(
        &mut self,
        in_flight: &'a AtomicUsize,
    ) -> Result<LoadingGuard<'a>, DashboardError> {
        self.ensure_live()?;
        self.error = None;
        Ok(LoadingGuard::enter(in_flight))
    }

    fn recompute(&mut self, today: NaiveDate) {
        self.generation += 1;
        let snapshot = DerivedSnapshot::compute(
            &self.base.users,
            &self.applied,
            &mut self.rng,
            today,
            self.generation,
        );
        self.snapshot = Arc::new(snapshot);
    }
}

/// Counts one pending simulated-latency step
///
/// Decrements on drop, so a step whose future is cancelled mid-latency still
/// leaves the loading state.
struct LoadingGuard<'a> {
    in_flight: &'a AtomicUsize,
}

impl<'a> LoadingGuard<'a> {
    fn enter(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self { in_flight }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

struct Inner {
    state: RwLock<DashboardState>,
    /// Simulated-latency steps currently pending
    in_flight: AtomicUsize,
    source: Mutex<Box<dyn DataSource>>,
    config: DashboardConfig,
    clock: Clock,
}

/// Cheap-clone handle to one dashboard session
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("config", &self.inner.config)
            .field("clock", &self.inner.clock)
            .finish()
    }
}

impl Dashboard {
    /// Dashboard over mock data, using the system clock
    pub fn new(config: DashboardConfig) -> Result<Self, DashboardError> {
        let source = MockDataSource::new(config.seed, config.user_count);
        Self::with_source(config, source, Clock::System)
    }

    pub fn with_source(
        config: DashboardConfig,
        source: impl DataSource + 'static,
        clock: Clock,
    ) -> Result<Self, DashboardError> {
        config.validate()?;

        // Views draw from their own stream so generation stays reproducible
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            inner: Arc::new(Inner {
                state: RwLock::new(DashboardState::new(rng)),
                in_flight: AtomicUsize::new(0),
                source: Mutex::new(Box::new(source)),
                config,
                clock,
            }),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    fn today(&self) -> NaiveDate {
        self.inner.clock.today()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Generate the base dataset and build the first snapshot
    ///
    /// On failure the error message is stored, previous data stays in place
    /// and the dashboard still becomes ready.
    pub async fn initialize(&self) -> Result<(), DashboardError> {
        let _loading = self.inner.state.write().await.begin(&self.inner.in_flight)?;
        tracing::info!("Loading base dataset");

        tokio::time::sleep(self.inner.config.latency.load()).await;

        let today = self.today();
        let mut source = self.inner.source.lock().await;
        let mut state = self.inner.state.write().await;
        state.ensure_live()?;
        state.status = DashboardStatus::Ready;

        match source.load(today) {
            Ok(dataset) => {
                if dataset.is_empty() {
                    tracing::warn!("Data source returned no users");
                }
                tracing::info!(
                    "Loaded {} users and {} reports",
                    dataset.users.len(),
                    dataset.reports.len()
                );
                state.base = dataset;
                state.recompute(today);
                state.last_updated = Some(Local::now());
                Ok(())
            }
            Err(e) => {
                tracing::error!("{}: {}", LOAD_FAILURE_MESSAGE, e);
                state.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                Err(DashboardError::LoadFailure(e.to_string()))
            }
        }
    }

    /// Mark the dashboard torn down and stop its auto-refresh tasks
    pub async fn shutdown(&self) {
        let mut state = self.inner.state.write().await;
        if state.torn_down {
            return;
        }
        state.torn_down = true;
        for task in state.auto_refresh.drain(..) {
            task.abort();
        }
        tracing::info!("Dashboard shut down");
    }

    pub async fn is_torn_down(&self) -> bool {
        self.inner.state.read().await.torn_down
    }

    /// Refresh every `period` until the handle is dropped or the dashboard
    /// shuts down
    pub async fn start_auto_refresh(
        &self,
        period: Duration,
    ) -> Result<AutoRefreshHandle, DashboardError> {
        if period.is_zero() {
            return Err(DashboardError::Config(
                "auto-refresh period must be non-zero".to_string(),
            ));
        }

        let mut state = self.inner.state.write().await;
        state.ensure_live()?;
        state.auto_refresh.retain(|task| !task.is_finished());

        let handle = AutoRefreshHandle::spawn(self.clone(), period);
        state.auto_refresh.push(handle.abort_handle());
        Ok(handle)
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Commit `spec` after the apply latency unless a newer apply or a reset
    /// was issued in the meantime
    pub async fn apply_filter(&self, spec: FilterSpec) -> Result<ApplyOutcome, DashboardError> {
        let (ticket, _loading) = {
            let mut state = self.inner.state.write().await;
            let loading = state.begin(&self.inner.in_flight)?;
            state.apply_ticket += 1;
            state.draft = spec.clone();
            (state.apply_ticket, loading)
        };

        tokio::time::sleep(self.inner.config.latency.apply()).await;

        let today = self.today();
        let mut state = self.inner.state.write().await;
        state.ensure_live()?;

        if state.apply_ticket != ticket {
            tracing::warn!(
                "Discarding filter apply #{}, superseded by #{}",
                ticket,
                state.apply_ticket
            );
            return Ok(ApplyOutcome::Superseded);
        }

        state.applied = spec;
        state.recompute(today);
        tracing::info!(
            "Applied filter #{}: {} users match",
            ticket,
            state.snapshot.users.len()
        );

        Ok(ApplyOutcome::Committed(Arc::clone(&state.snapshot)))
    }

    /// Parse form input and apply it; unparsable input leaves data untouched
    pub async fn apply_raw_filter(&self, raw: &RawFilter) -> Result<ApplyOutcome, DashboardError> {
        match raw.parse() {
            Ok(spec) => self.apply_filter(spec).await,
            Err(e) => {
                tracing::warn!("{}: {}", FILTER_FAILURE_MESSAGE, e);
                let mut state = self.inner.state.write().await;
                state.ensure_live()?;
                state.error = Some(FILTER_FAILURE_MESSAGE.to_string());
                Err(DashboardError::FilterApplyFailure(e.to_string()))
            }
        }
    }

    /// Put both filters back to the default, with no latency
    pub async fn reset_filter(&self) -> Result<Arc<DerivedSnapshot>, DashboardError> {
        let today = self.today();
        let mut state = self.inner.state.write().await;
        state.ensure_live()?;

        state.apply_ticket += 1;
        state.draft = FilterSpec::default();
        state.applied = FilterSpec::default();
        state.recompute(today);
        tracing::info!("Filters reset");

        Ok(Arc::clone(&state.snapshot))
    }

    /// Edit the draft only; derived data keeps following the applied filter
    pub async fn set_draft_filter(&self, spec: FilterSpec) {
        self.inner.state.write().await.draft = spec;
    }

    pub async fn draft_filter(&self) -> FilterSpec {
        self.inner.state.read().await.draft.clone()
    }

    pub async fn applied_filter(&self) -> FilterSpec {
        self.inner.state.read().await.applied.clone()
    }

    /// Number of criteria set on the applied filter
    pub async fn active_filter_count(&self) -> usize {
        self.inner.state.read().await.applied.active_filter_count()
    }

    /// Whether the draft differs from the applied filter
    pub async fn has_unapplied_changes(&self) -> bool {
        let state = self.inner.state.read().await;
        state.draft != state.applied
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Partially update the base users and recompute under the current
    /// applied filter
    pub async fn refresh(&self) -> Result<Arc<DerivedSnapshot>, DashboardError> {
        let _loading = self.inner.state.write().await.begin(&self.inner.in_flight)?;
        tracing::debug!("Refreshing base dataset");

        tokio::time::sleep(self.inner.config.latency.refresh()).await;

        let today = self.today();
        let mut source = self.inner.source.lock().await;
        let mut state = self.inner.state.write().await;
        state.ensure_live()?;

        match source.refresh(&state.base.users, today) {
            Ok(users) => {
                state.base.users = users;
                state.recompute(today);
                state.last_updated = Some(Local::now());
                tracing::info!("Refreshed {} users", state.base.users.len());
                Ok(Arc::clone(&state.snapshot))
            }
            Err(e) => {
                tracing::error!("{}: {}", REFRESH_FAILURE_MESSAGE, e);
                state.error = Some(REFRESH_FAILURE_MESSAGE.to_string());
                Err(DashboardError::RefreshFailure(e.to_string()))
            }
        }
    }

    // ========================================================================
    // Read surface
    // ========================================================================

    pub async fn snapshot(&self) -> Arc<DerivedSnapshot> {
        Arc::clone(&self.inner.state.read().await.snapshot)
    }

    /// Exactly the filtered users the current views were built from
    pub async fn export_snapshot(&self) -> Vec<UserRecord> {
        self.snapshot().await.users.clone()
    }

    pub async fn status(&self) -> DashboardStatus {
        self.inner.state.read().await.status
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.state.read().await.error.clone()
    }

    pub async fn last_updated(&self) -> Option<DateTime<Local>> {
        self.inner.state.read().await.last_updated
    }

    pub async fn table(&self, query: &TableQuery) -> TablePage {
        self.snapshot().await.table(query)
    }

    pub async fn countries(&self) -> Vec<Country> {
        countries_present(&self.snapshot().await.users)
    }

    // ========================================================================
    // Reports
    // ========================================================================

    pub async fn reports(&self) -> Vec<ReportRecord> {
        self.inner.state.read().await.base.reports.clone()
    }

    /// Append a report with the next free id
    pub async fn add_report(&self, report: NewReport) -> Result<ReportRecord, DashboardError> {
        let mut state = self.inner.state.write().await;
        state.ensure_live()?;

        let record = report.with_id(next_report_id(&state.base.reports));
        state.base.reports.push(record.clone());
        tracing::info!("Added report {} ({})", record.id, record.title);

        Ok(record)
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Render the current snapshot's users
    pub async fn render_export(&self, kind: ExportKind) -> Result<String, DashboardError> {
        let snapshot = self.snapshot().await;
        export::render(
            kind,
            &snapshot.users,
            &self.inner.config.export.report_title,
            self.today(),
        )
    }

    /// Write the current snapshot's users to the configured export directory
    pub async fn export(&self, kind: ExportKind) -> Result<PathBuf, DashboardError> {
        let snapshot = self.snapshot().await;
        let dir = self.inner.config.export.resolved_directory();
        export::write_export(
            kind,
            &snapshot.users,
            &dir,
            &self.inner.config.export.report_title,
            self.today(),
        )
    }
}
