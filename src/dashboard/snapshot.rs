//! Derived snapshot
//!
//! One immutable value holding everything derived from a committed
//! (base dataset, applied filter) pair. Views, insights, the table and export
//! all read from the same snapshot, so they can never disagree.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::filter::apply_filter;
use crate::insights::{generate_insights, InsightInput, InsightSummary};
use crate::metrics::compute_base_metrics;
use crate::models::{BaseMetrics, FilterSpec, UserRecord};
use crate::table::{query_table, TablePage, TableQuery};
use crate::views::{
    build_views, AnalyticsPoint, ChartData, ChartInsights, DerivedViews, MetricCard,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSnapshot {
    /// Filter the snapshot was computed with
    pub filter: FilterSpec,
    /// Filtered users in base-dataset order
    pub users: Vec<UserRecord>,
    pub metrics: BaseMetrics,
    pub summary: Vec<MetricCard>,
    pub analytics: Vec<AnalyticsPoint>,
    pub analytics_cards: Vec<MetricCard>,
    pub charts: ChartData,
    pub chart_insights: ChartInsights,
    pub insights: InsightSummary,
    /// Bumped on every recompute
    pub generation: u64,
}

impl DerivedSnapshot {
    /// Snapshot shown before the first load completes
    pub fn initial() -> Self {
        let views = DerivedViews::defaults();
        Self {
            filter: FilterSpec::default(),
            users: Vec::new(),
            metrics: BaseMetrics::empty(),
            summary: views.summary,
            analytics: views.analytics,
            analytics_cards: views.analytics_cards,
            charts: views.charts,
            chart_insights: views.chart_insights,
            insights: InsightSummary::empty(),
            generation: 0,
        }
    }

    /// Run the whole pipeline over `base` with `filter`
    pub fn compute<R: Rng>(
        base: &[UserRecord],
        filter: &FilterSpec,
        rng: &mut R,
        today: NaiveDate,
        generation: u64,
    ) -> Self {
        let users = apply_filter(base, filter);
        let metrics = compute_base_metrics(&users);
        let views = build_views(&metrics, rng);
        let insights = generate_insights(&InsightInput::from_snapshot(&metrics, &users, today));

        tracing::debug!(
            "Recomputed snapshot {}: {} of {} users",
            generation,
            users.len(),
            base.len()
        );

        Self {
            filter: filter.clone(),
            users,
            metrics,
            summary: views.summary,
            analytics: views.analytics,
            analytics_cards: views.analytics_cards,
            charts: views.charts,
            chart_insights: views.chart_insights,
            insights,
            generation,
        }
    }

    /// Table page over this snapshot's filtered users
    pub fn table(&self, query: &TableQuery) -> TablePage {
        query_table(&self.users, query)
    }
}
