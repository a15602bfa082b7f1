//! Derived view builders
//!
//! Pure functions from [`BaseMetrics`] to the shapes each display surface
//! needs:
//! - Summary cards
//! - Monthly analytics series
//! - Chart series (revenue trend, device usage, user distribution)
//! - Analytics cards and per-chart insights, read off the series above
//!
//! Builders never look at raw records. When the metrics describe an empty
//! collection every builder returns its documented default shape.

pub mod analytics;
pub mod chart_insights;
pub mod charts;
pub mod summary;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::BaseMetrics;

pub use analytics::{build_analytics, build_analytics_cards, default_analytics, AnalyticsPoint};
pub use chart_insights::{
    build_chart_insights, ChartInsights, ConversionInsights, DeviceInsights, DistributionInsights,
    RevenueInsights,
};
pub use charts::{build_chart_data, default_chart_data, ChartData, ChartSegment, TrendPoint};
pub use summary::{build_summary_cards, default_summary_cards, ChangeType, MetricCard};

/// Month labels shared by the analytics and chart series
pub const MONTHS: [&str; 7] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"];

/// Round half away from zero to one decimal
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Every derived view for one metrics value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedViews {
    pub summary: Vec<MetricCard>,
    pub analytics: Vec<AnalyticsPoint>,
    pub analytics_cards: Vec<MetricCard>,
    pub charts: ChartData,
    pub chart_insights: ChartInsights,
}

impl DerivedViews {
    /// Defaults shown before any data exists
    pub fn defaults() -> Self {
        let analytics = default_analytics();
        let charts = default_chart_data();
        Self {
            summary: default_summary_cards(),
            analytics_cards: build_analytics_cards(&analytics, 0),
            analytics,
            chart_insights: build_chart_insights(&charts),
            charts,
        }
    }
}

/// Build all views from `metrics`, drawing jitter from `rng`
pub fn build_views<R: Rng>(metrics: &BaseMetrics, rng: &mut R) -> DerivedViews {
    let analytics = build_analytics(metrics, rng);
    let charts = build_chart_data(metrics, rng);
    DerivedViews {
        summary: build_summary_cards(metrics),
        analytics_cards: build_analytics_cards(&analytics, metrics.total_users),
        analytics,
        chart_insights: build_chart_insights(&charts),
        charts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_metrics_yield_defaults() {
        let mut rng = StdRng::seed_from_u64(5);
        let views = build_views(&BaseMetrics::empty(), &mut rng);
        assert_eq!(views, DerivedViews::defaults());
    }

    #[test]
    fn test_same_seed_same_views() {
        let mut metrics = BaseMetrics::empty();
        metrics.total_users = 40;
        metrics.active_users = 25;
        metrics.total_revenue = 200_000;
        metrics.conversion_rate = 62.5;
        metrics.conversions = 9;

        let a = build_views(&metrics, &mut StdRng::seed_from_u64(9));
        let b = build_views(&metrics, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_cards_and_insights_follow_series() {
        let mut metrics = BaseMetrics::empty();
        metrics.total_users = 20;
        metrics.total_revenue = 90_000;

        let views = build_views(&metrics, &mut StdRng::seed_from_u64(3));

        let sessions: u64 = views.analytics.iter().map(|p| p.sessions).sum();
        assert_eq!(views.analytics_cards[0].raw_value, sessions as f64);
        // 20 users is 40% of target, clamped to 60
        assert_eq!(views.analytics_cards[3].value, "60.0%");
        assert_eq!(views.chart_insights, build_chart_insights(&views.charts));
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(33.25), 33.3);
        assert_eq!(round_tenth(-12.75), -12.8);
        assert_eq!(round_tenth(60.0), 60.0);
    }
}
