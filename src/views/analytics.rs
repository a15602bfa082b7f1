//! Monthly analytics series
//!
//! Sessions and page views scale with the filtered user count; the per-month
//! jitter and the bounce rate are random by design and drawn from the
//! caller's generator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::summary::{card, group_thousands, ChangeType, MetricCard};
use super::{round_tenth, MONTHS};
use crate::models::BaseMetrics;

/// One month of traffic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsPoint {
    pub month: String,
    pub sessions: u64,
    pub page_views: u64,
    /// Percentage in [30, 45)
    pub bounce_rate: u64,
}

/// Series constants
pub mod scale {
    pub const USERS_PER_UNIT: f64 = 10.0;
    pub const SESSIONS_BASE: f64 = 50.0;
    pub const SESSIONS_STEP: f64 = 10.0;
    pub const SESSIONS_JITTER: f64 = 20.0;
    pub const PAGE_VIEWS_BASE: f64 = 150.0;
    pub const PAGE_VIEWS_STEP: f64 = 30.0;
    pub const PAGE_VIEWS_JITTER: f64 = 50.0;
    pub const BOUNCE_MIN: f64 = 30.0;
    pub const BOUNCE_SPREAD: f64 = 15.0;
}

/// Card thresholds and the goal-completion clamp
mod thresholds {
    pub const HIGH_SESSIONS: u64 = 500;
    pub const HIGH_PAGE_VIEWS: u64 = 1500;
    pub const LOW_BOUNCE_RATE: f64 = 40.0;
    pub const HIGH_GOAL_COMPLETION: f64 = 75.0;
    pub const GOAL_USERS: f64 = 50.0;
    pub const GOAL_MIN: f64 = 60.0;
    pub const GOAL_MAX: f64 = 95.0;
}

const CARD_DESCRIPTION: &str = "from last month";

/// max(total_users / 10, 1)
pub fn user_multiplier(metrics: &BaseMetrics) -> f64 {
    (metrics.total_users as f64 / scale::USERS_PER_UNIT).max(1.0)
}

/// Seven monthly points, Jan through Jul
pub fn build_analytics<R: Rng>(metrics: &BaseMetrics, rng: &mut R) -> Vec<AnalyticsPoint> {
    if metrics.is_empty() {
        return default_analytics();
    }

    let multiplier = user_multiplier(metrics);

    MONTHS
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let step = index as f64;
            let sessions = multiplier
                * (scale::SESSIONS_BASE
                    + step * scale::SESSIONS_STEP
                    + rng.random::<f64>() * scale::SESSIONS_JITTER);
            let page_views = multiplier
                * (scale::PAGE_VIEWS_BASE
                    + step * scale::PAGE_VIEWS_STEP
                    + rng.random::<f64>() * scale::PAGE_VIEWS_JITTER);
            let bounce_rate = rng.random::<f64>() * scale::BOUNCE_SPREAD + scale::BOUNCE_MIN;

            AnalyticsPoint {
                month: month.to_string(),
                sessions: sessions.floor() as u64,
                page_views: page_views.floor() as u64,
                bounce_rate: bounce_rate.floor() as u64,
            }
        })
        .collect()
}

/// All-zero series
pub fn default_analytics() -> Vec<AnalyticsPoint> {
    MONTHS
        .iter()
        .map(|month| AnalyticsPoint {
            month: month.to_string(),
            sessions: 0,
            page_views: 0,
            bounce_rate: 0,
        })
        .collect()
}

/// Total Sessions, Page Views, Bounce Rate, Goal Completion
///
/// Totals come from `series`; goal completion is the filtered user count
/// against a 50-user target, clamped to [60, 95]. Bounce rate and goal
/// completion are rounded to one decimal before their thresholds are checked.
pub fn build_analytics_cards(series: &[AnalyticsPoint], total_users: usize) -> Vec<MetricCard> {
    let sessions: u64 = series.iter().map(|p| p.sessions).sum();
    let page_views: u64 = series.iter().map(|p| p.page_views).sum();
    let bounce_rate = if series.is_empty() {
        0.0
    } else {
        let total: u64 = series.iter().map(|p| p.bounce_rate).sum();
        round_tenth(total as f64 / series.len() as f64)
    };
    let goal_completion = round_tenth(
        (total_users as f64 / thresholds::GOAL_USERS * 100.0)
            .clamp(thresholds::GOAL_MIN, thresholds::GOAL_MAX),
    );

    let sessions_change = if sessions > thresholds::HIGH_SESSIONS {
        "+12.5%"
    } else {
        "+8.2%"
    };
    let page_views_change = if page_views > thresholds::HIGH_PAGE_VIEWS {
        "+15.3%"
    } else {
        "+8.2%"
    };
    let bounce_change = if bounce_rate < thresholds::LOW_BOUNCE_RATE {
        "-5.1%"
    } else {
        "-2.3%"
    };
    let goal_change = if goal_completion > thresholds::HIGH_GOAL_COMPLETION {
        "+15.3%"
    } else {
        "+8.7%"
    };

    vec![
        card(
            "Total Sessions",
            group_thousands(sessions),
            sessions as f64,
            sessions_change,
            ChangeType::Positive,
            CARD_DESCRIPTION,
        ),
        card(
            "Page Views",
            group_thousands(page_views),
            page_views as f64,
            page_views_change,
            ChangeType::Positive,
            CARD_DESCRIPTION,
        ),
        card(
            "Bounce Rate",
            format!("{:.1}%", bounce_rate),
            bounce_rate,
            bounce_change,
            ChangeType::Positive,
            CARD_DESCRIPTION,
        ),
        card(
            "Goal Completion",
            format!("{:.1}%", goal_completion),
            goal_completion,
            goal_change,
            ChangeType::Positive,
            CARD_DESCRIPTION,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn metrics_with_users(total_users: usize) -> BaseMetrics {
        let mut m = BaseMetrics::empty();
        m.total_users = total_users;
        m
    }

    #[test]
    fn test_default_analytics_is_zeroed() {
        let series = default_analytics();
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].month, "Jan");
        assert_eq!(series[6].month, "Jul");
        assert!(series
            .iter()
            .all(|p| p.sessions == 0 && p.page_views == 0 && p.bounce_rate == 0));
    }

    #[test]
    fn test_series_within_bounds() {
        let metrics = metrics_with_users(50);
        let multiplier = user_multiplier(&metrics);
        assert_eq!(multiplier, 5.0);

        for seed in 0..20 {
            let series = build_analytics(&metrics, &mut StdRng::seed_from_u64(seed));
            assert_eq!(series.len(), 7);

            for (i, point) in series.iter().enumerate() {
                let step = i as f64;
                let sessions_lo = (multiplier * (50.0 + step * 10.0)).floor() as u64;
                let sessions_hi = (multiplier * (70.0 + step * 10.0)) as u64;
                assert!(point.sessions >= sessions_lo && point.sessions <= sessions_hi);

                let views_lo = (multiplier * (150.0 + step * 30.0)).floor() as u64;
                let views_hi = (multiplier * (200.0 + step * 30.0)) as u64;
                assert!(point.page_views >= views_lo && point.page_views <= views_hi);

                assert!(point.bounce_rate >= 30 && point.bounce_rate < 45);
            }
        }
    }

    #[test]
    fn test_small_populations_use_unit_multiplier() {
        let metrics = metrics_with_users(3);
        assert_eq!(user_multiplier(&metrics), 1.0);

        let series = build_analytics(&metrics, &mut StdRng::seed_from_u64(1));
        assert!(series[0].sessions >= 50 && series[0].sessions < 70);
    }

    #[test]
    fn test_empty_metrics_fall_back() {
        let series = build_analytics(&BaseMetrics::empty(), &mut StdRng::seed_from_u64(1));
        assert_eq!(series, default_analytics());
    }

    fn point(sessions: u64, page_views: u64, bounce_rate: u64) -> AnalyticsPoint {
        AnalyticsPoint {
            month: "Jan".to_string(),
            sessions,
            page_views,
            bounce_rate,
        }
    }

    #[test]
    fn test_analytics_cards_from_series() {
        let series = vec![point(400, 1200, 31), point(300, 900, 36)];
        let cards = build_analytics_cards(&series, 50);

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Total Sessions", "Page Views", "Bounce Rate", "Goal Completion"]
        );
        assert_eq!(cards[0].value, "700");
        assert_eq!(cards[0].change, "+12.5%");
        assert_eq!(cards[1].value, "2,100");
        assert_eq!(cards[1].change, "+15.3%");
        assert_eq!(cards[2].value, "33.5%");
        assert_eq!(cards[2].change, "-5.1%");
        assert_eq!(cards[3].value, "95.0%");
        assert_eq!(cards[3].change, "+15.3%");
        assert!(cards.iter().all(|c| c.change_type == ChangeType::Positive));
        assert!(cards.iter().all(|c| c.description == "from last month"));
    }

    #[test]
    fn test_analytics_cards_low_branch() {
        let series = vec![point(200, 700, 40), point(300, 800, 41)];
        let cards = build_analytics_cards(&series, 10);

        assert_eq!(cards[0].change, "+8.2%");
        assert_eq!(cards[1].change, "+8.2%");
        assert_eq!(cards[2].value, "40.5%");
        assert_eq!(cards[2].change, "-2.3%");
        // 10 users is 20% of target, clamped up to 60
        assert_eq!(cards[3].value, "60.0%");
        assert_eq!(cards[3].change, "+8.7%");
    }

    #[test]
    fn test_goal_completion_between_clamps() {
        let cards = build_analytics_cards(&default_analytics(), 40);
        assert_eq!(cards[3].raw_value, 80.0);
        assert_eq!(cards[3].change, "+15.3%");

        let cards = build_analytics_cards(&default_analytics(), 37);
        assert_eq!(cards[3].value, "74.0%");
        assert_eq!(cards[3].change, "+8.7%");
    }

    #[test]
    fn test_analytics_cards_for_empty_series() {
        let cards = build_analytics_cards(&[], 0);
        assert_eq!(cards[0].value, "0");
        assert_eq!(cards[2].value, "0.0%");
        assert_eq!(cards[2].change, "-5.1%");
        assert_eq!(cards[3].value, "60.0%");
    }
}
