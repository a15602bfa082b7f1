//! Chart series
//!
//! Revenue/user trend plus two fixed-split breakdowns of the filtered user
//! count. Breakdown segments never drop below a per-segment floor so small
//! populations still render.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::MONTHS;
use crate::models::BaseMetrics;

/// One month of the revenue/users trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub revenue: u64,
    pub users: u64,
}

/// One slice of a breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSegment {
    pub name: String,
    pub value: u64,
    /// Chart palette slot (1-based)
    pub palette_slot: u8,
}

/// All chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub trend: Vec<TrendPoint>,
    pub devices: Vec<ChartSegment>,
    pub user_distribution: Vec<ChartSegment>,
}

/// (name, share of total users, floor)
const DEVICE_SPLIT: [(&str, f64, f64); 4] = [
    ("Desktop", 0.40, 10.0),
    ("Mobile", 0.35, 8.0),
    ("Tablet", 0.20, 5.0),
    ("Other", 0.05, 2.0),
];

const DISTRIBUTION_SPLIT: [(&str, f64, f64); 3] = [
    ("New Users", 0.45, 10.0),
    ("Returning Users", 0.35, 8.0),
    ("Inactive Users", 0.20, 5.0),
];

/// Trend constants
pub mod scale {
    pub const PERIODS: f64 = 7.0;
    pub const REVENUE_BASE: f64 = 0.8;
    pub const REVENUE_STEP: f64 = 0.1;
    pub const REVENUE_JITTER: f64 = 0.3;
    pub const USERS_BASE: f64 = 0.9;
    pub const USERS_STEP: f64 = 0.05;
    pub const USERS_JITTER: f64 = 0.2;
}

/// Build the chart series from `metrics`
pub fn build_chart_data<R: Rng>(metrics: &BaseMetrics, rng: &mut R) -> ChartData {
    if metrics.is_empty() {
        return default_chart_data();
    }

    let total_users = metrics.total_users as f64;
    let base_revenue = metrics.total_revenue as f64 / scale::PERIODS;
    let base_users = (total_users / scale::PERIODS).max(1.0);

    let trend = MONTHS
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let step = index as f64;
            let revenue = base_revenue
                * (scale::REVENUE_BASE
                    + step * scale::REVENUE_STEP
                    + rng.random::<f64>() * scale::REVENUE_JITTER);
            let users = base_users
                * (scale::USERS_BASE
                    + step * scale::USERS_STEP
                    + rng.random::<f64>() * scale::USERS_JITTER);

            TrendPoint {
                month: month.to_string(),
                revenue: revenue.floor() as u64,
                users: users.floor() as u64,
            }
        })
        .collect();

    ChartData {
        trend,
        devices: split_segments(total_users, &DEVICE_SPLIT),
        user_distribution: split_segments(total_users, &DISTRIBUTION_SPLIT),
    }
}

fn split_segments(total_users: f64, split: &[(&str, f64, f64)]) -> Vec<ChartSegment> {
    split
        .iter()
        .enumerate()
        .map(|(i, (name, share, floor))| ChartSegment {
            name: name.to_string(),
            value: (total_users * share).max(*floor).floor() as u64,
            palette_slot: i as u8 + 1,
        })
        .collect()
}

fn segments(values: &[(&str, u64)]) -> Vec<ChartSegment> {
    values
        .iter()
        .enumerate()
        .map(|(i, (name, value))| ChartSegment {
            name: name.to_string(),
            value: *value,
            palette_slot: i as u8 + 1,
        })
        .collect()
}

/// Illustrative series shown when there is no data
pub fn default_chart_data() -> ChartData {
    const TREND: [(u64, u64); 7] = [
        (4000, 2400),
        (3000, 1398),
        (2000, 9800),
        (2780, 3908),
        (1890, 4800),
        (2390, 3800),
        (3490, 4300),
    ];

    ChartData {
        trend: MONTHS
            .iter()
            .zip(TREND)
            .map(|(month, (revenue, users))| TrendPoint {
                month: month.to_string(),
                revenue,
                users,
            })
            .collect(),
        devices: segments(&[("Desktop", 400), ("Mobile", 300), ("Tablet", 200), ("Other", 100)]),
        user_distribution: segments(&[
            ("New Users", 45),
            ("Returning Users", 35),
            ("Inactive Users", 20),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn metrics(total_users: usize, total_revenue: u64) -> BaseMetrics {
        let mut m = BaseMetrics::empty();
        m.total_users = total_users;
        m.total_revenue = total_revenue;
        m
    }

    fn values(segments: &[ChartSegment]) -> Vec<u64> {
        segments.iter().map(|s| s.value).collect()
    }

    #[test]
    fn test_breakdowns_for_large_population() {
        let data = build_chart_data(&metrics(100, 70_000), &mut StdRng::seed_from_u64(2));

        assert_eq!(values(&data.devices), vec![40, 35, 20, 5]);
        assert_eq!(values(&data.user_distribution), vec![45, 35, 20]);
        assert_eq!(data.devices[0].name, "Desktop");
        assert_eq!(data.devices[3].palette_slot, 4);
    }

    #[test]
    fn test_breakdowns_apply_floors_for_small_population() {
        let data = build_chart_data(&metrics(3, 600), &mut StdRng::seed_from_u64(2));

        assert_eq!(values(&data.devices), vec![10, 8, 5, 2]);
        assert_eq!(values(&data.user_distribution), vec![10, 8, 5]);
    }

    #[test]
    fn test_trend_within_bounds() {
        let m = metrics(50, 254_310);
        let base_revenue = 254_310.0 / 7.0;
        let base_users = 50.0 / 7.0;

        for seed in 0..20 {
            let data = build_chart_data(&m, &mut StdRng::seed_from_u64(seed));
            assert_eq!(data.trend.len(), 7);

            for (i, point) in data.trend.iter().enumerate() {
                let step = i as f64;
                let rev_lo = (base_revenue * (0.8 + step * 0.1)).floor() as u64;
                let rev_hi = (base_revenue * (1.1 + step * 0.1)) as u64;
                assert!(point.revenue >= rev_lo && point.revenue <= rev_hi);

                let users_lo = (base_users * (0.9 + step * 0.05)).floor() as u64;
                let users_hi = (base_users * (1.1 + step * 0.05)) as u64;
                assert!(point.users >= users_lo && point.users <= users_hi);
            }
        }
    }

    #[test]
    fn test_empty_metrics_use_illustrative_defaults() {
        let data = build_chart_data(&BaseMetrics::empty(), &mut StdRng::seed_from_u64(1));

        assert_eq!(data, default_chart_data());
        assert_eq!(data.trend[2].users, 9800);
        assert_eq!(values(&data.devices), vec![400, 300, 200, 100]);
        assert_eq!(values(&data.user_distribution), vec![45, 35, 20]);
    }
}
