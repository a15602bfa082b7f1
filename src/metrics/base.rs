//! Base metrics reduction

use std::collections::BTreeMap;

use crate::models::{BaseMetrics, UserRecord, UserStatus};

/// Share of users counted as conversions
pub const CONVERSION_FACTOR: f64 = 0.23;

/// Compute aggregates for `users` in a single pass.
///
/// The result does not depend on the order of `users`: sums and counts are
/// commutative and the country map is ordered by key.
pub fn compute_base_metrics(users: &[UserRecord]) -> BaseMetrics {
    let mut total_revenue: u64 = 0;
    let mut active_users = 0;
    let mut inactive_users = 0;
    let mut pending_users = 0;
    let mut country_distribution: BTreeMap<_, usize> = BTreeMap::new();

    for user in users {
        total_revenue += user.revenue;
        match user.status {
            UserStatus::Active => active_users += 1,
            UserStatus::Inactive => inactive_users += 1,
            UserStatus::Pending => pending_users += 1,
        }
        *country_distribution.entry(user.country).or_insert(0) += 1;
    }

    let total_users = users.len();
    let (conversion_rate, avg_revenue) = if total_users > 0 {
        (
            active_users as f64 / total_users as f64 * 100.0,
            total_revenue as f64 / total_users as f64,
        )
    } else {
        (0.0, 0.0)
    };

    BaseMetrics {
        total_revenue,
        active_users,
        inactive_users,
        pending_users,
        total_users,
        conversion_rate,
        conversions: (total_users as f64 * CONVERSION_FACTOR).floor() as u64,
        avg_revenue,
        country_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Country;
    use chrono::NaiveDate;

    fn user(id: u32, revenue: u64, status: UserStatus, country: Country) -> UserRecord {
        let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        UserRecord {
            id: format!("user-{}", id),
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
            status,
            revenue,
            last_active: date,
            signup_date: date,
            country,
        }
    }

    #[test]
    fn test_three_user_scenario_active_only() {
        let users = vec![
            user(1, 100, UserStatus::Active, Country::Usa),
            user(2, 200, UserStatus::Active, Country::Uk),
        ];

        let metrics = compute_base_metrics(&users);

        assert_eq!(metrics.total_users, 2);
        assert_eq!(metrics.total_revenue, 300);
        assert_eq!(metrics.active_users, 2);
        assert_eq!(metrics.inactive_users, 0);
        assert!((metrics.conversion_rate - 100.0).abs() < 1e-9);
        assert_eq!(metrics.conversions, 0);
        assert!((metrics.avg_revenue - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_status_counts_and_rates() {
        let users = vec![
            user(1, 100, UserStatus::Active, Country::Usa),
            user(2, 200, UserStatus::Active, Country::Usa),
            user(3, 300, UserStatus::Inactive, Country::Japan),
            user(4, 400, UserStatus::Pending, Country::Japan),
        ];

        let metrics = compute_base_metrics(&users);

        assert_eq!(metrics.active_users, 2);
        assert_eq!(metrics.inactive_users, 1);
        assert_eq!(metrics.pending_users, 1);
        assert_eq!(
            metrics.active_users + metrics.inactive_users + metrics.pending_users,
            metrics.total_users
        );
        assert!((metrics.conversion_rate - 50.0).abs() < 1e-9);
        assert!((metrics.avg_revenue - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_conversions_floor() {
        let users: Vec<UserRecord> = (0..50)
            .map(|i| user(i, 100, UserStatus::Pending, Country::France))
            .collect();

        let metrics = compute_base_metrics(&users);
        // floor(50 * 0.23) = 11
        assert_eq!(metrics.conversions, 11);
    }

    #[test]
    fn test_empty_collection() {
        let metrics = compute_base_metrics(&[]);

        assert_eq!(metrics, BaseMetrics::empty());
        assert!(!metrics.conversion_rate.is_nan());
        assert!(!metrics.avg_revenue.is_nan());
    }

    #[test]
    fn test_country_distribution_only_lists_present_countries() {
        let users = vec![
            user(1, 100, UserStatus::Active, Country::Brazil),
            user(2, 100, UserStatus::Active, Country::Brazil),
            user(3, 100, UserStatus::Active, Country::Canada),
        ];

        let metrics = compute_base_metrics(&users);

        assert_eq!(metrics.country_distribution.len(), 2);
        assert_eq!(metrics.country_distribution.get(&Country::Brazil), Some(&2));
        assert_eq!(metrics.country_distribution.get(&Country::Canada), Some(&1));
        assert!(!metrics.country_distribution.contains_key(&Country::Usa));
    }

    #[test]
    fn test_order_insensitive() {
        let users = vec![
            user(1, 150, UserStatus::Active, Country::Usa),
            user(2, 275, UserStatus::Pending, Country::Germany),
            user(3, 990, UserStatus::Inactive, Country::Australia),
            user(4, 10, UserStatus::Active, Country::Germany),
        ];
        let mut reversed = users.clone();
        reversed.reverse();

        assert_eq!(compute_base_metrics(&users), compute_base_metrics(&reversed));
    }
}
