//! Synthetic user and report data

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{BaseDataset, DataSource};
use crate::models::{Country, ReportRecord, ReportStatus, UserRecord, UserStatus};
use crate::DashboardError;

/// Names are cycled by index, so they repeat past 20 users
const NAMES: [&str; 20] = [
    "John Doe",
    "Jane Smith",
    "Bob Johnson",
    "Alice Brown",
    "Charlie Wilson",
    "Diana Davis",
    "Eve Miller",
    "Frank Garcia",
    "Grace Lee",
    "Henry Taylor",
    "Ivy Chen",
    "Jack Robinson",
    "Kate Williams",
    "Liam Anderson",
    "Mia Thompson",
    "Noah Davis",
    "Olivia Wilson",
    "Paul Martinez",
    "Quinn Taylor",
    "Ruby Johnson",
];

/// Generation bounds
mod bounds {
    pub const MIN_REVENUE: u64 = 100;
    /// Exclusive
    pub const MAX_REVENUE: u64 = 10_100;
    pub const LAST_ACTIVE_DAYS: i64 = 30;
    pub const SIGNUP_DAYS: i64 = 365;
    pub const REFRESH_ACTIVITY_PROBABILITY: f64 = 0.3;
    pub const REFRESH_REVENUE_PROBABILITY: f64 = 0.2;
}

/// Default number of generated users
pub const DEFAULT_USER_COUNT: usize = 50;

/// Random data source backed by a seedable generator
pub struct MockDataSource {
    rng: StdRng,
    user_count: usize,
}

impl MockDataSource {
    /// Source with fixed seed; identical seeds produce identical datasets
    pub fn seeded(seed: u64, user_count: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            user_count,
        }
    }

    /// Source seeded from OS entropy
    pub fn from_entropy(user_count: usize) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            user_count,
        }
    }

    /// Pick a seeded or entropy source
    pub fn new(seed: Option<u64>, user_count: usize) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed, user_count),
            None => Self::from_entropy(user_count),
        }
    }

    fn days_before(&mut self, today: NaiveDate, max_days: i64) -> NaiveDate {
        let offset = self.rng.random_range(0..max_days);
        today - chrono::Duration::days(offset)
    }

    fn random_revenue(&mut self) -> u64 {
        self.rng.random_range(bounds::MIN_REVENUE..bounds::MAX_REVENUE)
    }

    fn generate_user(&mut self, index: usize, today: NaiveDate) -> UserRecord {
        let name = NAMES[index % NAMES.len()];
        let status = UserStatus::ALL[self.rng.random_range(0..UserStatus::ALL.len())];
        let revenue = self.random_revenue();
        let last_active = self.days_before(today, bounds::LAST_ACTIVE_DAYS);
        let signup_date = self.days_before(today, bounds::SIGNUP_DAYS);
        let country = Country::ALL[self.rng.random_range(0..Country::ALL.len())];

        UserRecord {
            id: format!("user-{}", index + 1),
            name: name.to_string(),
            email: email_for(name),
            status,
            revenue,
            last_active,
            signup_date,
            country,
        }
    }

    /// Generate the full user collection
    pub fn generate_users(&mut self, today: NaiveDate) -> Vec<UserRecord> {
        (0..self.user_count)
            .map(|i| self.generate_user(i, today))
            .collect()
    }
}

impl DataSource for MockDataSource {
    fn load(&mut self, today: NaiveDate) -> Result<BaseDataset, DashboardError> {
        let users = self.generate_users(today);
        tracing::debug!("Generated {} mock users", users.len());

        Ok(BaseDataset {
            users,
            reports: base_reports(),
        })
    }

    fn refresh(
        &mut self,
        users: &[UserRecord],
        today: NaiveDate,
    ) -> Result<Vec<UserRecord>, DashboardError> {
        let refreshed = users
            .iter()
            .map(|user| {
                let mut updated = user.clone();
                if self.rng.random_bool(bounds::REFRESH_ACTIVITY_PROBABILITY) {
                    updated.last_active = today;
                }
                if self.rng.random_bool(bounds::REFRESH_REVENUE_PROBABILITY) {
                    updated.revenue = self.random_revenue();
                }
                updated
            })
            .collect();

        Ok(refreshed)
    }
}

/// "Jane Smith" -> "jane.smith@example.com"
fn email_for(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase().replacen(' ', ".", 1))
}

/// Static report catalog
pub fn base_reports() -> Vec<ReportRecord> {
    let entry = |id: u64,
                 title: &str,
                 description: &str,
                 status: ReportStatus,
                 day: u32,
                 size: &str,
                 report_type: &str| ReportRecord {
        id,
        title: title.to_string(),
        description: description.to_string(),
        status,
        last_generated: NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default(),
        size: size.to_string(),
        report_type: report_type.to_string(),
    };

    vec![
        entry(
            1,
            "Monthly Performance Report",
            "Comprehensive analysis of monthly metrics and KPIs",
            ReportStatus::Completed,
            15,
            "2.4 MB",
            "PDF",
        ),
        entry(
            2,
            "User Engagement Analysis",
            "Detailed breakdown of user behavior and engagement patterns",
            ReportStatus::Processing,
            14,
            "1.8 MB",
            "Excel",
        ),
        entry(
            3,
            "Revenue Analytics Report",
            "Financial performance and revenue trend analysis",
            ReportStatus::Completed,
            13,
            "3.1 MB",
            "PDF",
        ),
        entry(
            4,
            "Traffic Sources Report",
            "Analysis of traffic sources and conversion rates",
            ReportStatus::Scheduled,
            12,
            "1.5 MB",
            "CSV",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_generates_requested_count() {
        let mut source = MockDataSource::seeded(7, DEFAULT_USER_COUNT);
        let dataset = source.load(today()).unwrap();

        assert!(!dataset.is_empty());
        assert_eq!(dataset.users.len(), 50);
        assert_eq!(dataset.reports.len(), 4);
    }

    #[test]
    fn test_users_are_schema_valid() {
        let mut source = MockDataSource::seeded(11, 50);
        let users = source.generate_users(today());

        let ids: HashSet<_> = users.iter().map(|u| u.id.clone()).collect();
        assert_eq!(ids.len(), users.len());

        for user in &users {
            assert!(user.revenue >= 100 && user.revenue < 10_100);
            assert!(user.last_active <= today());
            assert!(user.last_active > today() - chrono::Duration::days(30));
            assert!(user.signup_date <= today());
            assert!(user.signup_date > today() - chrono::Duration::days(365));
            assert!(user.email.ends_with("@example.com"));
        }
    }

    #[test]
    fn test_names_cycle_by_index() {
        let mut source = MockDataSource::seeded(1, 25);
        let users = source.generate_users(today());

        assert_eq!(users[0].id, "user-1");
        assert_eq!(users[0].name, "John Doe");
        assert_eq!(users[0].email, "john.doe@example.com");
        assert_eq!(users[20].name, "John Doe");
        assert_eq!(users[24].name, users[4].name);
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = MockDataSource::seeded(42, 50).load(today()).unwrap();
        let b = MockDataSource::seeded(42, 50).load(today()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_refresh_only_touches_activity_and_revenue() {
        let mut source = MockDataSource::seeded(3, 50);
        let users = source.generate_users(today());
        let later = today() + chrono::Duration::days(2);

        let refreshed = source.refresh(&users, later).unwrap();

        assert_eq!(refreshed.len(), users.len());
        for (before, after) in users.iter().zip(&refreshed) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.name, after.name);
            assert_eq!(before.email, after.email);
            assert_eq!(before.status, after.status);
            assert_eq!(before.signup_date, after.signup_date);
            assert_eq!(before.country, after.country);
            assert!(after.last_active == before.last_active || after.last_active == later);
            assert!(after.revenue >= 100 && after.revenue < 10_100);
        }
    }

    #[test]
    fn test_base_reports_catalog() {
        let reports = base_reports();
        let ids: Vec<u64> = reports.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(reports[3].status, ReportStatus::Scheduled);
        assert_eq!(reports[0].last_generated.to_string(), "2024-01-15");
    }

    #[test]
    fn test_email_for() {
        assert_eq!(email_for("Ivy Chen"), "ivy.chen@example.com");
    }
}
