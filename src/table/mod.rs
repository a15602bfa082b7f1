//! Table view over the filtered users
//!
//! Local refinement, sorting and pagination for the users table. Queries run
//! on a snapshot's filtered collection only; exports ignore them and always
//! use the full snapshot collection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::filter::matches_search;
use crate::models::{Country, StatusFilter, UserRecord};

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    Email,
    Status,
    Revenue,
    Country,
    SignupDate,
    LastActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Default rows per page
pub const DEFAULT_PER_PAGE: usize = 10;

/// Table-local view state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
    /// None = every country
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub direction: SortDirection,
    /// 1-based
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            country: None,
            sort: SortField::default(),
            direction: SortDirection::default(),
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl TableQuery {
    /// Clicking a column header: same column flips direction, a new column
    /// sorts ascending. Either way the table returns to the first page.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort == field {
            self.direction = self.direction.toggled();
        } else {
            self.sort = field;
            self.direction = SortDirection::Asc;
        }
        self.page = 1;
    }
}

/// One page of rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    pub rows: Vec<UserRecord>,
    /// Rows matching the query across all pages
    pub total_rows: usize,
    pub page: usize,
    pub total_pages: usize,
}

fn compare(a: &UserRecord, b: &UserRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::Revenue => a.revenue.cmp(&b.revenue),
        SortField::Country => a.country.label().cmp(b.country.label()),
        SortField::SignupDate => a.signup_date.cmp(&b.signup_date),
        SortField::LastActive => a.last_active.cmp(&b.last_active),
    }
}

/// Refine and sort `users` without paginating
pub fn refine(users: &[UserRecord], query: &TableQuery) -> Vec<UserRecord> {
    let mut rows: Vec<UserRecord> = users
        .iter()
        .filter(|u| matches_search(u, &query.search))
        .filter(|u| query.status.admits(u.status))
        .filter(|u| query.country.map_or(true, |c| u.country == c))
        .cloned()
        .collect();

    // Stable, so ties keep snapshot order
    rows.sort_by(|a, b| {
        let ord = compare(a, b, query.sort);
        match query.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    rows
}

/// Run `query` against `users` and cut out the requested page.
///
/// The page is clamped into `1..=total_pages`; an empty result still reports
/// one (empty) page.
pub fn query_table(users: &[UserRecord], query: &TableQuery) -> TablePage {
    let rows = refine(users, query);
    let per_page = query.per_page.max(1);
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(per_page).max(1);
    let page = query.page.clamp(1, total_pages);

    let rows = rows
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    TablePage {
        rows,
        total_rows,
        page,
        total_pages,
    }
}

/// Sorted, de-duplicated countries present in `users`
pub fn countries_present(users: &[UserRecord]) -> Vec<Country> {
    let mut countries: Vec<Country> = users.iter().map(|u| u.country).collect();
    countries.sort_by(|a, b| a.label().cmp(b.label()));
    countries.dedup();
    countries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;
    use chrono::NaiveDate;

    fn user(id: u32, name: &str, revenue: u64, status: UserStatus, country: Country) -> UserRecord {
        let date = NaiveDate::from_ymd_opt(2025, 1, id).unwrap();
        UserRecord {
            id: format!("user-{}", id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replacen(' ', ".", 1)),
            status,
            revenue,
            last_active: date,
            signup_date: date,
            country,
        }
    }

    fn sample() -> Vec<UserRecord> {
        vec![
            user(1, "John Doe", 500, UserStatus::Active, Country::Usa),
            user(2, "Alice Brown", 9000, UserStatus::Pending, Country::Japan),
            user(3, "Bob Johnson", 120, UserStatus::Active, Country::Usa),
            user(4, "Ivy Chen", 4000, UserStatus::Inactive, Country::Canada),
        ]
    }

    fn names(rows: &[UserRecord]) -> Vec<&str> {
        rows.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn test_default_query_sorts_by_name() {
        let page = query_table(&sample(), &TableQuery::default());
        assert_eq!(names(&page.rows), vec!["Alice Brown", "Bob Johnson", "Ivy Chen", "John Doe"]);
        assert_eq!(page.total_rows, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_sort_by_revenue_desc() {
        let query = TableQuery {
            sort: SortField::Revenue,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        let rows = refine(&sample(), &query);
        assert_eq!(names(&rows), vec!["Alice Brown", "Ivy Chen", "John Doe", "Bob Johnson"]);
    }

    #[test]
    fn test_local_refinement() {
        let query = TableQuery {
            status: StatusFilter::Active,
            country: Some(Country::Usa),
            search: "john".to_string(),
            ..Default::default()
        };
        let rows = refine(&sample(), &query);
        assert_eq!(names(&rows), vec!["Bob Johnson", "John Doe"]);
    }

    #[test]
    fn test_pagination_and_clamping() {
        let query = TableQuery {
            per_page: 3,
            page: 2,
            ..Default::default()
        };
        let page = query_table(&sample(), &query);
        assert_eq!(page.total_pages, 2);
        assert_eq!(names(&page.rows), vec!["John Doe"]);

        let past_end = TableQuery { page: 9, ..query };
        assert_eq!(query_table(&sample(), &past_end).page, 2);
    }

    #[test]
    fn test_empty_table_has_one_page() {
        let page = query_table(&[], &TableQuery::default());
        assert_eq!(page.total_rows, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_toggle_sort() {
        let mut query = TableQuery { page: 3, ..Default::default() };

        query.toggle_sort(SortField::Name);
        assert_eq!(query.direction, SortDirection::Desc);
        assert_eq!(query.page, 1);

        query.toggle_sort(SortField::Revenue);
        assert_eq!(query.sort, SortField::Revenue);
        assert_eq!(query.direction, SortDirection::Asc);
    }

    #[test]
    fn test_countries_present() {
        let countries = countries_present(&sample());
        assert_eq!(countries, vec![Country::Canada, Country::Japan, Country::Usa]);
    }

    #[test]
    fn test_query_deserializes_with_defaults() {
        let query: TableQuery = serde_json::from_str(r#"{"sort": "signup_date"}"#).unwrap();
        assert_eq!(query.sort, SortField::SignupDate);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, DEFAULT_PER_PAGE);
        assert_eq!(query.status, StatusFilter::All);
    }
}
