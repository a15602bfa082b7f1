//! Filter specification types
//!
//! A `FilterSpec` is a plain value. The dashboard keeps two of them (draft and
//! applied) and copies on commit, so later draft edits never leak into the
//! applied filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::UserStatus;
use crate::DashboardError;

/// Status criterion of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Pending,
}

impl StatusFilter {
    /// Whether a record with `status` passes this criterion
    pub fn admits(&self, status: UserStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status == UserStatus::Active,
            Self::Inactive => status == UserStatus::Inactive,
            Self::Pending => status == UserStatus::Pending,
        }
    }
}

impl From<UserStatus> for StatusFilter {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Active => Self::Active,
            UserStatus::Inactive => Self::Inactive,
            UserStatus::Pending => Self::Pending,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse::<UserStatus>().map(Self::from)
    }
}

/// Committed or draft filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Inclusive lower bound on signup date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on signup date
    pub date_to: Option<NaiveDate>,
    pub status: StatusFilter,
    /// Case-insensitive substring of name or email; empty matches everything
    pub search_term: String,
}

impl FilterSpec {
    /// True for the "no filter" spec
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Criteria that narrow the result: each date bound, a status other than
    /// `All`, and a non-empty search term
    pub fn active_filter_count(&self) -> usize {
        [
            self.date_from.is_some(),
            self.date_to.is_some(),
            self.status != StatusFilter::All,
            !self.search_term.is_empty(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }
}

/// Filter exactly as typed into the filter form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFilter {
    #[serde(default)]
    pub date_from: String,
    #[serde(default)]
    pub date_to: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub search_term: String,
}

impl RawFilter {
    /// Parse into a typed spec. Empty date fields mean "unbounded".
    pub fn parse(&self) -> Result<FilterSpec, DashboardError> {
        Ok(FilterSpec {
            date_from: parse_optional_date(&self.date_from)?,
            date_to: parse_optional_date(&self.date_to)?,
            status: self.status.parse()?,
            search_term: self.search_term.clone(),
        })
    }
}

fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, DashboardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DashboardError::InvalidDate(trimmed.to_string()))
}
