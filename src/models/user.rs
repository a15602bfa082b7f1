//! User record types
//!
//! Types representing the users shown in the dashboard tables and aggregated
//! into every metric.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DashboardError;

/// Account status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [
        UserStatus::Active,
        UserStatus::Inactive,
        UserStatus::Pending,
    ];

    /// Lowercase label used in tables and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            other => Err(DashboardError::InvalidStatus(other.to_string())),
        }
    }
}

/// Country a user signed up from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "USA")]
    Usa,
    #[serde(rename = "UK")]
    Uk,
    Canada,
    Germany,
    France,
    Australia,
    Japan,
    Brazil,
}

impl Country {
    pub const ALL: [Country; 8] = [
        Country::Usa,
        Country::Uk,
        Country::Canada,
        Country::Germany,
        Country::France,
        Country::Australia,
        Country::Japan,
        Country::Brazil,
    ];

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Usa => "USA",
            Self::Uk => "UK",
            Self::Canada => "Canada",
            Self::Germany => "Germany",
            Self::France => "France",
            Self::Australia => "Australia",
            Self::Japan => "Japan",
            Self::Brazil => "Brazil",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Country {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DashboardError::InvalidCountry(s.to_string()))
    }
}

/// A single user record
///
/// Only the dashboard mutates these, and only through a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    /// Whole currency units
    pub revenue: u64,
    pub last_active: NaiveDate,
    pub signup_date: NaiveDate,
    pub country: Country,
}
