//! Insight types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BaseMetrics, UserRecord};

/// Tone of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Positive,
    Opportunity,
    Warning,
    Achievement,
}

impl InsightType {
    /// Get icon name for UI display
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Opportunity => "lightbulb",
            Self::Positive => "trending-up",
            Self::Warning => "alert-triangle",
            Self::Achievement => "check-circle",
        }
    }
}

/// How much an insight matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Revenue,
    Engagement,
    Growth,
    DataQuality,
}

impl InsightCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Engagement => "Engagement",
            Self::Growth => "Growth",
            Self::DataQuality => "Data Quality",
        }
    }
}

/// A single insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Stable per rule, so the UI can key on it
    pub id: u32,
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub category: InsightCategory,
    /// Whether the UI offers a follow-up action
    pub actionable: bool,
}

/// All insights for one filtered segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    /// In rule order
    pub insights: Vec<Insight>,
    pub users_analyzed: usize,
    pub actionable_count: usize,
    pub high_impact_count: usize,
}

impl InsightSummary {
    pub fn from_insights(insights: Vec<Insight>, users_analyzed: usize) -> Self {
        let actionable_count = insights.iter().filter(|i| i.actionable).count();
        let high_impact_count = insights.iter().filter(|i| i.impact == Impact::High).count();

        Self {
            insights,
            users_analyzed,
            actionable_count,
            high_impact_count,
        }
    }

    pub fn empty() -> Self {
        Self::from_insights(Vec::new(), 0)
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }
}

/// Input data for generating insights
#[derive(Debug, Clone, PartialEq)]
pub struct InsightInput {
    pub total_users: usize,
    pub avg_revenue: f64,
    /// Active share as a percentage
    pub engagement_rate: f64,
    /// Users who signed up within the recent window
    pub recent_signups: usize,
}

/// Length of the "recent signup" window
pub const RECENT_SIGNUP_DAYS: i64 = 30;

impl InsightInput {
    /// Build from the metrics and the filtered users they were computed from
    pub fn from_snapshot(metrics: &BaseMetrics, users: &[UserRecord], today: NaiveDate) -> Self {
        let cutoff = today - chrono::Duration::days(RECENT_SIGNUP_DAYS);
        let recent_signups = users.iter().filter(|u| u.signup_date > cutoff).count();

        Self {
            total_users: metrics.total_users,
            avg_revenue: metrics.avg_revenue,
            engagement_rate: metrics.conversion_rate,
            recent_signups,
        }
    }
}
