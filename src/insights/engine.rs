//! Insight engine
//!
//! Each rule looks at one aspect of the segment and emits at most one insight.

use super::types::{Impact, Insight, InsightCategory, InsightInput, InsightSummary, InsightType};

/// Thresholds for insight triggers
mod thresholds {
    /// Average revenue above this is a high-value segment
    pub const HIGH_AVG_REVENUE: f64 = 5000.0;
    /// Average revenue below this suggests upselling
    pub const LOW_AVG_REVENUE: f64 = 2000.0;
    /// Reference average used for the "above baseline" figure
    pub const BASELINE_AVG_REVENUE: f64 = 3000.0;
    pub const HIGH_ENGAGEMENT: f64 = 70.0;
    pub const LOW_ENGAGEMENT: f64 = 40.0;
    /// Recent signups above this share of the segment signal growth
    pub const GROWTH_SHARE: f64 = 0.3;
    /// Segments smaller than this are flagged as thin
    pub const MIN_SAMPLE: usize = 10;
}

/// Generate insights for a filtered segment
pub fn generate_insights(input: &InsightInput) -> InsightSummary {
    if input.total_users == 0 {
        return InsightSummary::empty();
    }

    let insights: Vec<Insight> = [
        check_revenue(input),
        check_engagement(input),
        check_growth(input),
        check_sample_size(input),
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::debug!(
        "Generated {} insights for {} users",
        insights.len(),
        input.total_users
    );

    InsightSummary::from_insights(insights, input.total_users)
}

fn check_revenue(input: &InsightInput) -> Option<Insight> {
    let avg = input.avg_revenue;

    if avg > thresholds::HIGH_AVG_REVENUE {
        let above_baseline = ((avg - thresholds::BASELINE_AVG_REVENUE)
            / thresholds::BASELINE_AVG_REVENUE
            * 100.0)
            .round();
        Some(Insight {
            id: 1,
            insight_type: InsightType::Positive,
            title: "High-Value User Segment".to_string(),
            description: format!(
                "Your filtered user segment shows exceptional value with an average revenue \
                of ${:.0} per user. This is {}% above the baseline.",
                avg, above_baseline
            ),
            impact: Impact::High,
            category: InsightCategory::Revenue,
            actionable: true,
        })
    } else if avg < thresholds::LOW_AVG_REVENUE {
        Some(Insight {
            id: 1,
            insight_type: InsightType::Opportunity,
            title: "Revenue Optimization Opportunity".to_string(),
            description: format!(
                "The current filtered segment shows lower average revenue of ${:.0} per user. \
                Consider targeted upselling campaigns for this segment.",
                avg
            ),
            impact: Impact::High,
            category: InsightCategory::Revenue,
            actionable: true,
        })
    } else {
        None
    }
}

fn check_engagement(input: &InsightInput) -> Option<Insight> {
    let rate = input.engagement_rate;

    if rate > thresholds::HIGH_ENGAGEMENT {
        Some(Insight {
            id: 2,
            insight_type: InsightType::Achievement,
            title: "Excellent User Engagement".to_string(),
            description: format!(
                "{:.1}% of users in this segment are active, indicating strong product-market fit. \
                This segment could be ideal for referral programs.",
                rate
            ),
            impact: Impact::Medium,
            category: InsightCategory::Engagement,
            actionable: true,
        })
    } else if rate < thresholds::LOW_ENGAGEMENT {
        Some(Insight {
            id: 2,
            insight_type: InsightType::Warning,
            title: "Engagement Improvement Needed".to_string(),
            description: format!(
                "Only {:.1}% of users in this segment are active. \
                Consider re-engagement campaigns or product improvements for this group.",
                rate
            ),
            impact: Impact::High,
            category: InsightCategory::Engagement,
            actionable: true,
        })
    } else {
        None
    }
}

fn check_growth(input: &InsightInput) -> Option<Insight> {
    let total = input.total_users as f64;
    if (input.recent_signups as f64) <= total * thresholds::GROWTH_SHARE {
        return None;
    }

    let share = (input.recent_signups as f64 / total * 100.0).round();
    Some(Insight {
        id: 3,
        insight_type: InsightType::Positive,
        title: "Strong Growth Momentum".to_string(),
        description: format!(
            "{} users ({}%) joined in the last 30 days. \
            This segment shows healthy growth patterns.",
            input.recent_signups, share
        ),
        impact: Impact::Medium,
        category: InsightCategory::Growth,
        actionable: false,
    })
}

fn check_sample_size(input: &InsightInput) -> Option<Insight> {
    if input.total_users >= thresholds::MIN_SAMPLE {
        return None;
    }

    Some(Insight {
        id: 4,
        insight_type: InsightType::Warning,
        title: "Limited Data Sample".to_string(),
        description: format!(
            "Current filters result in only {} users. Consider broadening filters for more \
            comprehensive insights and better statistical significance.",
            input.total_users
        ),
        impact: Impact::Medium,
        category: InsightCategory::DataQuality,
        actionable: true,
    })
}
