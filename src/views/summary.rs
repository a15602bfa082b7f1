//! Summary metric cards

use serde::{Deserialize, Serialize};

use crate::models::BaseMetrics;

/// Direction of the delta badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Positive,
    Negative,
}

/// One summary card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    /// Display string
    pub value: String,
    /// Number the display string was formatted from
    pub raw_value: f64,
    pub change: String,
    pub change_type: ChangeType,
    pub description: String,
}

/// Presentational thresholds and their canned deltas
mod thresholds {
    pub const HIGH_REVENUE: u64 = 50_000;
    pub const HIGH_ACTIVE_USERS: usize = 20;
    pub const HIGH_CONVERSIONS: u64 = 10;
    pub const HIGH_CONVERSION_RATE: f64 = 50.0;
}

const FILTERED_DESCRIPTION: &str = "from filtered data";
const LOADING_DESCRIPTION: &str = "loading...";

pub(super) fn card(
    title: &str,
    value: String,
    raw_value: f64,
    change: &str,
    change_type: ChangeType,
    description: &str,
) -> MetricCard {
    MetricCard {
        title: title.to_string(),
        value,
        raw_value,
        change: change.to_string(),
        change_type,
        description: description.to_string(),
    }
}

/// Total Revenue, Active Users, Conversions, Conversion Rate
pub fn build_summary_cards(metrics: &BaseMetrics) -> Vec<MetricCard> {
    if metrics.is_empty() {
        return default_summary_cards();
    }

    let revenue_change = if metrics.total_revenue > thresholds::HIGH_REVENUE {
        "+20.1%"
    } else {
        "+15.3%"
    };
    let active_change = if metrics.active_users > thresholds::HIGH_ACTIVE_USERS {
        "+18.1%"
    } else {
        "+12.5%"
    };
    let conversions_change = if metrics.conversions > thresholds::HIGH_CONVERSIONS {
        "+19%"
    } else {
        "+8.2%"
    };
    let (rate_change, rate_change_type) =
        if metrics.conversion_rate > thresholds::HIGH_CONVERSION_RATE {
            ("+2.1%", ChangeType::Positive)
        } else {
            ("-1.8%", ChangeType::Negative)
        };

    vec![
        card(
            "Total Revenue",
            format!("${}", group_thousands(metrics.total_revenue)),
            metrics.total_revenue as f64,
            revenue_change,
            ChangeType::Positive,
            FILTERED_DESCRIPTION,
        ),
        card(
            "Active Users",
            metrics.active_users.to_string(),
            metrics.active_users as f64,
            active_change,
            ChangeType::Positive,
            FILTERED_DESCRIPTION,
        ),
        card(
            "Conversions",
            metrics.conversions.to_string(),
            metrics.conversions as f64,
            conversions_change,
            ChangeType::Positive,
            FILTERED_DESCRIPTION,
        ),
        card(
            "Conversion Rate",
            format!("{:.1}%", metrics.conversion_rate),
            metrics.conversion_rate,
            rate_change,
            rate_change_type,
            FILTERED_DESCRIPTION,
        ),
    ]
}

/// Zeroed cards used when there is nothing to summarize
pub fn default_summary_cards() -> Vec<MetricCard> {
    [
        ("Total Revenue", "$0"),
        ("Active Users", "0"),
        ("Conversions", "0"),
        ("Conversion Rate", "0%"),
    ]
    .into_iter()
    .map(|(title, value)| {
        card(
            title,
            value.to_string(),
            0.0,
            "+0%",
            ChangeType::Positive,
            LOADING_DESCRIPTION,
        )
    })
    .collect()
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(total_revenue: u64, active: usize, total: usize, conversions: u64) -> BaseMetrics {
        let mut m = BaseMetrics::empty();
        m.total_revenue = total_revenue;
        m.active_users = active;
        m.total_users = total;
        m.conversions = conversions;
        m.conversion_rate = active as f64 / total as f64 * 100.0;
        m
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(254_310), "254,310");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_card_titles_and_values() {
        let cards = build_summary_cards(&metrics(300, 2, 2, 0));

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Total Revenue", "Active Users", "Conversions", "Conversion Rate"]);
        assert_eq!(cards[0].value, "$300");
        assert_eq!(cards[1].value, "2");
        assert_eq!(cards[2].value, "0");
        assert_eq!(cards[3].value, "100.0%");
        assert_eq!(cards[3].raw_value, 100.0);
        assert!(cards.iter().all(|c| c.description == "from filtered data"));
    }

    #[test]
    fn test_low_thresholds_pick_smaller_deltas() {
        let cards = build_summary_cards(&metrics(40_000, 5, 20, 4));

        assert_eq!(cards[0].change, "+15.3%");
        assert_eq!(cards[1].change, "+12.5%");
        assert_eq!(cards[2].change, "+8.2%");
        assert_eq!(cards[3].change, "-1.8%");
        assert_eq!(cards[3].change_type, ChangeType::Negative);
    }

    #[test]
    fn test_high_thresholds_pick_larger_deltas() {
        let cards = build_summary_cards(&metrics(254_310, 30, 50, 11));

        assert_eq!(cards[0].value, "$254,310");
        assert_eq!(cards[0].change, "+20.1%");
        assert_eq!(cards[1].change, "+18.1%");
        assert_eq!(cards[2].change, "+19%");
        assert_eq!(cards[3].change, "+2.1%");
        assert_eq!(cards[3].change_type, ChangeType::Positive);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly at the threshold still picks the lower label
        let cards = build_summary_cards(&metrics(50_000, 10, 20, 10));
        assert_eq!(cards[0].change, "+15.3%");
        assert_eq!(cards[2].change, "+8.2%");
        assert_eq!(cards[3].change, "-1.8%");
    }

    #[test]
    fn test_empty_metrics_show_zero_cards() {
        let cards = build_summary_cards(&BaseMetrics::empty());
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["$0", "0", "0", "0%"]);
        assert!(cards.iter().all(|c| c.raw_value == 0.0));
    }

    #[test]
    fn test_card_serialization() {
        let cards = default_summary_cards();
        let json = serde_json::to_string(&cards[0]).unwrap();
        assert!(json.contains("\"change_type\":\"positive\""));
        assert!(json.contains("\"value\":\"$0\""));
    }
}
