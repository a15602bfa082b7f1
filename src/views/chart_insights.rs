//! Headline figures shown beside each chart
//!
//! Everything here is read off a finished [`ChartData`], so the figures always
//! agree with the series they describe. Percentages are rounded to one
//! decimal. A growth or trend figure needs at least two points and a non-zero
//! first point; otherwise it is `None` and the chart shows no trend badge.

use serde::{Deserialize, Serialize};

use super::charts::{ChartData, ChartSegment, TrendPoint};
use super::round_tenth;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueInsights {
    pub total_revenue: u64,
    pub total_users: u64,
    pub avg_revenue: f64,
    /// Last month against first month, in percent
    pub growth: Option<f64>,
    /// First month with the highest revenue
    pub best_month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInsights {
    pub total_devices: u64,
    pub top_device: Option<String>,
    pub mobile_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionInsights {
    pub total_users: u64,
    pub new_user_percentage: f64,
    pub retention_rate: f64,
}

/// Conversion figures, read off the trend's user counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionInsights {
    pub total_conversions: u64,
    pub avg_conversions: f64,
    pub best_month: Option<String>,
    pub trend: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInsights {
    pub revenue: RevenueInsights,
    pub devices: DeviceInsights,
    pub distribution: DistributionInsights,
    pub conversions: ConversionInsights,
}

pub fn build_chart_insights(charts: &ChartData) -> ChartInsights {
    ChartInsights {
        revenue: revenue_insights(&charts.trend),
        devices: device_insights(&charts.devices),
        distribution: distribution_insights(&charts.user_distribution),
        conversions: conversion_insights(&charts.trend),
    }
}

fn revenue_insights(trend: &[TrendPoint]) -> RevenueInsights {
    let total_revenue = trend.iter().map(|p| p.revenue).sum();
    RevenueInsights {
        total_revenue,
        total_users: trend.iter().map(|p| p.users).sum(),
        avg_revenue: average(total_revenue, trend.len()),
        growth: percent_change(trend, |p| p.revenue),
        best_month: first_max(trend, |p| p.revenue).map(|p| p.month.clone()),
    }
}

fn conversion_insights(trend: &[TrendPoint]) -> ConversionInsights {
    let total_conversions = trend.iter().map(|p| p.users).sum();
    ConversionInsights {
        total_conversions,
        avg_conversions: average(total_conversions, trend.len()),
        best_month: first_max(trend, |p| p.users).map(|p| p.month.clone()),
        trend: percent_change(trend, |p| p.users),
    }
}

fn device_insights(devices: &[ChartSegment]) -> DeviceInsights {
    let total_devices = segment_total(devices);
    DeviceInsights {
        total_devices,
        top_device: first_max(devices, |s| s.value).map(|s| s.name.clone()),
        mobile_percentage: share(devices, "Mobile", total_devices),
    }
}

fn distribution_insights(distribution: &[ChartSegment]) -> DistributionInsights {
    let total_users = segment_total(distribution);
    DistributionInsights {
        total_users,
        new_user_percentage: share(distribution, "New Users", total_users),
        retention_rate: share(distribution, "Returning Users", total_users),
    }
}

fn segment_total(segments: &[ChartSegment]) -> u64 {
    segments.iter().map(|s| s.value).sum()
}

fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

/// Percentage of `total` held by the segment called `name`; 0 when absent
fn share(segments: &[ChartSegment], name: &str, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let value = segments
        .iter()
        .find(|s| s.name == name)
        .map_or(0, |s| s.value);
    round_tenth(value as f64 / total as f64 * 100.0)
}

/// Ties keep the earliest item
fn first_max<T>(items: &[T], key: impl Fn(&T) -> u64) -> Option<&T> {
    items.iter().fold(None, |best, item| match best {
        Some(current) if key(item) <= key(current) => Some(current),
        _ => Some(item),
    })
}

fn percent_change(trend: &[TrendPoint], key: impl Fn(&TrendPoint) -> u64) -> Option<f64> {
    if trend.len() < 2 {
        return None;
    }
    let first = key(&trend[0]);
    let last = key(&trend[trend.len() - 1]);
    if first == 0 {
        return None;
    }
    let first = first as f64;
    Some(round_tenth((last as f64 - first) / first * 100.0))
}
