//! Stat cards shown above the chart.

use serde::Serialize;

use crate::model::StatsSummary;

/// Shown in place of a statistic the stats resource did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

/// Rounds to four decimals; absent or non-finite values render as [`NOT_AVAILABLE`].
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.4}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Volatility and average change always; the data-point count only when the
/// stats payload carried one.
pub fn stat_cards(stats: &StatsSummary) -> Vec<StatCard> {
    let mut cards = vec![
        StatCard {
            title: "Volatility",
            value: format_stat(stats.volatility),
        },
        StatCard {
            title: "Avg Price Change",
            value: format_stat(stats.average_change),
        },
    ];
    if let Some(total) = stats.data_points {
        cards.push(StatCard {
            title: "Data Points",
            value: total.to_string(),
        });
    }
    cards
}
