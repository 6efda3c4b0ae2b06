use serde::{Deserialize, Serialize};

/// The `/stats` payload. Every field is optional on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StatsRecord {
    #[serde(default)]
    pub volatility: Option<f64>,

    #[serde(default)]
    pub average_change: Option<f64>,

    /// Number of price rows the statistics were computed over.
    #[serde(default)]
    pub total: Option<i64>,
}
