//! Typed view model: what one dashboard view is made of once every resource
//! payload has passed through the boundary adapter.

use brent_api::RangeQuery;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::DashboardError;

/// User-selected date range. An absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Builds a range, rejecting `start > end` when both bounds are set.
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, DashboardError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(DashboardError::InvalidInput(format!(
                    "start {} is after end {}",
                    s.date_naive(),
                    e.date_naive()
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// A range with neither bound set.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// The query sent, unchanged, to all four resources.
    pub fn to_query(&self) -> RangeQuery {
        RangeQuery::new(self.start, self.end)
    }
}

/// One log-return observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub log_return: f64,
}

/// The single detected structural break of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangePoint {
    pub date: DateTime<Utc>,
}

/// One entry of the external event calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub start_date: DateTime<Utc>,
    pub label: String,
}

/// Display-only summary statistics. `None` renders as not available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatsSummary {
    pub volatility: Option<f64>,
    pub average_change: Option<f64>,
    pub data_points: Option<i64>,
}

/// Everything needed to render one chart view. Always replaced as a whole.
///
/// `prices` is expected in ascending date order; nothing here re-sorts it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewModel {
    pub prices: Vec<PricePoint>,
    pub change_point: Option<ChangePoint>,
    pub events: Vec<EventRecord>,
    pub stats: StatsSummary,
}
