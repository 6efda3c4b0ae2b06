//! Boundary adapter: the one place where raw resource envelopes become the
//! typed [`ViewModel`].
//!
//! Absent or `null` data is not an error and maps to the empty form of each
//! facet. Fields that cannot be normalized (an unparseable date, a non-finite
//! log return) reject the whole payload so nothing malformed reaches the
//! chart builder.

use brent_api::types::{ChangePointRecord, EventEntry, PriceRecord, Response, StatsRecord};
use brent_api::Resource;
use chrono::{DateTime, Utc};

use crate::dates;
use crate::error::DashboardError;
use crate::model::{ChangePoint, EventRecord, PricePoint, StatsSummary, ViewModel};

/// Normalizes the four responses of one fetch into a single view model.
pub fn view_model(
    prices: Response<Vec<PriceRecord>>,
    change_point: Response<ChangePointRecord>,
    events: Response<Vec<EventEntry>>,
    stats: Response<StatsRecord>,
) -> Result<ViewModel, DashboardError> {
    Ok(ViewModel {
        prices: price_points(prices)?,
        change_point: change_point_of(change_point)?,
        events: event_records(events)?,
        stats: stats_summary(stats),
    })
}

pub fn price_points(resp: Response<Vec<PriceRecord>>) -> Result<Vec<PricePoint>, DashboardError> {
    resp.data
        .unwrap_or_default()
        .into_iter()
        .map(|row| {
            if !row.log_return.is_finite() {
                return Err(DashboardError::Adapter {
                    resource: Resource::Prices,
                    message: format!("non-finite log return on {}", row.date),
                });
            }
            Ok(PricePoint {
                date: wire_date(Resource::Prices, &row.date)?,
                log_return: row.log_return,
            })
        })
        .collect()
}

pub fn change_point_of(
    resp: Response<ChangePointRecord>,
) -> Result<Option<ChangePoint>, DashboardError> {
    resp.data
        .map(|record| {
            Ok(ChangePoint {
                date: wire_date(Resource::ChangePoint, &record.change_date)?,
            })
        })
        .transpose()
}

pub fn event_records(resp: Response<Vec<EventEntry>>) -> Result<Vec<EventRecord>, DashboardError> {
    resp.data
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            Ok(EventRecord {
                start_date: wire_date(Resource::Events, &entry.start_date)?,
                label: entry.event,
            })
        })
        .collect()
}

pub fn stats_summary(resp: Response<StatsRecord>) -> StatsSummary {
    let record = resp.data.unwrap_or_default();
    StatsSummary {
        volatility: record.volatility,
        average_change: record.average_change,
        data_points: record.total,
    }
}

fn wire_date(resource: Resource, raw: &str) -> Result<DateTime<Utc>, DashboardError> {
    dates::parse_date(raw).ok_or_else(|| DashboardError::Adapter {
        resource,
        message: format!("unparseable date '{}'", raw),
    })
}
