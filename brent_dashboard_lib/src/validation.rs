//! Validation of user-supplied dates and ranges before they reach the session.

use chrono::{DateTime, NaiveDate, Utc};

use crate::dates;
use crate::error::DashboardError;
use crate::model::DateRange;

/// Validate a user date: `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
pub fn validate_date(input: &str) -> Result<DateTime<Utc>, DashboardError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(dates::start_of_day(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            DashboardError::InvalidInput(format!(
                "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2020-01-02) or RFC 3339",
                trimmed
            ))
        })
}

/// Reject a bound that falls on a day after `today`.
pub fn validate_not_future(
    value: DateTime<Utc>,
    today: NaiveDate,
) -> Result<DateTime<Utc>, DashboardError> {
    if dates::truncate_to_day(value) > today {
        return Err(DashboardError::InvalidInput(format!(
            "date {} is in the future",
            dates::truncate_to_day(value)
        )));
    }
    Ok(value)
}

/// Validate optional `start`/`end` inputs into a [`DateRange`]. Neither bound
/// may lie after `today`, and `start` may not be after `end`.
pub fn validate_range(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange, DashboardError> {
    let start = start
        .map(|s| validate_date(s).and_then(|dt| validate_not_future(dt, today)))
        .transpose()?;
    let end = end
        .map(|s| validate_date(s).and_then(|dt| validate_not_future(dt, today)))
        .transpose()?;
    DateRange::new(start, end)
}
