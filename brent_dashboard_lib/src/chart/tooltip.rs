//! Date-to-event lookup behind the hover tooltip.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::dates;
use crate::model::EventRecord;

/// Event labels grouped by UTC calendar day, each day's labels in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventIndex {
    by_day: BTreeMap<NaiveDate, Vec<String>>,
}

impl EventIndex {
    pub fn build(events: &[EventRecord]) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
        for event in events {
            by_day
                .entry(dates::truncate_to_day(event.start_date))
                .or_default()
                .push(event.label.clone());
        }
        Self { by_day }
    }

    /// The first event, in input order, whose start date falls on the same
    /// calendar day as `hovered`.
    pub fn find(&self, hovered: DateTime<Utc>) -> Option<&str> {
        self.by_day
            .get(&dates::truncate_to_day(hovered))
            .and_then(|labels| labels.first())
            .map(String::as_str)
    }

    /// Number of distinct days carrying at least one event.
    pub fn days(&self) -> usize {
        self.by_day.len()
    }
}

/// The part of a hovered data point the renderer hands back to the tooltip
/// callback: its formatted x label and, when available, the parsed x value in
/// epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TooltipItem {
    pub label: String,
    pub parsed_x: Option<i64>,
}

impl TooltipItem {
    pub fn from_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            parsed_x: None,
        }
    }

    /// The hovered instant, preferring the numeric x value over the label.
    pub fn hovered_at(&self) -> Option<DateTime<Utc>> {
        self.parsed_x
            .and_then(dates::from_epoch_millis)
            .or_else(|| dates::parse_date(&self.label))
    }
}
