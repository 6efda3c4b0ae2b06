//! Chart model builder: turns a [`ViewModel`] into the render spec consumed by
//! the external chart renderer.
//!
//! [`build_chart`] is pure. It aligns the dense price series, the optional
//! change-point date and the sparse event calendar on one time axis, and
//! pre-indexes events by calendar day for the hover tooltip.

pub mod registry;
pub mod spec;
pub mod stats;
pub mod tooltip;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::ViewModel;

use self::spec::{
    Annotation, LineAnnotation, LineStyle, Legend, Scales, Series, SeriesPoint, CHART_TITLE,
    NO_DATA_MESSAGE, SERIES_LABEL,
};
use self::stats::{stat_cards, StatCard};
use self::tooltip::{EventIndex, TooltipItem};

/// Series, annotations, axes, legend and stat cards for one view, plus the
/// event lookup the tooltip callback re-enters on every hover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSpec {
    pub title: &'static str,
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,
    pub scales: Scales,
    pub legend: Legend,
    pub stats: Vec<StatCard>,
    #[serde(skip)]
    events: EventIndex,
}

impl RenderSpec {
    /// Label of the first event (input order) on the hovered calendar day.
    pub fn find_event(&self, hovered: DateTime<Utc>) -> Option<&str> {
        self.events.find(hovered)
    }

    /// Tooltip "after body" text for the hovered items: `Event: <label>`, or
    /// empty when nothing matches or the hovered date cannot be read.
    pub fn tooltip_after_body(&self, items: &[TooltipItem]) -> String {
        items
            .first()
            .and_then(TooltipItem::hovered_at)
            .and_then(|hovered| self.find_event(hovered))
            .map(|label| format!("Event: {}", label))
            .unwrap_or_default()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.data.len()).sum()
    }

    pub fn event_days(&self) -> usize {
        self.events.days()
    }

    /// Message to show instead of the chart when there is nothing to plot.
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.point_count() == 0).then_some(NO_DATA_MESSAGE)
    }
}

/// Builds the render spec for `view`.
///
/// Points keep the order of `view.prices`; an unsorted input produces an
/// unsorted series rather than an error.
pub fn build_chart(view: &ViewModel) -> RenderSpec {
    let series = Series {
        label: SERIES_LABEL,
        style: LineStyle::log_return(),
        data: view
            .prices
            .iter()
            .map(|p| SeriesPoint {
                x: p.date,
                y: p.log_return,
            })
            .collect(),
    };

    let annotations = view
        .change_point
        .iter()
        .map(|cp| Annotation::Line(LineAnnotation::change_point(cp.date)))
        .collect();

    RenderSpec {
        title: CHART_TITLE,
        series: vec![series],
        annotations,
        scales: Scales::default(),
        legend: Legend::default(),
        stats: stat_cards(&view.stats),
        events: EventIndex::build(&view.events),
    }
}
