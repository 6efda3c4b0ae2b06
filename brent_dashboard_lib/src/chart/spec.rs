//! Render-spec building blocks handed to the external chart renderer.
//!
//! Field names serialize in the renderer's camelCase vocabulary.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const CHART_TITLE: &str = "Brent Oil Log Returns";
pub const SERIES_LABEL: &str = "Log Return";
pub const CHANGE_POINT_CAPTION: &str = "Change Point";
pub const NO_DATA_MESSAGE: &str = "No data available.";

/// One `(date, log return)` pair on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: DateTime<Utc>,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub fill: bool,
    pub point_radius: u32,
    pub tension: f64,
}

impl LineStyle {
    pub fn log_return() -> Self {
        Self {
            border_color: "#007bff",
            background_color: "rgba(0,123,255,0.2)",
            fill: true,
            point_radius: 1,
            tension: 0.3,
        }
    }
}

/// A line dataset, points in the order they were supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: &'static str,
    #[serde(flatten)]
    pub style: LineStyle,
    pub data: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationLabel {
    pub content: &'static str,
    pub enabled: bool,
    pub position: LabelPosition,
    pub background_color: &'static str,
    pub color: &'static str,
}

/// A vertical marker across the full plot height at `value` on the x scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAnnotation {
    pub id: &'static str,
    #[serde(rename = "scaleID")]
    pub scale_id: &'static str,
    pub value: DateTime<Utc>,
    pub border_color: &'static str,
    pub border_width: u32,
    pub label: AnnotationLabel,
}

impl LineAnnotation {
    pub fn change_point(at: DateTime<Utc>) -> Self {
        Self {
            id: "changePointLine",
            scale_id: "x",
            value: at,
            border_color: "red",
            border_width: 2,
            label: AnnotationLabel {
                content: CHANGE_POINT_CAPTION,
                enabled: true,
                position: LabelPosition::Start,
                background_color: "rgba(255, 0, 0, 0.7)",
                color: "#fff",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Annotation {
    Line(LineAnnotation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Time,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    pub unit: TimeUnit,
    pub tooltip_format: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    #[serde(rename = "type")]
    pub kind: ScaleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeOptions>,
    pub title: AxisTitle,
}

/// Fixed axis configuration: a continuous time x-axis ticked by month and a
/// linear y-axis. Ranges are left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

impl Default for Scales {
    fn default() -> Self {
        Self {
            x: Axis {
                kind: ScaleKind::Time,
                time: Some(TimeOptions {
                    unit: TimeUnit::Month,
                    tooltip_format: "yyyy-MM-dd",
                }),
                title: AxisTitle {
                    display: true,
                    text: "Date",
                },
            },
            y: Axis {
                kind: ScaleKind::Linear,
                time: None,
                title: AxisTitle {
                    display: true,
                    text: SERIES_LABEL,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: LegendPosition,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            display: true,
            position: LegendPosition::Top,
        }
    }
}
