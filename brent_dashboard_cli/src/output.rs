use anyhow::Result;
use brent_dashboard_lib::chart::spec::{Annotation, SeriesPoint};
use brent_dashboard_lib::chart::stats::StatCard;
use brent_dashboard_lib::{build_chart, FetchState, RenderSpec};
use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct StatRow {
    #[tabled(rename = "Statistic")]
    #[serde(rename = "Statistic")]
    title: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct ChartSummaryRow {
    #[tabled(rename = "Points")]
    #[serde(rename = "Points")]
    points: usize,
    #[tabled(rename = "First Date")]
    #[serde(rename = "First Date")]
    first_date: String,
    #[tabled(rename = "Last Date")]
    #[serde(rename = "Last Date")]
    last_date: String,
    #[tabled(rename = "Change Point")]
    #[serde(rename = "Change Point")]
    change_point: String,
    #[tabled(rename = "Event Days")]
    #[serde(rename = "Event Days")]
    event_days: usize,
}

/// JSON shape of a session state.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum StatePayload<'a> {
    Idle,
    Loading,
    Failed { reason: &'a str },
    Ready { chart: RenderSpec },
}

// -- Row builders --

fn build_stat_rows(cards: &[StatCard]) -> Vec<StatRow> {
    cards
        .iter()
        .map(|c| StatRow {
            title: c.title.to_string(),
            value: c.value.clone(),
        })
        .collect()
}

fn build_summary_row(spec: &RenderSpec) -> ChartSummaryRow {
    let points: Vec<&SeriesPoint> = spec.series.iter().flat_map(|s| &s.data).collect();
    let day = |p: Option<&&SeriesPoint>| {
        p.map(|p| p.x.date_naive().to_string()).unwrap_or_default()
    };
    let change_point = spec
        .annotations
        .iter()
        .map(|a| match a {
            Annotation::Line(line) => line.value.date_naive().to_string(),
        })
        .next()
        .unwrap_or_else(|| "-".to_string());

    ChartSummaryRow {
        points: points.len(),
        first_date: day(points.first()),
        last_date: day(points.last()),
        change_point,
        event_days: spec.event_days(),
    }
}

fn styled(table: &mut Table, format: OutputFormat) {
    if format == OutputFormat::Markdown {
        table.with(Style::markdown());
    }
}

fn render_chart(spec: &RenderSpec, format: OutputFormat) -> String {
    let mut out = Vec::new();
    out.push(spec.title.to_string());

    match spec.empty_message() {
        Some(message) => out.push(message.to_string()),
        None => {
            let mut summary = Table::new([build_summary_row(spec)]);
            styled(&mut summary, format);
            out.push(summary.to_string());
        }
    }

    let mut stats = Table::new(build_stat_rows(&spec.stats));
    styled(&mut stats, format);
    out.push(stats.to_string());

    out.join("\n\n")
}

/// Renders any session state. `Ready` views are run through the chart builder.
pub fn render_state(state: &FetchState, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let payload = match state {
            FetchState::Idle => StatePayload::Idle,
            FetchState::Loading => StatePayload::Loading,
            FetchState::Failed(failure) => StatePayload::Failed {
                reason: &failure.reason,
            },
            FetchState::Ready(view) => StatePayload::Ready {
                chart: build_chart(view),
            },
        };
        return Ok(serde_json::to_string_pretty(&payload)?);
    }

    Ok(match state {
        FetchState::Idle => "No view loaded.".to_string(),
        FetchState::Loading => "Loading...".to_string(),
        FetchState::Failed(failure) => format!("Error: {}", failure.reason),
        FetchState::Ready(view) => render_chart(&build_chart(view), format),
    })
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
