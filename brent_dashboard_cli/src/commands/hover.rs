use std::process::ExitCode;

use anyhow::Result;
use brent_dashboard_lib::chart::tooltip::TooltipItem;
use brent_dashboard_lib::{build_chart, validation, FetchState, RenderSpec, ViewSession};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct HoverArgs {
    /// Hovered date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub date: String,

    /// Start of the loaded range
    #[arg(long)]
    pub start: Option<String>,

    /// End of the loaded range
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
struct HoverOutput<'a> {
    date: &'a str,
    event: Option<&'a str>,
    tooltip: String,
}

/// Tooltip content for an already-validated hover instant.
fn hover_output<'a>(spec: &'a RenderSpec, date: &'a str, hovered: DateTime<Utc>) -> HoverOutput<'a> {
    let item = TooltipItem {
        label: date.to_string(),
        parsed_x: Some(hovered.timestamp_millis()),
    };
    HoverOutput {
        date,
        event: spec.find_event(hovered),
        tooltip: spec.tooltip_after_body(std::slice::from_ref(&item)),
    }
}

pub async fn run(args: &HoverArgs, session: &ViewSession, format: &OutputFormat) -> Result<ExitCode> {
    let hovered = validation::validate_date(&args.date)?;
    let range = super::range_args(args.start.as_deref(), args.end.as_deref())?;

    if let Err(e) = session.fetch_view(&range).await {
        tracing::debug!("hover fetch failed: {}", e);
    }

    let view = match session.state() {
        FetchState::Ready(view) => view,
        FetchState::Failed(failure) => {
            eprintln!("Error: {}", failure.reason);
            return Ok(ExitCode::FAILURE);
        }
        other => {
            eprintln!("No view available ({:?})", other);
            return Ok(ExitCode::FAILURE);
        }
    };

    let spec = build_chart(&view);
    let output = hover_output(&spec, args.date.trim(), hovered);

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Table | OutputFormat::Markdown => {
            if output.tooltip.is_empty() {
                eprintln!("No event on {}", output.date);
            } else {
                println!("{}", output.tooltip);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
