use std::process::ExitCode;

use anyhow::Result;
use brent_dashboard_lib::{FetchState, ViewSession};
use clap::Args;

use crate::output::{render_state, OutputFormat};

#[derive(Args)]
pub struct ViewArgs {
    /// Start of the range (YYYY-MM-DD or RFC 3339); omit for the earliest data
    #[arg(long)]
    pub start: Option<String>,

    /// End of the range (YYYY-MM-DD or RFC 3339); omit for the latest data
    #[arg(long)]
    pub end: Option<String>,
}

pub async fn run(args: &ViewArgs, session: &ViewSession, format: &OutputFormat) -> Result<ExitCode> {
    let range = super::range_args(args.start.as_deref(), args.end.as_deref())?;

    // The outcome is reflected in the published state, which is what gets rendered.
    if let Err(e) = session.fetch_view(&range).await {
        tracing::debug!("view fetch failed: {}", e);
    }

    let state = session.state();
    println!("{}", render_state(&state, *format)?);

    Ok(match state {
        FetchState::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
