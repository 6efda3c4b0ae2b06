mod commands;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use brent_dashboard_lib::chart::registry;
use brent_dashboard_lib::{DashboardConfig, ViewSession};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

const DEFAULT_LOG_FILTER: &str = "brent_api=info,brent_dashboard_lib=info,brent_dashboard_cli=info";

#[derive(Parser)]
#[command(name = "brent-dashboard")]
#[command(about = "Chart Brent oil log returns with change point and event markers")]
struct Cli {
    /// Output format: table, json or markdown
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// API base URL (overrides BRENT_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a date range and show the chart summary and stat cards
    View(commands::view::ViewArgs),
    /// Show the event tooltip for a hovered date
    Hover(commands::hover::HoverArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = DashboardConfig::from_env();
    if let Some(ref url) = cli.base_url {
        config = config.with_base_url(url);
    }
    tracing::debug!(base_url = %config.base_url, reentry = ?config.reentry, "starting");

    registry::install();
    let session = ViewSession::new(&config);

    match &cli.command {
        Commands::View(args) => commands::view::run(args, &session, &cli.output).await,
        Commands::Hover(args) => commands::hover::run(args, &session, &cli.output).await,
    }
}
