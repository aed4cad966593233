//! quakestats - historical earthquake statistics from the terminal.
//!
//! Queries the USGS FDSN event service once, keeps the raw GeoJSON, and
//! reports event counts, the strongest event and per-year trends.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

mod chart;
mod cli;
mod client;
mod errors;
mod extract;
mod models;
mod output;
mod query;
mod stats;
mod store;

use cli::{Cli, Command};
use client::FdsnClient;
use stats::Summary;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Fetch(args) => cmd_fetch(&args),
        Command::Stats(args) => cmd_stats(&args),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Validate the query and download the raw body.
fn fetch_body(args: &cli::QueryArgs) -> Result<String> {
    let query = args.query();
    query.validate()?;

    let client =
        FdsnClient::new(&args.endpoint, args.timeout()).context("failed to create FDSN client")?;
    let response = client.fetch(&query).map_err(|e| {
        let msg = if e.is_network() {
            "failed to fetch earthquake events (check the network connection and service status)"
        } else {
            "failed to fetch earthquake events"
        };
        anyhow::Error::new(e).context(msg)
    })?;

    info!(
        "fetched {} bytes (HTTP {}) from {}",
        response.body.len(),
        response.status,
        response.url
    );
    Ok(response.body)
}

/// Execute the `fetch` command - download and save the raw response.
fn cmd_fetch(args: &cli::FetchArgs) -> Result<()> {
    let body = fetch_body(&args.query)?;

    // A save failure is fatal for `fetch`.
    store::persist_raw(&args.output, &body)?;
    info!("saved raw response to {}", args.output.display());
    Ok(())
}

/// Optionally save the raw body, then decode and aggregate it.
///
/// A failed save is logged and the in-memory body is still summarised.
fn summarise(body: &str, save: Option<&Path>) -> Result<Summary> {
    if let Some(path) = save {
        match store::persist_raw(path, body) {
            Ok(()) => info!("saved raw response to {}", path.display()),
            Err(e) => warn!("continuing without saved copy: {e}"),
        }
    }

    let collection = models::parse_collection(body).context("failed to decode response")?;
    info!("decoded {} events", collection.features.len());

    Ok(Summary::from_features(&collection.features))
}

/// Execute the `stats` command - summarise and chart.
fn cmd_stats(args: &cli::StatsArgs) -> Result<()> {
    let summary = match &args.input {
        Some(path) => {
            info!("reading saved response from {}", path.display());
            summarise(&store::load_raw(path)?, None)?
        }
        None => {
            let body = fetch_body(&args.query)?;
            let save = (!args.no_save).then_some(args.save.as_path());
            summarise(&body, save)?
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::write_summary(&mut handle, &summary, args.format)?;

    let series = [
        chart::count_series(&summary.yearly_counts),
        chart::average_series(&summary.yearly_average_magnitude),
    ];

    // Charts would corrupt a JSON document on stdout.
    if !args.no_charts && args.format == output::Format::Human {
        writeln!(handle)?;
        chart::render_bars(&mut handle, &series[0], args.chart_width)?;
        writeln!(handle)?;
        chart::render_line(&mut handle, &series[1], args.chart_width)?;
    }

    if let Some(path) = &args.chart_json {
        chart::write_series_json(path, &series).context("failed to export chart series")?;
        info!("wrote chart series to {}", path.display());
    }

    Ok(())
}
