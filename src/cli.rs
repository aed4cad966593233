//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::chart::DEFAULT_WIDTH;
use crate::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::output::Format;
use crate::query::{BBox, OrderBy, Query, parse_date};
use crate::store::DEFAULT_RAW_PATH;

/// Historical earthquake statistics from the USGS event service.
#[derive(Parser, Debug)]
#[command(name = "quakestats")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the raw GeoJSON response and save it
    Fetch(FetchArgs),

    /// Summarise earthquakes per year and draw charts
    Stats(StatsArgs),
}

/// Query and transport flags shared by every command.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long, default_value = "2000-01-01", value_parser = parse_date)]
    pub start: NaiveDate,

    /// End date (YYYY-MM-DD)
    #[arg(long, default_value = "2018-10-11", value_parser = parse_date)]
    pub end: NaiveDate,

    /// Bounding box filter: minlat,minlon,maxlat,maxlon
    #[arg(
        long,
        default_value = "50.008,-9.756,58.723,1.67",
        value_parser = parse_bbox,
        allow_hyphen_values = true
    )]
    pub bbox: BBox,

    /// Minimum magnitude
    #[arg(long, default_value = "1")]
    pub min_magnitude: f64,

    /// Result order: time, time-asc, magnitude, magnitude-asc
    #[arg(long, default_value = "time-asc", value_parser = parse_order_by)]
    pub order_by: OrderBy,

    /// FDSN event query endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl QueryArgs {
    /// Build the immutable query from the flags.
    #[must_use]
    pub fn query(&self) -> Query {
        Query {
            start: self.start,
            end: self.end,
            bbox: self.bbox,
            min_magnitude: self.min_magnitude,
            order_by: self.order_by,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Arguments for the `fetch` command.
#[derive(Parser, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Where to save the raw response
    #[arg(long, short = 'o', default_value = DEFAULT_RAW_PATH)]
    pub output: PathBuf,
}

/// Arguments for the `stats` command.
#[derive(Parser, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Analyse a previously saved response instead of fetching
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Where to save the raw response
    #[arg(long, default_value = DEFAULT_RAW_PATH)]
    pub save: PathBuf,

    /// Do not save the raw response
    #[arg(long)]
    pub no_save: bool,

    /// Skip the terminal charts
    #[arg(long)]
    pub no_charts: bool,

    /// Chart width in columns
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub chart_width: usize,

    /// Export the yearly chart series as JSON
    #[arg(long)]
    pub chart_json: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,
}

/// Parse an output format from string.
fn parse_format(s: &str) -> Result<Format, String> {
    s.parse()
}

/// Parse a bounding box from string.
fn parse_bbox(s: &str) -> Result<BBox, String> {
    s.parse()
}

/// Parse a result order from string.
fn parse_order_by(s: &str) -> Result<OrderBy, String> {
    s.parse()
}
