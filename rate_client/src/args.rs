//! Command-line arguments for the Rate Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use rate_common::Market;
use rate_common::net::{
    DEFAULT_RATE_URL, MAX_REFRESH_INTERVAL_MINUTES, REFRESH_INTERVAL_MINUTES,
};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Endpoint answering with the latest quotations.
    #[clap(long, default_value = DEFAULT_RATE_URL)]
    pub url: String,

    /// Quotation of the payload to track.
    #[clap(long, value_enum, default_value_t = Market::Blue)]
    pub market: Market,

    /// Request timeout in seconds. Without it the HTTP client default applies.
    #[clap(long)]
    pub timeout_secs: Option<u64>,

    /// Minutes to wait after each refresh before the next one, up to a year.
    #[clap(
        long,
        default_value_t = REFRESH_INTERVAL_MINUTES,
        value_parser = clap::value_parser!(i64).range(1..=MAX_REFRESH_INTERVAL_MINUTES)
    )]
    pub refresh_minutes: i64,

    /// Fetch a single snapshot, print it and exit.
    #[clap(long)]
    pub once: bool,
}
