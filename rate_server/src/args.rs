//! Command-line arguments for the Rate Server.
use clap::Parser;
use rate_common::net::SERVER_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TCP port to serve the latest-rates endpoint on.
    #[clap(long, default_value_t = SERVER_PORT)]
    pub port: u16,

    /// Milliseconds between two random-walk steps.
    #[clap(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Share of requests answered with a 500 and an empty body, from 0.0 to 1.0.
    #[clap(long, default_value_t = 0.0, value_parser = parse_ratio)]
    pub fail_ratio: f64,
}

fn parse_ratio(raw: &str) -> Result<f64, String> {
    let ratio: f64 = raw.trim().parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("{} is not between 0.0 and 1.0", ratio))
    }
}
