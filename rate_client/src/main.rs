//! Rate Client — polls an exchange-rate endpoint and logs the "Dólar Blue" quotation.
//!
//! The client refreshes once on startup and then again whenever the hint returned by
//! the previous refresh expires (15 minutes by default). Each refresh is published to
//! a renderer task that logs the entry; failed fetches publish a zero rate.
//!
//! Usage example (CLI):
//! ```bash
//! rate_client --market blue --refresh-minutes 15
//! rate_client --url http://127.0.0.1:8080/v2/latest --once
//! ```
#![warn(missing_docs)]
mod args;
mod fetcher;
mod scheduler;
#[cfg(test)]
mod test_server;

use crate::args::Args;
use crate::fetcher::RateFetcher;
use crate::scheduler::RefreshScheduler;
use chrono::{TimeDelta, Utc};
use clap::Parser;
use log::{debug, info, warn};
use rate_common::PublishedEntry;
use rate_common::RateError;
use rate_common::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, watch};

/// Logs every published entry until the scheduler is dropped.
async fn render_loop(mut rx: watch::Receiver<PublishedEntry>) {
    let placeholder = *rx.borrow();
    info!("Waiting for first rate: {}", placeholder);
    while rx.changed().await.is_ok() {
        let entry = *rx.borrow_and_update();
        if entry.sell == 0.0 && entry.buy == 0.0 {
            warn!("No rate available: {}", entry);
        } else {
            info!("RATE: {}", entry);
        }
    }
}

/// Refreshes now and then each time the previous hint expires, until `shutdown` fires.
async fn run_refresh_loop(scheduler: &RefreshScheduler, shutdown: &Notify) {
    loop {
        let refresh = scheduler.refresh().await;
        let wait = (refresh.refresh_after - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        debug!("Sleeping {:?} until next refresh", wait);

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = shutdown.notified() => break,
        }
    }
    info!("Refresh loop stopping...");
}

#[tokio::main]
async fn main() -> Result<(), RateError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(Notify::new());
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            shutdown.notify_one();
        })
        .map_err(|e| RateError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let timeout = args.timeout_secs.map(Duration::from_secs);
    let fetcher = Arc::new(RateFetcher::new(&args.url, args.market, timeout)?);
    let scheduler = RefreshScheduler::new(fetcher.clone())
        .with_interval(TimeDelta::minutes(args.refresh_minutes));
    info!("Tracking `{}` quotation from {}", args.market, args.url);

    if args.once {
        let entry = scheduler.snapshot().await;
        info!("RATE: {}", entry);
        return Ok(());
    }

    let renderer = tokio::spawn(render_loop(scheduler.subscribe()));
    run_refresh_loop(&scheduler, &shutdown).await;
    renderer.abort();

    info!(
        "Client stopped after {} fetches, last result: {:?}",
        fetcher.count(),
        fetcher.last_result()
    );
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
