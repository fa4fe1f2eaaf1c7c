//! Local rates HTTP server.
//!
//! Stand-in for the public latest-rates endpoint, used to run the client offline.
//! Two building blocks are wired together here:
//!
//! - `QuoteGenerator` — background task moving every market quotation of a shared
//!   board by a small random walk on a fixed tick.
//! - `handler::latest` — `GET /v2/latest`, answering with the board in the exact
//!   shape of the public API, or with an injected 500 and empty body.
//!
//! Usage example (CLI):
//! ```bash
//! rate_server --port 8080 --tick-ms 500 --fail-ratio 0.2
//! ```
#![warn(missing_docs)]
use crate::args::Args;
use crate::handler::AppState;
use crate::model::quote_generator::QuoteGenerator;
use axum::Router;
use axum::routing::get;
use clap::Parser;
use log::info;
use rate_common::RateError;
use rate_common::Result;
use rate_common::net::{LATEST_PATH, addr};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

mod args;
mod handler;
pub mod model;

/// Routes served by the rate server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(LATEST_PATH, get(handler::latest))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), RateError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(Notify::new());
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down server...");
            shutdown.notify_one();
        })
        .map_err(|e| RateError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let board = Arc::new(RwLock::new(QuoteGenerator::initial_board()));
    let generator = QuoteGenerator::start(board.clone(), Duration::from_millis(args.tick_ms));

    let listener = TcpListener::bind(addr("0.0.0.0", args.port)).await?;
    info!(
        "Serving {} on {} (fail ratio {})",
        LATEST_PATH,
        listener.local_addr()?,
        args.fail_ratio
    );

    let state = AppState {
        board,
        fail_ratio: args.fail_ratio,
    };
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.notified().await })
        .await?;

    generator.abort();
    info!("Server stopped");
    Ok(())
}

fn init_logger() {
    logger_builder(std::env::var("RUST_LOG").ok().as_deref()).init();
}

/// Logger at `Info`, with `filters` (the `RUST_LOG` syntax) applied on top.
fn logger_builder(filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    builder
}
