//! Rate board generator.
//!
//! The `QuoteGenerator` runs a background task that moves every `Market` quotation
//! of a shared `LatestRates` board on a fixed tick. Request handlers only read the
//! board, so every client sees the same sequence of prices.

use chrono::Utc;
use log::{debug, error};
use rate_common::Result;
use rate_common::market::Market;
use rate_common::rate::LatestRates;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::task::JoinHandle;

use crate::model::quote::{initial_quotation, next_quotation};

/// Shortest period between two steps.
pub const MIN_TICK: Duration = Duration::from_millis(1);

/// Background market data generator writing into a shared board.
pub struct QuoteGenerator;

impl QuoteGenerator {
    /// Board with every market at its starting quotation.
    pub fn initial_board() -> LatestRates {
        let mut latest = LatestRates::default();
        for market in Market::iter() {
            latest.set_quotation(market, initial_quotation(market));
        }
        latest.last_update = Some(Utc::now().to_rfc3339());
        latest
    }

    /// Start the generator task, stepping `board` every `tick`.
    ///
    /// `tick` is raised to `MIN_TICK` when shorter. The task stops if the board lock
    /// is poisoned.
    pub fn start(board: Arc<RwLock<LatestRates>>, tick: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick.max(MIN_TICK));
            loop {
                interval.tick().await;
                if let Err(e) = Self::step(&board) {
                    error!("Generator stopped: {}", e);
                    break;
                }
            }
        })
    }

    /// Move every market one random-walk step.
    pub fn step(board: &RwLock<LatestRates>) -> Result<()> {
        let mut latest = board.write()?;
        for market in Market::iter() {
            let current = latest
                .quotation(market)
                .copied()
                .unwrap_or_else(|| initial_quotation(market));
            latest.set_quotation(market, next_quotation(&current));
        }
        latest.last_update = Some(Utc::now().to_rfc3339());
        if let Some(blue) = latest.blue {
            debug!("blue sell={:.2} buy={:.2}", blue.value_sell, blue.value_buy);
        }
        Ok(())
    }
}
