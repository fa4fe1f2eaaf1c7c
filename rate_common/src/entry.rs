//! Record published for the renderer after every refresh.
use std::fmt;

use chrono::{DateTime, Utc};
use crate::rate::FetchResult;

/// Values a renderer displays: the rate, how many fetches completed, and when.
///
/// A failed fetch publishes zero `sell`/`buy`; a genuine zero rate looks the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublishedEntry {
    /// Selling price, or 0 when no rate was received.
    pub sell: f64,
    /// Buying price, or 0 when no rate was received.
    pub buy: f64,
    /// Attempt counter at the time the fetch completed.
    pub count: u64,
    /// When the entry was produced.
    pub timestamp: DateTime<Utc>,
}

impl PublishedEntry {
    /// Zero-valued entry shown before any fetch has completed.
    pub fn placeholder(timestamp: DateTime<Utc>) -> Self {
        Self {
            sell: 0.0,
            buy: 0.0,
            count: 0,
            timestamp,
        }
    }

    /// Builds the entry for a completed fetch, falling back to zeros on `Absent`.
    pub fn from_fetch(result: &FetchResult, count: u64, timestamp: DateTime<Utc>) -> Self {
        let (sell, buy) = result
            .record()
            .map(|r| (r.sell, r.buy))
            .unwrap_or((0.0, 0.0));
        Self {
            sell,
            buy,
            count,
            timestamp,
        }
    }
}

impl fmt::Display for PublishedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fetch Count {} Buy={:.2} Sell={:.2} Time={}",
            self.count,
            self.buy,
            self.sell,
            self.timestamp.to_rfc3339()
        )
    }
}
