//! Fetching the current rate from the rates endpoint.
//!
//! A `RateFetcher` issues one HTTP GET per call, counts every completed round trip,
//! and decodes the body into a `RateRecord` for the configured market. Failures are
//! logged and reported to `fetch` callers as `FetchResult::Absent`; the reason is
//! only kept by `fetch_detailed`.
//!
//! Counting rules:
//! - The counter is bumped once when the round trip completes (body received or
//!   transport failed), before the body is decoded. A decode failure still counts.
//! - A request that never resolves never counts.
//! - Concurrent calls each count once; the value a caller sees reflects completion
//!   order, not call order. The count and the last result move together.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::{debug, error, warn};
use rate_common::{FailureKind, FetchResult, Market, RateError, RateRecord, Result};

/// Outcome of one `RateFetcher::fetch` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fetch {
    /// Decoded rate, or `Absent` on any failure.
    pub result: FetchResult,
    /// Attempt counter right after this fetch completed.
    pub count: u64,
}

/// HTTP client for a single rates endpoint.
pub struct RateFetcher {
    client: reqwest::Client,
    url: String,
    market: Market,
    /// Completed round trips, successful or not. Never reset.
    count: AtomicU64,
    /// Most recent completion wins. Held while `count` is bumped, so this always
    /// belongs to the completion carrying the highest count.
    last_result: Mutex<FetchResult>,
}

impl RateFetcher {
    /// Creates a fetcher for `url`, reading the `market` quotation.
    ///
    /// `timeout` bounds each request; with `None` the transport default applies.
    pub fn new(url: &str, market: Market, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RateError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
            market,
            count: AtomicU64::new(0),
            last_result: Mutex::new(FetchResult::Absent),
        })
    }

    /// Fetch the current rate.
    pub async fn fetch(&self) -> Fetch {
        let (result, count) = self.fetch_detailed().await;
        Fetch {
            result: result.ok().into(),
            count,
        }
    }

    /// Fetch the current rate, keeping the failure reason.
    pub async fn fetch_detailed(&self) -> (Result<RateRecord>, u64) {
        let body = self.round_trip().await;

        let (result, count) = {
            let mut last = self
                .last_result
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
            let result = body.and_then(|body| RateRecord::decode(&body, self.market));
            *last = result.as_ref().ok().copied().into();
            (result, count)
        };

        match &result {
            Ok(record) => debug!(
                "Fetch #{}: {} sell={} buy={}",
                count, self.market, record.sell, record.buy
            ),
            Err(e) if e.kind() == Some(FailureKind::DecodeFailure) => {
                error!("Fetching rate value failed (#{}): {}", count, e)
            }
            Err(e) => warn!("Fetch #{} from {} failed: {}", count, self.url, e),
        }

        (result, count)
    }

    /// Number of completed round trips so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// Result of the most recently completed fetch.
    pub fn last_result(&self) -> FetchResult {
        *self
            .last_result
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// GET the endpoint and read the whole body.
    async fn round_trip(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RateError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Rate endpoint {} answered {}", self.url, status);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RateError::Transport(e.to_string()))?;
        if body.is_empty() {
            return Err(RateError::EmptyBody);
        }
        Ok(body.to_vec())
    }
}
