//! Turning host refresh triggers into published entries.
//!
//! The scheduler owns no timer. The host calls `refresh` on startup, whenever a
//! display snapshot is needed, and again at or after the `refresh_after` hint of the
//! previous call. Each refresh runs one fetch and publishes its entry on completion,
//! so overlapping refreshes publish in completion order: the last one to finish wins.
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use rate_common::PublishedEntry;
use rate_common::net::REFRESH_INTERVAL_MINUTES;
use tokio::sync::watch;

use crate::fetcher::RateFetcher;

/// Entry published by one refresh plus the host's next trigger time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refresh {
    /// The published entry.
    pub entry: PublishedEntry,
    /// The host should call `refresh` again at or after this instant.
    pub refresh_after: DateTime<Utc>,
}

/// Bridges host triggers into fetch-and-publish cycles.
pub struct RefreshScheduler {
    fetcher: Arc<RateFetcher>,
    interval: TimeDelta,
    published: watch::Sender<PublishedEntry>,
}

impl RefreshScheduler {
    /// Creates a scheduler publishing the placeholder until the first refresh completes.
    pub fn new(fetcher: Arc<RateFetcher>) -> Self {
        let (published, _) = watch::channel(Self::placeholder());
        Self {
            fetcher,
            interval: TimeDelta::minutes(REFRESH_INTERVAL_MINUTES),
            published,
        }
    }

    /// Overrides the delay between a trigger and the next one.
    ///
    /// A hint past the representable range is clamped to `DateTime::<Utc>::MAX_UTC`.
    pub fn with_interval(mut self, interval: TimeDelta) -> Self {
        self.interval = interval;
        self
    }

    /// Zero-valued entry that never touches the network.
    pub fn placeholder() -> PublishedEntry {
        PublishedEntry::placeholder(Utc::now())
    }

    /// Fetch and publish, falling back to a zero rate when nothing was received.
    pub async fn refresh(&self) -> Refresh {
        let refresh_after = Utc::now()
            .checked_add_signed(self.interval)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let fetch = self.fetcher.fetch().await;
        let entry = PublishedEntry::from_fetch(&fetch.result, fetch.count, Utc::now());
        self.published.send_replace(entry);
        debug!(
            "Published fetch #{}; next refresh after {}",
            entry.count,
            refresh_after.to_rfc3339()
        );

        Refresh {
            entry,
            refresh_after,
        }
    }

    /// Entry for an on-demand display snapshot. Runs a full refresh.
    pub async fn snapshot(&self) -> PublishedEntry {
        self.refresh().await.entry
    }

    /// Currently published entry.
    pub fn published(&self) -> PublishedEntry {
        *self.published.borrow()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<PublishedEntry> {
        self.published.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server;
    use axum::Router;
    use axum::routing::get;
    use rate_common::Market;
    use rate_common::net::LATEST_PATH;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn scheduler(url: &str) -> RefreshScheduler {
        let fetcher = RateFetcher::new(url, Market::Blue, Some(Duration::from_secs(5))).unwrap();
        RefreshScheduler::new(Arc::new(fetcher))
    }

    #[tokio::test]
    async fn publishes_fetched_rate_unchanged() {
        let url =
            test_server::serve_body(r#"{"blue":{"value_sell":1234.5,"value_buy":1200.0}}"#).await;
        let scheduler = scheduler(&url);

        let before = Utc::now();
        let refresh = scheduler.refresh().await;

        assert_eq!(refresh.entry.sell, 1234.5);
        assert_eq!(refresh.entry.buy, 1200.0);
        assert_eq!(refresh.entry.count, 1);
        assert!(refresh.entry.timestamp >= before);
        assert_eq!(scheduler.published(), refresh.entry);
    }

    #[tokio::test]
    async fn refresh_hint_is_fifteen_minutes_after_trigger() {
        let url = test_server::serve_body(r#"{"blue":{"value_sell":1.0,"value_buy":1.0}}"#).await;
        let scheduler = scheduler(&url);

        let before = Utc::now();
        let refresh = scheduler.refresh().await;

        assert!(refresh.refresh_after >= before + TimeDelta::minutes(15));
        assert!(refresh.refresh_after <= refresh.entry.timestamp + TimeDelta::minutes(15));
    }

    #[tokio::test]
    async fn custom_interval_moves_the_hint() {
        let url = test_server::serve_body(r#"{"blue":{"value_sell":1.0,"value_buy":1.0}}"#).await;
        let scheduler = scheduler(&url).with_interval(TimeDelta::minutes(1));

        let refresh = scheduler.refresh().await;
        assert!(refresh.refresh_after <= refresh.entry.timestamp + TimeDelta::minutes(1));
    }

    #[tokio::test]
    async fn oversized_interval_clamps_the_hint() {
        let url = test_server::serve_body(r#"{"blue":{"value_sell":1.0,"value_buy":1.0}}"#).await;
        let scheduler = scheduler(&url).with_interval(TimeDelta::MAX);

        let refresh = scheduler.refresh().await;
        assert_eq!(refresh.refresh_after, DateTime::<Utc>::MAX_UTC);
        assert_eq!(refresh.entry.sell, 1.0);
    }

    #[tokio::test]
    async fn string_values_publish_zero_fallback() {
        let url =
            test_server::serve_body(r#"{"blue":{"value_sell":"705.50","value_buy":"685.00"}}"#)
                .await;
        let scheduler = scheduler(&url);

        let first = scheduler.refresh().await.entry;
        assert_eq!((first.sell, first.buy, first.count), (0.0, 0.0, 1));

        let second = scheduler.refresh().await.entry;
        assert_eq!((second.sell, second.buy, second.count), (0.0, 0.0, 2));
    }

    #[tokio::test]
    async fn server_error_publishes_zero_fallback() {
        let url = test_server::serve_server_error().await;
        let scheduler = scheduler(&url);

        let entry = scheduler.snapshot().await;
        assert_eq!((entry.sell, entry.buy, entry.count), (0.0, 0.0, 1));
        assert_eq!(scheduler.published(), entry);
    }

    #[tokio::test]
    async fn placeholder_is_published_before_first_refresh() {
        let url = test_server::closed_url().await;
        let scheduler = scheduler(&url);

        let published = scheduler.published();
        assert_eq!((published.sell, published.buy, published.count), (0.0, 0.0, 0));
        let placeholder = RefreshScheduler::placeholder();
        assert_eq!(placeholder.count, 0);
    }

    #[tokio::test]
    async fn subscribers_see_each_publish() {
        let url = test_server::serve_body(r#"{"blue":{"value_sell":3.0,"value_buy":2.0}}"#).await;
        let scheduler = scheduler(&url);
        let mut rx = scheduler.subscribe();

        scheduler.refresh().await;
        assert!(rx.has_changed().unwrap());
        let entry = *rx.borrow_and_update();
        assert_eq!((entry.sell, entry.buy), (3.0, 2.0));
    }

    #[tokio::test]
    async fn overlapping_refreshes_publish_last_completion() {
        // First request is slow, later ones answer immediately.
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new().route(
            LATEST_PATH,
            get(move || {
                let hits = hits.clone();
                async move {
                    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                        tokio::time::sleep(Duration::from_millis(400)).await;
                        r#"{"blue":{"value_sell":100.0,"value_buy":90.0}}"#
                    } else {
                        r#"{"blue":{"value_sell":200.0,"value_buy":190.0}}"#
                    }
                }
            }),
        );
        let url = test_server::serve(router).await;
        let scheduler = scheduler(&url);

        let (slow, fast) = tokio::join!(scheduler.refresh(), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            scheduler.refresh().await
        });

        assert_eq!(fast.entry.sell, 200.0);
        assert_eq!(fast.entry.count, 1);
        assert_eq!(slow.entry.sell, 100.0);
        assert_eq!(slow.entry.count, 2);
        assert_eq!(scheduler.published(), slow.entry);
    }
}
