//! Periodic snapshot refresh
//!
//! Runs one load cycle immediately and then one per interval until the
//! shutdown signal fires. Cycles never overlap: the next tick is only
//! awaited once the previous cycle has been published.

use super::core::EventSender;
use crate::events::{EventType, now_timestamp};
use crate::feed::FeedSource;
use crate::loader::{LoadReport, Outcome, load_snapshot};
use crate::logging::LogLevel;
use crate::model::Snapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;

/// Spawn one load cycle on its own task so a panic inside it is contained.
fn spawn_cycle(source: Arc<dyn FeedSource>) -> JoinHandle<(Snapshot, LoadReport)> {
    tokio::spawn(async move { load_snapshot(source.as_ref()).await })
}

/// Run a single contained load cycle to completion.
pub async fn load_guarded(
    source: Arc<dyn FeedSource>,
) -> Result<(Snapshot, LoadReport), JoinError> {
    spawn_cycle(source).await
}

fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

pub struct Refresher {
    source: Arc<dyn FeedSource>,
    event_sender: EventSender,
    interval: Duration,
}

impl Refresher {
    pub fn new(source: Arc<dyn FeedSource>, event_sender: EventSender, interval: Duration) -> Self {
        Self {
            source,
            event_sender,
            interval,
        }
    }

    /// Start the refresh loop
    pub fn run(self, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = ticker.tick() => {}
                }

                self.event_sender
                    .send_refresh_event(
                        format!("Refreshing from {}", self.source.location()),
                        EventType::Refresh,
                        LogLevel::Info,
                    )
                    .await;

                let cycle = spawn_cycle(self.source.clone());
                let abort = cycle.abort_handle();
                tokio::select! {
                    _ = shutdown.recv() => {
                        // Drop the in-flight cycle so nothing reaches a torn down view
                        abort.abort();
                        break;
                    }
                    joined = cycle => self.publish(joined).await,
                }
            }
        })
    }

    async fn publish(&self, joined: Result<(Snapshot, LoadReport), JoinError>) {
        match joined {
            Ok((snapshot, report)) => {
                self.report_outcomes(&report).await;
                let loaded = report.outcomes.len() - report.degraded().count();
                self.event_sender
                    .send_refresh_event(
                        format!(
                            "Refresh complete ({}/{} documents), next in {}",
                            loaded,
                            report.outcomes.len(),
                            format_interval(self.interval)
                        ),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                self.event_sender.send_snapshot(snapshot).await;
            }
            Err(e) => {
                log::error!("refresh cycle aborted: {}", e);
                self.event_sender
                    .send_refresh_event(
                        format!("Refresh failed: {}", e),
                        EventType::Error,
                        LogLevel::Error,
                    )
                    .await;
                self.event_sender
                    .send_snapshot(Snapshot::empty(now_timestamp()))
                    .await;
            }
        }
    }

    async fn report_outcomes(&self, report: &LoadReport) {
        for (resource, outcome) in &report.outcomes {
            match outcome {
                Outcome::Degraded(e) => {
                    self.event_sender
                        .send_feed_event(
                            *resource,
                            format!("{} unavailable: {}", resource.file_name(), e),
                            EventType::Error,
                            e.log_level(),
                        )
                        .await;
                }
                Outcome::Loaded { records, skipped } => {
                    let msg = if *skipped > 0 {
                        format!(
                            "{}: {} records ({} skipped)",
                            resource.file_name(),
                            records,
                            skipped
                        )
                    } else {
                        format!("{}: {} records", resource.file_name(), records)
                    };
                    self.event_sender
                        .send_feed_event(*resource, msg, EventType::Success, LogLevel::Debug)
                        .await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::feed::error::FeedError;
    use crate::feed::{MockFeedSource, Resource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Notify, mpsc};
    use tokio::time::{Instant, timeout};

    const HOUR: Duration = Duration::from_secs(3600);

    fn start_every(
        source: Arc<dyn FeedSource>,
        interval: Duration,
    ) -> (mpsc::Receiver<Event>, broadcast::Sender<()>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(100);
        let (shutdown_tx, _) = broadcast::channel(1);
        let refresher = Refresher::new(source, EventSender::new(tx), interval);
        let handle = refresher.run(shutdown_tx.subscribe());
        (rx, shutdown_tx, handle)
    }

    fn start(
        source: Arc<dyn FeedSource>,
    ) -> (mpsc::Receiver<Event>, broadcast::Sender<()>, JoinHandle<()>) {
        start_every(source, HOUR)
    }

    async fn next_snapshot(rx: &mut mpsc::Receiver<Event>) -> (Arc<Snapshot>, Vec<Event>) {
        next_snapshot_within(rx, Duration::from_secs(5)).await
    }

    async fn next_snapshot_within(
        rx: &mut mpsc::Receiver<Event>,
        limit: Duration,
    ) -> (Arc<Snapshot>, Vec<Event>) {
        let mut seen = Vec::new();
        loop {
            let event = timeout(limit, rx.recv())
                .await
                .expect("refresher timed out")
                .expect("channel closed");
            if let Some(snapshot) = event.snapshot.clone() {
                return (snapshot, seen);
            }
            seen.push(event);
        }
    }

    fn mock_source() -> MockFeedSource {
        let mut mock = MockFeedSource::new();
        mock.expect_location()
            .returning(|| "http://localhost:3000".to_string());
        mock
    }

    #[tokio::test]
    async fn test_first_cycle_runs_immediately() {
        let mut mock = mock_source();
        mock.expect_fetch().returning(|resource| match resource {
            Resource::Events => Ok(br#"[{"project":"X","status":"active"}]"#.to_vec()),
            Resource::Wallets => Err(FeedError::Http {
                status: 404,
                message: String::new(),
            }),
            Resource::Alerts => Ok(b"[]".to_vec()),
        });
        let (mut rx, shutdown, handle) = start(Arc::new(mock));

        let (snapshot, seen) = next_snapshot(&mut rx).await;
        assert_eq!(snapshot.events.len(), 1);
        assert!(snapshot.wallets.is_empty());
        assert!(seen.iter().any(|e| {
            e.event_type == EventType::Error && e.msg.starts_with("wallets_report.json unavailable")
        }));
        assert!(seen
            .iter()
            .any(|e| e.msg.starts_with("Refresh complete (2/3 documents)")));

        let _ = shutdown.send(());
        timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_panicking_cycle_publishes_empty_snapshot() {
        struct ExplodingFeed;

        #[async_trait::async_trait]
        impl FeedSource for ExplodingFeed {
            fn location(&self) -> String {
                "nowhere".to_string()
            }

            async fn fetch(&self, _resource: Resource) -> Result<Vec<u8>, FeedError> {
                panic!("feed exploded")
            }
        }

        let (mut rx, shutdown, handle) = start(Arc::new(ExplodingFeed));

        let (snapshot, seen) = next_snapshot(&mut rx).await;
        assert!(snapshot.events.is_empty());
        assert!(snapshot.wallets.is_empty());
        assert!(snapshot.alerts.is_empty());
        assert!(seen
            .iter()
            .any(|e| e.log_level == LogLevel::Error && e.msg.starts_with("Refresh failed")));

        let _ = shutdown.send(());
        timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_cycle_fires_after_interval() {
        let interval = Duration::from_secs(300);
        let fetches = Arc::new(AtomicUsize::new(0));
        let counter = fetches.clone();
        let mut mock = mock_source();
        mock.expect_fetch().returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(b"[]".to_vec())
        });
        let started = Instant::now();
        let (mut rx, shutdown, handle) = start_every(Arc::new(mock), interval);

        next_snapshot_within(&mut rx, interval).await;
        assert!(started.elapsed() < interval);
        assert_eq!(fetches.load(Ordering::SeqCst), 3);

        // Nothing else happens until the interval has elapsed
        tokio::time::advance(interval / 2).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(fetches.load(Ordering::SeqCst), 3);

        next_snapshot_within(&mut rx, interval * 2).await;
        assert!(started.elapsed() >= interval);
        assert_eq!(fetches.load(Ordering::SeqCst), 6);

        let _ = shutdown.send(());
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_aborts_in_flight_cycle() {
        /// Signals when the fetch future holding it is dropped.
        struct DropSignal(Arc<Notify>);

        impl Drop for DropSignal {
            fn drop(&mut self) {
                self.0.notify_one();
            }
        }

        struct StalledFeed {
            started: Arc<Notify>,
            dropped: Arc<Notify>,
        }

        #[async_trait::async_trait]
        impl FeedSource for StalledFeed {
            fn location(&self) -> String {
                "stalled".to_string()
            }

            async fn fetch(&self, _resource: Resource) -> Result<Vec<u8>, FeedError> {
                let _signal = DropSignal(self.dropped.clone());
                self.started.notify_one();
                std::future::pending::<Result<Vec<u8>, FeedError>>().await
            }
        }

        let started = Arc::new(Notify::new());
        let dropped = Arc::new(Notify::new());
        let feed = StalledFeed {
            started: started.clone(),
            dropped: dropped.clone(),
        };
        let (mut rx, shutdown, handle) = start(Arc::new(feed));

        timeout(Duration::from_secs(5), started.notified())
            .await
            .expect("fetch never started");
        shutdown.send(()).unwrap();
        timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
        timeout(Duration::from_secs(5), dropped.notified())
            .await
            .expect("in-flight fetch was not dropped");

        // The refresher is gone, so the channel drains and closes
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        assert!(events.iter().all(|e| e.snapshot.is_none()));
        assert!(events.iter().any(|e| e.event_type == EventType::Refresh));
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::from_secs(300)), "5m 0s");
        assert_eq!(format_interval(Duration::from_secs(45)), "45s");
    }
}
