//! Chart refresh worker
//!
//! Fetches analytics reports on request (startup, theme change, manual
//! refresh) and on a fixed interval, and reports each outcome as an event.

use super::core::{EventSender, WorkerConfig};
use crate::analytics::error::AnalyticsError;
use crate::analytics::{AnalyticsFilter, AnalyticsSource, FilterError};
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::network::NetworkClient;
use crate::theme::ThemePreference;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, Interval, interval_at};

/// Why a refresh was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Startup,
    ThemeChanged(ThemePreference),
    Manual,
    Interval,
}

impl Display for RefreshReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshReason::Startup => write!(f, "startup"),
            RefreshReason::ThemeChanged(theme) => write!(f, "{} theme", theme),
            RefreshReason::Manual => write!(f, "manual refresh"),
            RefreshReason::Interval => write!(f, "scheduled refresh"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Fetch failed after {attempts} attempt(s): {source}")]
    Fetch {
        #[source]
        source: AnalyticsError,
        attempts: u32,
    },
}

/// Analytics refresher with built-in retry and error handling
pub struct AnalyticsRefresher {
    source: Box<dyn AnalyticsSource>,
    network_client: NetworkClient,
    event_sender: EventSender,
    filter: AnalyticsFilter,
    refresh_interval: Option<Duration>,
}

impl AnalyticsRefresher {
    pub fn new(
        source: Box<dyn AnalyticsSource>,
        event_sender: EventSender,
        config: &WorkerConfig,
    ) -> Self {
        Self {
            source,
            network_client: NetworkClient::new(config.max_retries, config.initial_backoff),
            event_sender,
            filter: config.filter.clone(),
            refresh_interval: config.refresh_interval,
        }
    }

    /// Fetch one report and publish the outcome.
    pub async fn refresh(&self, reason: RefreshReason) -> Result<(), RefreshError> {
        if let Err(e) = self.filter.validate() {
            self.event_sender
                .send_refresh_event(e.to_string(), EventType::Error, LogLevel::Error)
                .await;
            return Err(e.into());
        }

        let level = match reason {
            RefreshReason::Interval => LogLevel::Debug,
            _ => LogLevel::Info,
        };
        self.event_sender
            .send_refresh_event(
                format!("Refreshing charts ({})", reason),
                EventType::Refresh,
                level,
            )
            .await;

        match self
            .network_client
            .fetch_report(self.source.as_ref(), &self.filter)
            .await
        {
            Ok((report, attempts)) => {
                let msg = if attempts > 1 {
                    format!(
                        "Loaded {} placements after {} attempts",
                        report.total(),
                        attempts
                    )
                } else {
                    format!("Loaded {} placements", report.total())
                };
                self.event_sender
                    .send_event(Event::report_ready(Arc::new(report), msg))
                    .await;
                Ok(())
            }
            Err((source, attempts)) => {
                let log_level = self.network_client.classify_error(&source);
                self.event_sender
                    .send_refresh_event(
                        format!("Chart refresh failed: {}", source),
                        EventType::Error,
                        log_level,
                    )
                    .await;
                Err(RefreshError::Fetch { source, attempts })
            }
        }
    }

    /// Serve refresh requests until shutdown or until every requester is gone.
    pub async fn run(
        self,
        mut requests: mpsc::Receiver<RefreshReason>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut ticker = self
            .refresh_interval
            .filter(|period| !period.is_zero())
            .map(|period| interval_at(Instant::now() + period, period));

        loop {
            let reason = tokio::select! {
                _ = shutdown.recv() => break,
                request = requests.recv() => match request {
                    Some(reason) => reason,
                    None => break,
                },
                _ = next_tick(&mut ticker) => RefreshReason::Interval,
            };
            let reason = coalesce(reason, &mut requests);

            tokio::select! {
                _ = shutdown.recv() => break,
                // Failures are already reported as events.
                _ = self.refresh(reason) => {}
            }

            // Requests that arrived during the fetch are served by it.
            if let Some(ticker) = ticker.as_mut() {
                ticker.reset();
            }
        }
    }
}

/// Folds every queued request into one; the latest reason wins.
fn coalesce(first: RefreshReason, requests: &mut mpsc::Receiver<RefreshReason>) -> RefreshReason {
    let mut reason = first;
    let mut merged = 0;
    while let Ok(next) = requests.try_recv() {
        reason = next;
        merged += 1;
    }
    if merged > 0 {
        log::debug!("Coalesced {} queued refresh request(s)", merged);
    }
    reason
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AnalyticsReport, CategoryCount, MockAnalyticsSource};
    use chrono::NaiveDate;
    use tokio::time::timeout;

    fn config() -> WorkerConfig {
        let mut config = WorkerConfig::new(AnalyticsFilter::default());
        config.initial_backoff = Duration::from_millis(1);
        config
    }

    fn report_with_total(total: u64) -> AnalyticsReport {
        AnalyticsReport {
            status_stats: vec![CategoryCount {
                label: Some("Full Time".to_string()),
                count: total,
            }],
            ..Default::default()
        }
    }

    fn refresher(
        source: MockAnalyticsSource,
        config: &WorkerConfig,
    ) -> (AnalyticsRefresher, mpsc::Receiver<Event>) {
        let (event_tx, event_rx) = mpsc::channel(32);
        let refresher = AnalyticsRefresher::new(Box::new(source), EventSender::new(event_tx), config);
        (refresher, event_rx)
    }

    #[tokio::test]
    async fn test_refresh_publishes_report() {
        let mut source = MockAnalyticsSource::new();
        source
            .expect_fetch_report()
            .times(1)
            .returning(|_| Ok(report_with_total(14)));
        let (refresher, mut events) = refresher(source, &config());

        refresher.refresh(RefreshReason::Startup).await.unwrap();

        let started = events.recv().await.unwrap();
        assert_eq!(started.event_type, EventType::Refresh);
        assert_eq!(started.msg, "Refreshing charts (startup)");

        let loaded = events.recv().await.unwrap();
        assert_eq!(loaded.event_type, EventType::Success);
        assert_eq!(loaded.msg, "Loaded 14 placements");
        assert_eq!(loaded.report.unwrap().total(), 14);
    }

    #[tokio::test]
    async fn test_refresh_reports_failure() {
        let mut source = MockAnalyticsSource::new();
        source.expect_fetch_report().times(1).returning(|_| {
            Err(AnalyticsError::Unauthenticated {
                location: "/dashboard/login/".to_string(),
            })
        });
        let (refresher, mut events) = refresher(source, &config());

        let err = refresher.refresh(RefreshReason::Manual).await.unwrap_err();
        assert!(matches!(err, RefreshError::Fetch { attempts: 1, .. }));

        let _started = events.recv().await.unwrap();
        let failed = events.recv().await.unwrap();
        assert_eq!(failed.event_type, EventType::Error);
        assert_eq!(failed.log_level, LogLevel::Error);
        assert!(failed.report.is_none());
    }

    #[tokio::test]
    async fn test_invalid_filter_skips_fetch() {
        let mut source = MockAnalyticsSource::new();
        source.expect_fetch_report().times(0);
        let mut config = config();
        config.filter.start_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        config.filter.end_date = NaiveDate::from_ymd_opt(2024, 4, 1);
        let (refresher, mut events) = refresher(source, &config);

        let err = refresher.refresh(RefreshReason::Startup).await.unwrap_err();
        assert!(matches!(err, RefreshError::Filter(_)));
        assert_eq!(events.recv().await.unwrap().event_type, EventType::Error);
    }

    #[tokio::test]
    async fn test_queued_requests_are_coalesced() {
        let mut source = MockAnalyticsSource::new();
        source
            .expect_fetch_report()
            .times(1)
            .returning(|_| Ok(AnalyticsReport::default()));
        let (refresher, mut events) = refresher(source, &config());

        let (request_tx, request_rx) = mpsc::channel(8);
        request_tx.send(RefreshReason::Startup).await.unwrap();
        request_tx
            .send(RefreshReason::ThemeChanged(ThemePreference::Dark))
            .await
            .unwrap();
        request_tx
            .send(RefreshReason::ThemeChanged(ThemePreference::Light))
            .await
            .unwrap();
        drop(request_tx);

        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        refresher.run(request_rx, shutdown_rx).await;

        let started = events.recv().await.unwrap();
        assert_eq!(started.msg, "Refreshing charts (light theme)");
        assert_eq!(events.recv().await.unwrap().event_type, EventType::Success);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_shutdown_stops_worker() {
        let mut source = MockAnalyticsSource::new();
        source.expect_fetch_report().times(0);
        let (refresher, _events) = refresher(source, &config());

        let (_request_tx, request_rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(refresher.run(request_rx, shutdown_rx));

        shutdown_tx.send(()).unwrap();
        timeout(Duration::from_secs(1), handle)
            .await
            .expect("worker did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_interval_refreshes() {
        let mut source = MockAnalyticsSource::new();
        source
            .expect_fetch_report()
            .returning(|_| Ok(AnalyticsReport::default()));
        let mut config = config();
        config.refresh_interval = Some(Duration::from_millis(10));
        let (refresher, mut events) = refresher(source, &config);

        let (_request_tx, request_rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(refresher.run(request_rx, shutdown_rx));

        let mut loaded = 0;
        while loaded < 2 {
            let event = timeout(Duration::from_secs(1), events.recv())
                .await
                .expect("no interval refresh")
                .unwrap();
            if event.event_type == EventType::Success {
                loaded += 1;
            }
        }

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }
}
