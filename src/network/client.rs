//! Network client with built-in retry and error handling

use super::error_handler::ErrorHandler;
use crate::analytics::error::AnalyticsError;
use crate::analytics::{AnalyticsFilter, AnalyticsReport, AnalyticsSource};
use crate::logging::LogLevel;
use std::time::Duration;
use tokio::time::sleep;

/// Wraps an [`AnalyticsSource`] with retries and a doubling backoff.
#[derive(Debug, Clone)]
pub struct NetworkClient {
    error_handler: ErrorHandler,
    max_retries: u32,
    initial_backoff: Duration,
}

impl NetworkClient {
    pub fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            error_handler: ErrorHandler::new(),
            max_retries: max_retries.max(1),
            initial_backoff,
        }
    }

    /// Fetch a report, retrying transient failures.
    /// Returns Ok((report, attempts)) on success or Err((error, attempts)) on failure.
    pub async fn fetch_report(
        &self,
        source: &dyn AnalyticsSource,
        filter: &AnalyticsFilter,
    ) -> Result<(AnalyticsReport, u32), (AnalyticsError, u32)> {
        let mut attempts = 0;
        let mut backoff = self.initial_backoff;

        loop {
            attempts += 1;
            match source.fetch_report(filter).await {
                Ok(report) => return Ok((report, attempts)),
                Err(e) => {
                    if attempts >= self.max_retries || !self.error_handler.should_retry(&e) {
                        return Err((e, attempts));
                    }
                    log::debug!(
                        "Analytics fetch attempt {} failed, retrying in {:?}: {}",
                        attempts,
                        backoff,
                        e
                    );
                    sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
            }
        }
    }

    /// Get error classification for logging
    pub fn classify_error(&self, error: &AnalyticsError) -> LogLevel {
        self.error_handler.classify_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::MockAnalyticsSource;

    fn http(status: u16) -> AnalyticsError {
        AnalyticsError::Http {
            status,
            message: "boom".to_string(),
        }
    }

    fn client() -> NetworkClient {
        NetworkClient::new(3, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_returns_first_success() {
        let mut source = MockAnalyticsSource::new();
        source
            .expect_fetch_report()
            .times(1)
            .returning(|_| Ok(AnalyticsReport::default()));

        let (report, attempts) = client()
            .fetch_report(&source, &AnalyticsFilter::default())
            .await
            .unwrap();
        assert_eq!(report, AnalyticsReport::default());
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let mut source = MockAnalyticsSource::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_fetch_report()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(http(503)));
        source
            .expect_fetch_report()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(AnalyticsReport::default()));

        let (_, attempts) = client()
            .fetch_report(&source, &AnalyticsFilter::default())
            .await
            .unwrap();
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let mut source = MockAnalyticsSource::new();
        source
            .expect_fetch_report()
            .times(3)
            .returning(|_| Err(http(500)));

        let (err, attempts) = client()
            .fetch_report(&source, &AnalyticsFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Http { status: 500, .. }));
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_when_logged_out() {
        let mut source = MockAnalyticsSource::new();
        source.expect_fetch_report().times(1).returning(|_| {
            Err(AnalyticsError::Unauthenticated {
                location: "/dashboard/login/".to_string(),
            })
        });

        let (err, attempts) = client()
            .fetch_report(&source, &AnalyticsFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Unauthenticated { .. }));
        assert_eq!(attempts, 1);
    }
}
