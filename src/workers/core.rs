//! Core worker utilities and traits

use crate::analytics::AnalyticsFilter;
use crate::consts::cli_consts::analytics_fetching;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use std::time::Duration;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_refresh_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::refresher_with_level(
                message, event_type, log_level,
            ))
            .await;
    }
}

/// Worker configuration shared across all worker types
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub filter: AnalyticsFilter,
    /// `None` disables interval refreshes.
    pub refresh_interval: Option<Duration>,
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl WorkerConfig {
    pub fn new(filter: AnalyticsFilter) -> Self {
        Self {
            filter,
            refresh_interval: None,
            max_retries: analytics_fetching::MAX_RETRIES,
            initial_backoff: analytics_fetching::initial_backoff(),
        }
    }
}
