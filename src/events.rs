//! Event System
//!
//! Types and implementations for worker events and logging

use crate::analytics::AnalyticsReport;
use crate::logging::{LogLevel, should_log_with_env};
use crate::theme::ThemePreference;
use chrono::Local;
use std::fmt::Display;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// The theme preference store, reporting a change of theme.
    ThemeStore,
    /// Worker that fetches analytics reports for the charts.
    AnalyticsRefresher,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    ThemeChange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Freshly fetched report, on successful refreshes
    pub report: Option<Arc<AnalyticsReport>>,
    /// New theme, on theme change events
    pub theme: Option<ThemePreference>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            report: None,
            theme: None,
        }
    }

    pub fn refresher_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::AnalyticsRefresher, msg, event_type, log_level)
    }

    pub fn report_ready(report: Arc<AnalyticsReport>, msg: String) -> Self {
        Self {
            report: Some(report),
            ..Self::new(
                Worker::AnalyticsRefresher,
                msg,
                EventType::Success,
                LogLevel::Info,
            )
        }
    }

    pub fn theme_changed(theme: ThemePreference) -> Self {
        Self {
            theme: Some(theme),
            ..Self::new(
                Worker::ThemeStore,
                format!("Theme switched to {}", theme),
                EventType::ThemeChange,
                LogLevel::Info,
            )
        }
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_change_event() {
        let event = Event::theme_changed(ThemePreference::Dark);
        assert_eq!(event.worker, Worker::ThemeStore);
        assert_eq!(event.event_type, EventType::ThemeChange);
        assert_eq!(event.theme, Some(ThemePreference::Dark));
        assert_eq!(event.msg, "Theme switched to dark");
        assert!(event.should_display());
    }

    #[test]
    fn test_report_event_carries_report() {
        let report = Arc::new(AnalyticsReport::default());
        let event = Event::report_ready(report.clone(), "Loaded".to_string());
        assert_eq!(event.event_type, EventType::Success);
        assert!(Arc::ptr_eq(event.report.as_ref().unwrap(), &report));
    }

    #[test]
    fn test_display_format() {
        let event = Event::refresher_with_level(
            "Fetching analytics".to_string(),
            EventType::Refresh,
            LogLevel::Debug,
        );
        let text = event.to_string();
        assert!(text.starts_with("Refresh ["));
        assert!(text.ends_with("] Fetching analytics"));
    }
}
