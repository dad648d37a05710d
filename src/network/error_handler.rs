//! Centralized error handling and classification

use crate::analytics::error::AnalyticsError;
use crate::logging::LogLevel;

/// Centralized error handler for analytics requests
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn new() -> Self {
        Self
    }

    /// Classify error and determine appropriate log level
    pub fn classify_error(&self, error: &AnalyticsError) -> LogLevel {
        match error {
            // Rate limiting - low priority
            AnalyticsError::Http { status, .. } if *status == 429 => LogLevel::Debug,

            // Server errors - temporary issues
            AnalyticsError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Authentication errors - critical
            AnalyticsError::Http { status, .. } if *status == 401 || *status == 403 => {
                LogLevel::Error
            }
            AnalyticsError::Unauthenticated { .. } => LogLevel::Error,

            // Server sent something that is not an analytics payload
            AnalyticsError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            AnalyticsError::Reqwest(_) => LogLevel::Warn,

            _ => LogLevel::Warn,
        }
    }

    /// Determine if an error should trigger retry logic
    pub fn should_retry(&self, error: &AnalyticsError) -> bool {
        match error {
            AnalyticsError::Reqwest(_) => true,
            AnalyticsError::Decode(_) => false,
            AnalyticsError::Unauthenticated { .. } => false,
            AnalyticsError::Http { status, .. } => matches!(*status, 500..=599),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> AnalyticsError {
        AnalyticsError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_classify_error() {
        let handler = ErrorHandler::new();
        assert_eq!(handler.classify_error(&http(429)), LogLevel::Debug);
        assert_eq!(handler.classify_error(&http(503)), LogLevel::Warn);
        assert_eq!(handler.classify_error(&http(403)), LogLevel::Error);
        assert_eq!(
            handler.classify_error(&AnalyticsError::Unauthenticated {
                location: "/dashboard/login/".to_string()
            }),
            LogLevel::Error
        );
        assert_eq!(handler.classify_error(&http(404)), LogLevel::Warn);
    }

    #[test]
    fn test_should_retry() {
        let handler = ErrorHandler::new();
        assert!(handler.should_retry(&http(500)));
        assert!(handler.should_retry(&http(502)));
        assert!(!handler.should_retry(&http(404)));
        assert!(!handler.should_retry(&http(401)));
        assert!(!handler.should_retry(&AnalyticsError::Unauthenticated {
            location: "/dashboard/login/".to_string()
        }));

        let decode = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(!handler.should_retry(&AnalyticsError::Decode(decode)));
    }
}
