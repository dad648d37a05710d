//! Error handling for the analytics module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The response body was not a valid analytics payload.
    #[error("Malformed analytics payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server redirected to its login page.
    #[error("Not logged in to the dashboard (redirected to {location})")]
    Unauthenticated { location: String },

    /// An error occurred while processing the request.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl AnalyticsError {
    pub async fn from_response(response: reqwest::Response) -> AnalyticsError {
        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("login page")
                .to_string();
            return AnalyticsError::Unauthenticated { location };
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        AnalyticsError::Http {
            status: status.as_u16(),
            message,
        }
    }
}
