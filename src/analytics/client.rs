//! Dashboard Analytics Client
//!
//! Fetches the aggregated placement statistics behind the dashboard charts.

use crate::analytics::error::AnalyticsError;
use crate::analytics::{AnalyticsFilter, AnalyticsReport, AnalyticsSource};
use crate::consts::cli_consts::{ANALYTICS_ENDPOINT, SESSION_COOKIE_NAME, analytics_fetching};
use crate::environment::Environment;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{Client, ClientBuilder, Response, redirect};

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("clinic-dash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    client: Client,
    environment: Environment,
    session_id: Option<String>,
}

impl AnalyticsClient {
    pub fn new(environment: Environment, session_id: Option<String>) -> Result<Self, AnalyticsError> {
        let client = ClientBuilder::new()
            .connect_timeout(analytics_fetching::request_timeout())
            .timeout(analytics_fetching::request_timeout())
            .user_agent(USER_AGENT)
            // The login redirect must surface as an error, not as an HTML body.
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            environment,
            session_id,
        })
    }

    fn build_url(&self, filter: &AnalyticsFilter) -> String {
        build_analytics_url(&self.environment.base_url(), filter)
    }

    async fn handle_response_status(response: Response) -> Result<Response, AnalyticsError> {
        if !response.status().is_success() {
            return Err(AnalyticsError::from_response(response).await);
        }
        Ok(response)
    }
}

/// `{base}/dashboard/api/analytics/?{query}`; the `?` is kept even for an
/// empty query, as the browser does.
pub(crate) fn build_analytics_url(base_url: &str, filter: &AnalyticsFilter) -> String {
    format!(
        "{}/{}?{}",
        base_url.trim_end_matches('/'),
        ANALYTICS_ENDPOINT.trim_start_matches('/'),
        filter.to_query_string()
    )
}

#[async_trait::async_trait]
impl AnalyticsSource for AnalyticsClient {
    async fn fetch_report(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<AnalyticsReport, AnalyticsError> {
        let url = self.build_url(filter);
        let mut request = self.client.get(&url).header(ACCEPT, "application/json");
        if let Some(session_id) = &self.session_id {
            request = request.header(COOKIE, format!("{}={}", SESSION_COOKIE_NAME, session_id));
        }

        let response = Self::handle_response_status(request.send().await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_without_filter() {
        assert_eq!(
            build_analytics_url("http://localhost:8000/", &AnalyticsFilter::default()),
            "http://localhost:8000/dashboard/api/analytics/?"
        );
    }

    #[test]
    fn test_build_url_with_filter() {
        let filter = AnalyticsFilter {
            specialty: Some("Cardiology".to_string()),
            status: Some("Part Time".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_analytics_url("https://clinic.example.org", &filter),
            "https://clinic.example.org/dashboard/api/analytics/?specialty=Cardiology&status=Part%20Time"
        );
    }

    #[test]
    fn test_client_builds_url_from_environment() {
        let env = Environment::Custom {
            url: "https://clinic.example.org/".to_string(),
        };
        let client = AnalyticsClient::new(env, None).unwrap();
        assert_eq!(
            client.build_url(&AnalyticsFilter::default()),
            "https://clinic.example.org/dashboard/api/analytics/?"
        );
    }
}
