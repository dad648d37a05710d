//! Placement analytics: the filter sent to the dashboard API, the report it
//! returns, and the client that fetches it.

use crate::analytics::error::AnalyticsError;

pub(crate) mod client;
pub mod error;
pub mod filter;
pub mod report;

pub use client::AnalyticsClient;
pub use filter::{AnalyticsFilter, FilterError};
pub use report::{AnalyticsReport, CategoryCount};

#[cfg(test)]
use mockall::{automock, predicate::*};

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Fetches the aggregated placement statistics matching `filter`.
    async fn fetch_report(&self, filter: &AnalyticsFilter)
    -> Result<AnalyticsReport, AnalyticsError>;
}
