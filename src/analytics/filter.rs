//! Analytics filter and its query-string encoding

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Start date {start} is after end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
}

/// Placement filters understood by the analytics endpoint. Unset fields are
/// left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub specialty: Option<String>,
    /// Shift code: `AM`, `MD`, `PM` or `CLOSED`.
    pub shift: Option<String>,
    /// Employment status: `Full Time` or `Part Time`.
    pub status: Option<String>,
}

impl AnalyticsFilter {
    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(FilterError::InvertedDateRange { start, end });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// Encodes the set fields as `key=value&...`, in a fixed order.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let date = |value: &Option<NaiveDate>| value.map(|d| d.format("%Y-%m-%d").to_string());

        [
            ("start_date", date(&self.start_date)),
            ("end_date", date(&self.end_date)),
            ("department", text(&self.department)),
            ("specialty", text(&self.specialty)),
            ("shift", text(&self.shift)),
            ("status", text(&self.status)),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_filter_has_empty_query() {
        let filter = AnalyticsFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.to_query_string(), "");
    }

    #[test]
    fn test_query_string_order_and_encoding() {
        let filter = AnalyticsFilter {
            start_date: Some(date("2024-03-01")),
            end_date: Some(date("2024-03-31")),
            department: Some("Emergency & Trauma".to_string()),
            shift: Some("AM".to_string()),
            status: Some("Full Time".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query_string(),
            "start_date=2024-03-01&end_date=2024-03-31&department=Emergency%20%26%20Trauma&shift=AM&status=Full%20Time"
        );
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let filter = AnalyticsFilter {
            department: Some("   ".to_string()),
            specialty: Some("Cardiology".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.to_query_string(), "specialty=Cardiology");
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let filter = AnalyticsFilter {
            start_date: Some(date("2024-04-01")),
            end_date: Some(date("2024-03-01")),
            ..Default::default()
        };
        assert_eq!(
            filter.validate(),
            Err(FilterError::InvertedDateRange {
                start: date("2024-04-01"),
                end: date("2024-03-01"),
            })
        );

        let same_day = AnalyticsFilter {
            start_date: Some(date("2024-04-01")),
            end_date: Some(date("2024-04-01")),
            ..Default::default()
        };
        assert!(same_day.validate().is_ok());
    }
}
