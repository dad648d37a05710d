//! Analytics payload returned by the dashboard API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label shown for placements with no value in a category.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One bar of a category chart. The server names the label after the
/// category (`department`, `specialty`, `shift` or `status`) and sends
/// `null` for placements without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(
        rename = "label",
        alias = "department",
        alias = "specialty",
        alias = "shift",
        alias = "status",
        default
    )]
    pub label: Option<String>,
    pub count: u64,
}

impl CategoryCount {
    pub fn label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => UNKNOWN_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub department_stats: Vec<CategoryCount>,
    #[serde(default)]
    pub specialty_stats: Vec<CategoryCount>,
    #[serde(default)]
    pub shift_stats: Vec<CategoryCount>,
    #[serde(default)]
    pub status_stats: Vec<CategoryCount>,
    #[serde(default)]
    pub time_series: Vec<TimePoint>,
    /// Older servers omit the total; it is then derived from the status counts.
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl AnalyticsReport {
    pub fn total(&self) -> u64 {
        self.total_count.unwrap_or_else(|| self.status_total())
    }

    /// Sum of the employment-status counts, clamped at `u64::MAX`.
    pub fn status_total(&self) -> u64 {
        self.status_stats
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.count))
    }

    /// Day with the most placements in the time series.
    pub fn busiest_day(&self) -> Option<&TimePoint> {
        self.time_series.iter().max_by_key(|point| point.count)
    }
}

/// Human name for a shift code.
pub fn shift_display_name(code: &str) -> &str {
    match code {
        "AM" => "Morning",
        "MD" => "Midday",
        "PM" => "Evening",
        "CLOSED" => "Closed",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "department_stats": [{"department": "Emergency", "count": 12}, {"department": null, "count": 2}],
        "specialty_stats": [{"specialty": "Cardiology", "count": 7}],
        "shift_stats": [{"shift": "AM", "count": 5}, {"shift": "PM", "count": 9}],
        "status_stats": [{"status": "Full Time", "count": 10}, {"status": "Part Time", "count": 4}],
        "time_series": [{"date": "2024-03-01", "count": 3}, {"date": "2024-03-02", "count": 0}],
        "total_count": 14
    }"#;

    #[test]
    fn test_parses_server_payload() {
        let report: AnalyticsReport = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(report.department_stats.len(), 2);
        assert_eq!(report.department_stats[0].label(), "Emergency");
        assert_eq!(report.department_stats[1].label(), UNKNOWN_LABEL);
        assert_eq!(report.specialty_stats[0].label(), "Cardiology");
        assert_eq!(report.shift_stats[1].label(), "PM");
        assert_eq!(report.status_stats[0].count, 10);
        assert_eq!(
            report.time_series[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(report.total(), 14);
    }

    #[test]
    fn test_missing_fields_default() {
        let report: AnalyticsReport =
            serde_json::from_str(r#"{"status_stats": [{"status": "", "count": 3}]}"#).unwrap();

        assert!(report.department_stats.is_empty());
        assert!(report.time_series.is_empty());
        assert_eq!(report.status_stats[0].label(), UNKNOWN_LABEL);
        assert_eq!(report.total(), 3);
        assert!(report.busiest_day().is_none());
    }

    #[test]
    fn test_status_total_saturates() {
        let report: AnalyticsReport = serde_json::from_str(
            r#"{"status_stats": [
                {"status": "Full Time", "count": 18446744073709551615},
                {"status": "Part Time", "count": 4}
            ]}"#,
        )
        .unwrap();

        assert_eq!(report.status_total(), u64::MAX);
        assert_eq!(report.total(), u64::MAX);
    }

    #[test]
    fn test_busiest_day() {
        let report: AnalyticsReport = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(report.busiest_day().map(|p| p.count), Some(3));
    }

    #[test]
    fn test_shift_display_names() {
        assert_eq!(shift_display_name("AM"), "Morning");
        assert_eq!(shift_display_name("MD"), "Midday");
        assert_eq!(shift_display_name("PM"), "Evening");
        assert_eq!(shift_display_name("CLOSED"), "Closed");
        assert_eq!(shift_display_name(UNKNOWN_LABEL), UNKNOWN_LABEL);
    }
}
