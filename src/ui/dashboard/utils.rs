//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::theme::ThemePalette;
use ratatui::prelude::Color;

/// Spinner frames for the theme transition indicator
const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker, palette: &ThemePalette) -> Color {
    match worker {
        Worker::AnalyticsRefresher => palette.accent,
        Worker::ThemeStore => palette.series(2),
    }
}

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Chart refresh failed: request timed out".to_string();
    }
    if msg.contains("Reqwest error") && msg.contains("connect") {
        return "Chart refresh failed: dashboard unreachable".to_string();
    }
    if msg.contains("Not logged in") {
        return "Chart refresh failed: log in with `clinic-dash login`".to_string();
    }
    msg.to_string()
}

/// Shortens a chart label to `max` characters, marking the cut with `…`.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let mut short: String = label.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}
