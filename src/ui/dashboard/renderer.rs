//! Dashboard main renderer

use super::components::{charts, footer, header, logs};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::Style;
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    let palette = state.palette();
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    charts::render_charts_section(f, main_chunks[1], state);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], &palette, &state.filter);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::report::TimePoint;
    use crate::analytics::{AnalyticsFilter, AnalyticsReport, CategoryCount};
    use crate::environment::Environment;
    use crate::events::Event;
    use crate::theme::{AppliedTheme, ThemePalette, ThemePreference, TransitionSpinner};
    use crate::ui::UIConfig;
    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn state(theme: ThemePreference) -> DashboardState {
        DashboardState::new(
            Environment::Local,
            AppliedTheme::new(theme),
            TransitionSpinner::new(),
            UIConfig::new(true, AnalyticsFilter::default()),
        )
    }

    fn sample_report() -> AnalyticsReport {
        let count = |label: &str, count| CategoryCount {
            label: Some(label.to_string()),
            count,
        };
        AnalyticsReport {
            department_stats: vec![count("Emergency", 12), count("Radiology", 4)],
            specialty_stats: vec![count("Cardiology", 7)],
            shift_stats: vec![count("AM", 5), count("PM", 9)],
            status_stats: vec![count("Full Time", 10), count("Part Time", 4)],
            time_series: (1..=5)
                .map(|day| TimePoint {
                    date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                    count: day as u64,
                })
                .collect(),
            total_count: Some(14),
        }
    }

    fn draw(state: &DashboardState) -> (String, ratatui::buffer::Buffer) {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text = buffer.content().iter().map(|cell| cell.symbol()).collect();
        (text, buffer)
    }

    #[test]
    fn test_renders_charts_and_key_help() {
        let mut state = state(ThemePreference::Light);
        state.add_event(Event::report_ready(
            Arc::new(sample_report()),
            "Loaded 14 placements".to_string(),
        ));
        state.update();

        let (text, _) = draw(&state);
        assert!(text.contains("DEPARTMENTS"));
        assert!(text.contains("SPECIALTIES"));
        assert!(text.contains("SHIFTS"));
        assert!(text.contains("EMPLOYMENT STATUS"));
        assert!(text.contains("DAILY PLACEMENTS"));
        assert!(text.contains("Emergency"));
        assert!(text.contains("Morning"));
        assert!(text.contains("[T] Theme | [R] Refresh | [Q] Quit"));
    }

    #[test]
    fn test_renders_status_counts_near_u64_max() {
        let mut report = sample_report();
        for status in &mut report.status_stats {
            status.count = u64::MAX - 1;
        }
        report.total_count = None;

        let mut state = state(ThemePreference::Dark);
        state.add_event(Event::report_ready(Arc::new(report), "Loaded".to_string()));
        state.update();

        let (text, _) = draw(&state);
        assert!(text.contains("EMPLOYMENT STATUS"));
    }

    #[test]
    fn test_placeholder_before_first_report() {
        let (text, _) = draw(&state(ThemePreference::Light));
        assert!(text.contains("No analytics loaded yet"));
        assert!(text.contains("Starting up..."));
    }

    #[test]
    fn test_background_follows_applied_theme() {
        let applied = AppliedTheme::new(ThemePreference::Light);
        let mut state = state(ThemePreference::Light);
        state.applied_theme = applied.clone();

        let (_, light) = draw(&state);
        assert_eq!(
            light[(0, 0)].bg,
            ThemePalette::for_theme(ThemePreference::Light).background
        );

        let mut subscriber = applied;
        crate::theme::subscriber::ThemeSubscriber::theme_changed(&mut subscriber, ThemePreference::Dark)
            .unwrap();
        let (text, dark) = draw(&state);
        assert_eq!(
            dark[(0, 0)].bg,
            ThemePalette::for_theme(ThemePreference::Dark).background
        );
        assert!(text.contains("dark mode"));
    }
}
