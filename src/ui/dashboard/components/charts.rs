//! Dashboard chart components
//!
//! Renders the placement charts: department, specialty and shift bars,
//! employment status gauges and the daily placements sparkline

use super::super::state::DashboardState;
use super::super::utils::truncate_label;
use crate::analytics::report::shift_display_name;
use crate::analytics::{AnalyticsReport, CategoryCount};
use crate::consts::cli_consts::TIME_SERIES_DAYS;
use crate::theme::ThemePalette;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Paragraph, Sparkline,
};

const LABEL_WIDTH: usize = 14;

/// Render the chart grid: two rows, bars on top, shifts/status/trend below.
pub fn render_charts_section(f: &mut Frame, area: Rect, state: &DashboardState) {
    let palette = state.palette();

    let Some(report) = state.report.as_deref() else {
        let placeholder = Paragraph::new("No analytics loaded yet. Press [R] to refresh.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted))
            .block(chart_block("PLACEMENTS", &palette));
        f.render_widget(placeholder, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(rows[1]);

    render_category_bars(
        f,
        top[0],
        "DEPARTMENTS",
        &report.department_stats,
        &palette,
        |c| c.label().to_string(),
    );
    render_category_bars(
        f,
        top[1],
        "SPECIALTIES",
        &report.specialty_stats,
        &palette,
        |c| c.label().to_string(),
    );
    render_category_bars(f, bottom[0], "SHIFTS", &report.shift_stats, &palette, |c| {
        shift_display_name(c.label()).to_string()
    });
    render_status_gauges(f, bottom[1], report, &palette);
    render_time_series(f, bottom[2], report, &palette);
}

fn chart_block<'a>(title: &'a str, palette: &ThemePalette) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.grid))
        .title_style(
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )
}

fn render_category_bars(
    f: &mut Frame,
    area: Rect,
    title: &str,
    counts: &[CategoryCount],
    palette: &ThemePalette,
    label: impl Fn(&CategoryCount) -> String,
) {
    if counts.is_empty() {
        let empty = Paragraph::new("No data")
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted))
            .block(chart_block(title, palette));
        f.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            Bar::default()
                .value(count.count)
                .label(Line::from(truncate_label(&label(count), LABEL_WIDTH)))
                .text_value(count.count.to_string())
                .style(Style::default().fg(palette.series(i)))
                .value_style(Style::default().fg(palette.background).bg(palette.series(i)))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title, palette))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .label_style(Style::default().fg(palette.text))
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn render_status_gauges(f: &mut Frame, area: Rect, report: &AnalyticsReport, palette: &ThemePalette) {
    let block = chart_block("EMPLOYMENT STATUS", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if report.status_stats.is_empty() {
        let empty = Paragraph::new("No data")
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted));
        f.render_widget(empty, inner);
        return;
    }

    let total = report.status_total();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            report
                .status_stats
                .iter()
                .map(|_| Constraint::Length(1))
                .chain(std::iter::once(Constraint::Fill(1))),
        )
        .split(inner);

    for (i, status) in report.status_stats.iter().enumerate() {
        let ratio = if total == 0 {
            0.0
        } else {
            (status.count as f64 / total as f64).clamp(0.0, 1.0)
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(palette.status(i)).bg(palette.grid))
            .ratio(ratio)
            .label(format!(
                "{} {} ({:.0}%)",
                truncate_label(status.label(), LABEL_WIDTH),
                status.count,
                ratio * 100.0
            ));
        f.render_widget(gauge, rows[i]);
    }
}

fn render_time_series(f: &mut Frame, area: Rect, report: &AnalyticsReport, palette: &ThemePalette) {
    let skip = report.time_series.len().saturating_sub(TIME_SERIES_DAYS);
    let points = &report.time_series[skip..];
    let values: Vec<u64> = points.iter().map(|p| p.count).collect();

    let title = match (points.first(), points.last()) {
        (Some(first), Some(last)) => format!(
            "DAILY PLACEMENTS {} - {}",
            first.date.format("%m-%d"),
            last.date.format("%m-%d")
        ),
        _ => "DAILY PLACEMENTS".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(chart_block(&title, palette))
        .data(&values)
        .style(Style::default().fg(palette.accent));

    f.render_widget(sparkline, area);
}
