//! Dashboard header component
//!
//! Renders the title, the theme toggle and the refresh status

use super::super::state::{DashboardState, RefreshState};
use super::super::utils::spinner_frame;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let palette = state.palette();
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(36)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("CLINIC PLACEMENTS v{}", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.environment.base_url(),
            Style::default().fg(palette.muted),
        )),
    ])
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(palette.grid)),
    );
    f.render_widget(title, header_chunks[0]);

    let theme = state.applied_theme.get();
    let mut theme_spans = vec![
        Span::styled(
            format!("{} ", palette.icon),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} mode", theme), Style::default().fg(palette.text)),
    ];
    if state.spinner.is_active() {
        theme_spans.push(Span::styled(
            format!(" {}", spinner_frame(state.tick)),
            Style::default().fg(palette.accent),
        ));
    }

    let status = match state.refresh_state() {
        RefreshState::Loading { .. } => Span::styled(
            format!("{} Loading charts", spinner_frame(state.tick)),
            Style::default().fg(palette.accent),
        ),
        RefreshState::Failed(_) => Span::styled(
            "Refresh failed, showing last data",
            Style::default().fg(palette.status(2)),
        ),
        RefreshState::Idle => match &state.last_updated {
            Some(timestamp) => Span::styled(
                format!("Updated {}", timestamp),
                Style::default().fg(palette.muted),
            ),
            None => Span::styled("Waiting for data", Style::default().fg(palette.muted)),
        },
    };

    let side = Paragraph::new(vec![Line::from(theme_spans), Line::from(status)])
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(palette.grid)),
        );
    f.render_widget(side, header_chunks[1]);
}
