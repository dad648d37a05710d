//! Dashboard footer component
//!
//! Renders the key bindings and the active filter

use crate::analytics::AnalyticsFilter;
use crate::theme::ThemePalette;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub const KEY_HELP: &str = "[T] Theme | [R] Refresh | [Q] Quit";

pub fn render_footer(f: &mut Frame, area: Rect, palette: &ThemePalette, filter: &AnalyticsFilter) {
    let footer_text = if filter.is_empty() {
        KEY_HELP.to_string()
    } else {
        format!("{} | Filter: {}", KEY_HELP, filter.to_query_string())
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(palette.grid)),
        );
    f.render_widget(footer, area);
}
