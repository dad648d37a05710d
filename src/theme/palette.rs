//! Colour tokens per theme
//!
//! Chart colours follow the web dashboard's chart styling so the terminal
//! and browser views read the same.

use super::ThemePreference;
use ratatui::style::Color;

const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Series colours shared by both themes.
pub const CHART_COLORS: [Color; 10] = [
    hex(0x0d6efd),
    hex(0xdc3545),
    hex(0xffc107),
    hex(0x198754),
    hex(0x0dcaf0),
    hex(0x6610f2),
    hex(0xfd7e14),
    hex(0xd63384),
    hex(0x20c997),
    hex(0x6f42c1),
];

/// Employment status colours, in the order the status chart lists them.
pub const STATUS_COLORS: [Color; 4] = [hex(0x198754), hex(0xffc107), hex(0xdc3545), hex(0x6c757d)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub text: Color,
    pub grid: Color,
    pub background: Color,
    pub accent: Color,
    pub muted: Color,
    /// Glyph for the theme toggle: a sun while dark (click for light), a moon while light.
    pub icon: &'static str,
}

impl ThemePalette {
    pub fn for_theme(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Dark => Self {
                text: hex(0xe9ecef),
                grid: hex(0x3b3f4e),
                background: hex(0x2a2d3a),
                accent: CHART_COLORS[4],
                muted: hex(0x8d95a5),
                icon: "☀",
            },
            ThemePreference::Light => Self {
                text: hex(0x212529),
                grid: hex(0xdee2e6),
                background: hex(0xffffff),
                accent: CHART_COLORS[0],
                muted: hex(0x6c757d),
                icon: "☾",
            },
        }
    }

    /// Colour for the `index`-th series, cycling through the palette.
    pub fn series(&self, index: usize) -> Color {
        CHART_COLORS[index % CHART_COLORS.len()]
    }

    pub fn status(&self, index: usize) -> Color {
        STATUS_COLORS[index % STATUS_COLORS.len()]
    }
}

impl From<ThemePreference> for ThemePalette {
    fn from(theme: ThemePreference) -> Self {
        Self::for_theme(theme)
    }
}
