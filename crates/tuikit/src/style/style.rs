//! Foreground and background pairs

use super::Color;

/// Colors applied to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Build a style from two color names, unknown names become the default
    pub fn parse(fg: &str, bg: &str) -> Self {
        Self::new()
            .fg(Color::parse_or_reset(fg))
            .bg(Color::parse_or_reset(bg))
    }
}
