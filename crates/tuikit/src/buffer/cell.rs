//! A single terminal cell

use crate::style::{Color, Style};

/// One character cell with its colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// The character displayed
    pub symbol: String,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    /// A blank cell in the terminal default colors
    pub fn empty() -> Self {
        Self::blank(Style::new())
    }

    /// A blank cell painted in `style`
    pub fn blank(style: Style) -> Self {
        Self {
            symbol: " ".to_string(),
            fg: style.fg,
            bg: style.bg,
        }
    }

    pub fn new(symbol: impl Into<String>, style: Style) -> Self {
        Self {
            symbol: symbol.into(),
            fg: style.fg,
            bg: style.bg,
        }
    }

    pub fn style(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}
