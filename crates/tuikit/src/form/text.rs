use super::component::{FocusDirection, FormComponent};
use crate::buffer::{Buffer, Region};
use crate::config::Palette;
use crate::geometry::Rect;
use crate::layout::Constraint;
use crate::rich_text::RichText;
use std::collections::HashMap;

/// Passive wrapped text. It may be made focusable so a reader can tab onto
/// it and scroll it into view.
pub struct FormText {
    text: RichText,
    accepts_focus: bool,
    word_wrap: bool,
    lines: Vec<RichText>,
    area: Rect,
    focused: bool,
}

impl FormText {
    pub fn new(text: RichText) -> Self {
        Self {
            text,
            accepts_focus: false,
            word_wrap: true,
            lines: Vec::new(),
            area: Rect::default(),
            focused: false,
        }
    }

    /// Text in the palette's default color
    pub fn plain(text: &str) -> Self {
        Self::new(RichText::string("default", text))
    }

    pub fn focusable(mut self, accepts_focus: bool) -> Self {
        self.accepts_focus = accepts_focus;
        self
    }

    pub fn word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn text(&self) -> &RichText {
        &self.text
    }

    /// Replace the text. The form picks up a new height on its next reflow.
    pub fn set_text(&mut self, text: RichText) {
        self.text = text;
    }
}

impl FormComponent for FormText {
    fn accepts_focus(&self) -> bool {
        self.accepts_focus
    }

    fn constraint(&self) -> Constraint {
        Constraint::range(1, 10, u16::MAX)
    }

    fn compute_height(&mut self, width: u16) -> u16 {
        let width = (width as usize).saturating_sub(1).max(1);
        self.lines = self.text.wrap(width, self.word_wrap);
        self.lines.len().min(u16::MAX as usize) as u16
    }

    fn attach(&mut self, area: Rect) {
        self.area = area;
    }

    fn draw(&mut self, canvas: &mut Buffer, palette: &Palette) {
        let mut region = Region::new(canvas, self.area);
        region.set_style(palette.blank()).clear();
        let aliases = HashMap::new();
        for (y, line) in self.lines.iter().enumerate() {
            region.at(0, y as u16);
            line.render(&mut region, &aliases, Some(palette.color.as_str()));
        }
        if self.focused {
            region.move_cursor(0, 0);
        }
    }

    fn take_focus(&mut self, _direction: FocusDirection) {
        self.focused = true;
    }

    fn lose_focus(&mut self, _direction: FocusDirection) {
        self.focused = false;
    }
}
