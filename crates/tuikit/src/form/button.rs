use super::component::{FocusDirection, FormComponent};
use crate::buffer::{Buffer, Region};
use crate::config::Palette;
use crate::event::{EventResult, Key, KeyType};
use crate::geometry::Rect;
use crate::layout::Constraint;
use crate::rich_text::RichText;
use std::collections::HashMap;

const FOCUS_LEFT: &str = "\u{25b6}";
const FOCUS_RIGHT: &str = "\u{25c0}";

/// Return or space with no modifiers
pub(crate) fn is_activate(key: &Key) -> bool {
    key.is_plain() && (key.kind == KeyType::Return || key.ch == Some(' '))
}

/// A single button, drawn `▶ label ◀` while focused. Labels may carry
/// color markup; plain parts take the button's own color.
pub struct FormButton {
    label: RichText,
    on_click: Box<dyn FnMut()>,
    hpad: u16,
    vpad: u16,
    area: Rect,
    focused: bool,
}

impl FormButton {
    pub fn new(label: impl Into<RichText>, on_click: impl FnMut() + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Box::new(on_click),
            hpad: 1,
            vpad: 0,
            area: Rect::default(),
            focused: false,
        }
    }

    /// Blank space around the label, inside the button's color
    pub fn padding(mut self, hpad: u16, vpad: u16) -> Self {
        self.hpad = hpad;
        self.vpad = vpad;
        self
    }

    pub fn label(&self) -> &RichText {
        &self.label
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn width(&self) -> u16 {
        let len = self.label.len().min(u16::MAX as usize) as u16;
        len.saturating_add(self.hpad * 2).saturating_add(2)
    }
}

impl FormComponent for FormButton {
    fn constraint(&self) -> Constraint {
        Constraint::Fixed(self.width())
    }

    fn compute_height(&mut self, _width: u16) -> u16 {
        self.vpad * 2 + 1
    }

    fn attach(&mut self, area: Rect) {
        self.area = area.with_width(self.width().min(area.width));
    }

    fn draw(&mut self, canvas: &mut Buffer, palette: &Palette) {
        let style = if self.focused { palette.focus() } else { palette.normal() };
        let badge = palette.badge(self.focused);
        let pad = " ".repeat(self.hpad as usize);
        let mut region = Region::new(canvas, self.area);
        region.set_style(style).clear();

        region
            .at(0, self.vpad)
            .set_style(badge)
            .write(if self.focused { FOCUS_LEFT } else { " " })
            .set_style(style)
            .write(&pad);
        if self.focused {
            let pen = region.pen();
            region.move_cursor(pen.x, pen.y);
        }
        self.label.render(&mut region, &HashMap::new(), None);
        region
            .set_style(style)
            .write(&pad)
            .set_style(badge)
            .write(if self.focused { FOCUS_RIGHT } else { " " });
    }

    fn take_focus(&mut self, _direction: FocusDirection) {
        self.focused = true;
    }

    fn lose_focus(&mut self, _direction: FocusDirection) {
        self.focused = false;
    }

    fn feed(&mut self, key: &Key) -> EventResult {
        if !is_activate(key) {
            return EventResult::Ignored;
        }
        (self.on_click)();
        EventResult::Consumed
    }
}
