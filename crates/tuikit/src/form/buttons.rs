use super::button::is_activate;
use super::component::{FocusDirection, FormComponent};
use crate::buffer::{Buffer, Region};
use crate::config::Palette;
use crate::event::{EventResult, Key};
use crate::geometry::Rect;
use crate::layout::Constraint;
use crate::rich_text::RichText;
use std::collections::HashMap;

const BADGE: &str = "\u{25a1} ";
const FOCUS_BADGE: &str = "\u{25a0} ";

struct Choice {
    label: RichText,
    on_click: Box<dyn FnMut()>,
}

/// A horizontal group of buttons. Focus moves between the buttons before
/// it leaves the group.
pub struct FormButtons {
    buttons: Vec<Choice>,
    focus: Option<usize>,
    hpad: u16,
    spacing: u16,
    area: Rect,
}

impl FormButtons {
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
            focus: None,
            hpad: 1,
            spacing: 2,
            area: Rect::default(),
        }
    }

    pub fn button(mut self, label: impl Into<RichText>, on_click: impl FnMut() + 'static) -> Self {
        self.buttons.push(Choice {
            label: label.into(),
            on_click: Box::new(on_click),
        });
        self
    }

    /// Blank columns between buttons
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Index of the focused button
    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    fn button_width(&self, choice: &Choice) -> u16 {
        let len = (choice.label.len() + BADGE.chars().count()).min(u16::MAX as usize);
        (len as u16).saturating_add(self.hpad * 2)
    }

    fn width(&self) -> u16 {
        let buttons: u16 = self
            .buttons
            .iter()
            .fold(0u16, |sum, b| sum.saturating_add(self.button_width(b)));
        let gaps = self.buttons.len().saturating_sub(1) as u16;
        buttons.saturating_add(gaps.saturating_mul(self.spacing))
    }
}

impl Default for FormButtons {
    fn default() -> Self {
        Self::new()
    }
}

impl FormComponent for FormButtons {
    fn accepts_focus(&self) -> bool {
        !self.buttons.is_empty()
    }

    fn constraint(&self) -> Constraint {
        Constraint::Fixed(self.width())
    }

    fn compute_height(&mut self, _width: u16) -> u16 {
        1
    }

    fn attach(&mut self, area: Rect) {
        self.area = area;
    }

    fn draw(&mut self, canvas: &mut Buffer, palette: &Palette) {
        let pad = " ".repeat(self.hpad as usize);
        let mut region = Region::new(canvas, self.area);
        region.set_style(palette.blank()).clear();
        let mut x = 0u16;
        for (i, choice) in self.buttons.iter().enumerate() {
            let focused = self.focus == Some(i);
            let style = if focused { palette.focus() } else { palette.normal() };
            region.at(x, 0).set_style(style).write(&pad);
            if focused {
                region.move_cursor(x + self.hpad, 0);
            }
            region.write(if focused { FOCUS_BADGE } else { BADGE });
            choice.label.render(&mut region, &HashMap::new(), None);
            region.set_style(style).write(&pad);
            x = x
                .saturating_add(self.button_width(choice))
                .saturating_add(self.spacing);
        }
    }

    fn take_focus(&mut self, direction: FocusDirection) {
        self.focus = direction.entry(self.buttons.len());
    }

    fn lose_focus(&mut self, _direction: FocusDirection) {
        self.focus = None;
    }

    fn shift_focus(&mut self, direction: FocusDirection) -> bool {
        let next = self
            .focus
            .and_then(|i| direction.step(i, self.buttons.len()));
        match next {
            Some(i) => {
                self.focus = Some(i);
                true
            }
            None => false,
        }
    }

    fn focus_path(&mut self, path: &[usize]) -> bool {
        match path {
            [] => true,
            [index] if *index < self.buttons.len() => {
                self.focus = Some(*index);
                true
            }
            _ => false,
        }
    }

    fn feed(&mut self, key: &Key) -> EventResult {
        if !is_activate(key) {
            return EventResult::Ignored;
        }
        match self.focus.and_then(|i| self.buttons.get_mut(i)) {
            Some(choice) => {
                (choice.on_click)();
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }
}
