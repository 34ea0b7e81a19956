use super::component::{FocusDirection, FormComponent};
use crate::buffer::Buffer;
use crate::config::Palette;
use crate::event::{EventResult, Key};
use crate::geometry::Rect;
use crate::layout::Layout;
use tracing::trace;

/// Components side by side, wrapped onto as many lines as the width needs
///
/// Each child is given at least its minimum width. Focus enters at the
/// first child going forward and the last going backward, then moves
/// between children before it leaves the row.
pub struct FormRow {
    children: Vec<Box<dyn FormComponent>>,
    spacing: u16,
    focus: Option<usize>,
    /// Where each child sits, relative to the row
    placements: Vec<Rect>,
}

impl FormRow {
    pub fn new(children: Vec<Box<dyn FormComponent>>) -> Self {
        Self {
            children,
            spacing: 2,
            focus: None,
            placements: Vec::new(),
        }
    }

    pub fn push(mut self, child: impl FormComponent + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// Blank columns between children
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Index of the focused child
    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    /// Where child `index` was placed, relative to the row
    pub fn placement(&self, index: usize) -> Option<Rect> {
        self.placements.get(index).copied()
    }

    /// Children grouped by the line they land on at `width`
    fn wrap_lines(&self, width: u16) -> Vec<Vec<usize>> {
        let mut lines: Vec<Vec<usize>> = Vec::new();
        let mut used = 0u16;
        for (i, child) in self.children.iter().enumerate() {
            let min = child.constraint().minimum();
            match lines.last_mut() {
                Some(line) if used.saturating_add(min) <= width => line.push(i),
                _ => {
                    lines.push(vec![i]);
                    used = 0;
                }
            }
            used = used.saturating_add(min).saturating_add(self.spacing);
        }
        lines
    }

    fn find_accepting(&self, from: Option<usize>, direction: FocusDirection) -> Option<usize> {
        let len = self.children.len();
        let mut index = match from {
            Some(from) => direction.step(from, len),
            None => direction.entry(len),
        };
        while let Some(i) = index {
            if self.children[i].accepts_focus() {
                return Some(i);
            }
            index = direction.step(i, len);
        }
        None
    }
}

impl FormComponent for FormRow {
    fn accepts_focus(&self) -> bool {
        self.children.iter().any(|c| c.accepts_focus())
    }

    fn compute_height(&mut self, width: u16) -> u16 {
        let lines = self.wrap_lines(width);
        self.placements = vec![Rect::default(); self.children.len()];
        let mut top = 0u16;
        for line in &lines {
            let constraints = line.iter().map(|&i| self.children[i].constraint());
            let slots = Layout::horizontal()
                .constraints(constraints)
                .spacing(self.spacing)
                .split(Rect::new(0, top, width, 1));
            let mut height = 0u16;
            for (&i, slot) in line.iter().zip(slots) {
                let h = self.children[i].compute_height(slot.width);
                self.placements[i] = slot.with_height(h);
                height = height.max(h);
            }
            top = top.saturating_add(height);
        }
        trace!(lines = lines.len(), height = top, "form row laid out");
        top
    }

    fn attach(&mut self, area: Rect) {
        for (child, placement) in self.children.iter_mut().zip(&self.placements) {
            child.attach(placement.translate(area.x, area.y));
        }
    }

    fn draw(&mut self, canvas: &mut Buffer, palette: &Palette) {
        for (i, child) in self.children.iter_mut().enumerate() {
            if self.focus != Some(i) {
                child.draw(canvas, palette);
            }
        }
        if let Some(child) = self.focus.and_then(|i| self.children.get_mut(i)) {
            child.draw(canvas, palette);
        }
    }

    fn take_focus(&mut self, direction: FocusDirection) {
        self.focus = self.find_accepting(None, direction);
        if let Some(child) = self.focus.and_then(|i| self.children.get_mut(i)) {
            child.take_focus(direction);
        }
    }

    fn lose_focus(&mut self, direction: FocusDirection) {
        if let Some(child) = self.focus.take().and_then(|i| self.children.get_mut(i)) {
            child.lose_focus(direction);
        }
    }

    fn shift_focus(&mut self, direction: FocusDirection) -> bool {
        let Some(current) = self.focus else {
            return false;
        };
        if self.children[current].shift_focus(direction) {
            return true;
        }
        self.children[current].lose_focus(direction);
        self.focus = self.find_accepting(Some(current), direction);
        match self.focus {
            Some(i) => {
                self.children[i].take_focus(direction);
                true
            }
            None => false,
        }
    }

    fn focus_path(&mut self, path: &[usize]) -> bool {
        let Some((&index, rest)) = path.split_first() else {
            return true;
        };
        if !self.children.get(index).is_some_and(|c| c.accepts_focus()) {
            return false;
        }
        if self.focus != Some(index) {
            let direction = match self.focus {
                Some(current) if index < current => FocusDirection::Previous,
                _ => FocusDirection::Next,
            };
            if let Some(child) = self.focus.and_then(|i| self.children.get_mut(i)) {
                child.lose_focus(direction);
            }
            self.focus = Some(index);
            self.children[index].take_focus(direction);
        }
        trace!(child = index, "form row focus moved");
        self.children[index].focus_path(rest)
    }

    fn allow_blur(&self) -> bool {
        self.focus
            .and_then(|i| self.children.get(i))
            .map_or(true, |c| c.allow_blur())
    }

    fn feed(&mut self, key: &Key) -> EventResult {
        match self.focus.and_then(|i| self.children.get_mut(i)) {
            Some(child) => child.feed(key),
            None => EventResult::Ignored,
        }
    }

    fn take_reflow(&mut self) -> bool {
        let mut changed = false;
        for child in &mut self.children {
            changed |= child.take_reflow();
        }
        changed
    }
}
