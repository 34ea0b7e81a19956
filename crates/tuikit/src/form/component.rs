//! The protocol between a form and the components in its fields

use crate::buffer::Buffer;
use crate::config::Palette;
use crate::event::{EventResult, Key};
use crate::geometry::Rect;
use crate::layout::Constraint;

/// Which way focus is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Forward in tab order
    Next,
    /// Backward in tab order
    Previous,
}

impl FocusDirection {
    pub fn reverse(self) -> Self {
        match self {
            FocusDirection::Next => FocusDirection::Previous,
            FocusDirection::Previous => FocusDirection::Next,
        }
    }

    /// The index one step from `index`, if it is inside `0..len`
    pub(crate) fn step(self, index: usize, len: usize) -> Option<usize> {
        let next = match self {
            FocusDirection::Next => index.checked_add(1),
            FocusDirection::Previous => index.checked_sub(1),
        };
        next.filter(|&i| i < len)
    }

    /// Where a walk in this direction starts when entering a list of `len`
    pub(crate) fn entry(self, len: usize) -> Option<usize> {
        match self {
            _ if len == 0 => None,
            FocusDirection::Next => Some(0),
            FocusDirection::Previous => Some(len - 1),
        }
    }
}

/// Anything that can sit in a form field
///
/// A form lays its components out top to bottom. Each one is asked how
/// tall it is for a width, given an area in the form's canvas, and drawn
/// into that canvas. Focus moves between components, and a component with
/// parts of its own (a row of buttons) may keep focus while it moves
/// between them.
///
/// Every capability has a default so passive components implement only
/// drawing.
pub trait FormComponent {
    /// Whether focus may land here
    fn accepts_focus(&self) -> bool {
        true
    }

    /// Width this component wants when laid out beside others
    fn constraint(&self) -> Constraint {
        Constraint::Fill(1)
    }

    /// Rows needed at `width` columns
    fn compute_height(&mut self, width: u16) -> u16;

    /// Place the component in the canvas. Called again on every reflow.
    fn attach(&mut self, area: Rect);

    /// Draw into the form's canvas. A focused component also places the
    /// canvas cursor.
    fn draw(&mut self, canvas: &mut Buffer, palette: &Palette);

    fn take_focus(&mut self, _direction: FocusDirection) {}

    fn lose_focus(&mut self, _direction: FocusDirection) {}

    fn feed(&mut self, _key: &Key) -> EventResult {
        EventResult::Ignored
    }

    /// Move focus inside the component. Returns `true` if focus stays here,
    /// either because it moved to another part or because the component
    /// refuses to let go.
    fn shift_focus(&mut self, _direction: FocusDirection) -> bool {
        false
    }

    /// Focus a nested part directly, one index per level of nesting. Called
    /// on a component that already holds focus. Returns `false` when there
    /// is no such part; an empty path always succeeds.
    fn focus_path(&mut self, path: &[usize]) -> bool {
        path.is_empty()
    }

    /// Whether the current contents are acceptable for leaving
    fn allow_blur(&self) -> bool {
        true
    }

    /// Consume a pending change of height. The form reflows when any
    /// component reports one.
    fn take_reflow(&mut self) -> bool {
        false
    }
}
