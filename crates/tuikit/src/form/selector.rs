use super::button::is_activate;
use super::component::{FocusDirection, FormComponent};
use crate::buffer::{Buffer, Region};
use crate::config::Palette;
use crate::event::{EventResult, Key, KeyType};
use crate::geometry::Rect;
use crate::layout::Constraint;
use crate::rich_text::RichText;
use std::collections::HashMap;
use tracing::trace;

const CHECK: &str = "\u{2713}";
const MORE: &str = "\u{2026}";
const FOCUS_LEFT: &str = "\u{25b6}";
const FOCUS_RIGHT: &str = "\u{25c0}";

pub type SelectionCallback = Box<dyn FnMut(&[usize])>;

/// A list of choices shown one at a time. Return or space opens the whole
/// list over the form; Up and Down move through it, space selects, Return
/// picks and closes, Escape closes.
///
/// A single-select list holds exactly one choice. A multi-select list
/// toggles choices with space and marks each selected one with a check.
///
/// Choices may carry ids, which callers use instead of positions to tell
/// which ones are selected.
pub struct FormSelector {
    choices: Vec<RichText>,
    ids: Vec<String>,
    selected: Vec<usize>,
    multi_select: bool,
    width: Option<u16>,
    hpad: u16,
    /// Choice shown when closed, or under the cursor when open
    display: usize,
    active: bool,
    /// Canvas row of choice 0 while open
    y_offset: isize,
    focused: bool,
    /// Set when new choices change the width
    resized: bool,
    area: Rect,
    on_change: Option<SelectionCallback>,
    on_blur: Option<SelectionCallback>,
}

impl FormSelector {
    pub fn new<S: Into<RichText>>(choices: impl IntoIterator<Item = S>) -> Self {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            ids: Vec::new(),
            selected: Vec::new(),
            multi_select: false,
            width: None,
            hpad: 1,
            display: 0,
            active: false,
            y_offset: 0,
            focused: false,
            resized: false,
            area: Rect::default(),
            on_change: None,
            on_blur: None,
        }
    }

    /// Choices as `(id, label)` pairs
    pub fn with_ids<I, S>(choices: impl IntoIterator<Item = (I, S)>) -> Self
    where
        I: Into<String>,
        S: Into<RichText>,
    {
        let mut selector = Self::new(Vec::<RichText>::new());
        selector.set_choices_with_ids(choices, &[]);
        selector.resized = false;
        selector
    }

    pub fn multi_select(mut self, multi_select: bool) -> Self {
        self.multi_select = multi_select;
        self
    }

    /// Start with these choices selected. Out-of-range indices are dropped.
    pub fn selected(mut self, selected: impl IntoIterator<Item = usize>) -> Self {
        self.select_only(selected);
        self
    }

    /// Start with the choices carrying these ids selected. Unknown ids are
    /// dropped.
    pub fn select_ids(mut self, ids: &[&str]) -> Self {
        let selected = self.positions(ids);
        self.select_only(selected);
        self
    }

    /// Text width, instead of the longest choice
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&[usize]) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_blur(mut self, f: impl FnMut(&[usize]) + 'static) -> Self {
        self.on_blur = Some(Box::new(f));
        self
    }

    pub fn choices(&self) -> &[RichText] {
        &self.choices
    }

    /// Replace the choices and the selection. Any ids are dropped. The list
    /// closes and shows the first selected choice.
    pub fn set_choices<S: Into<RichText>>(
        &mut self,
        choices: impl IntoIterator<Item = S>,
        selected: &[usize],
    ) {
        let width = self.total_width();
        self.choices = choices.into_iter().map(Into::into).collect();
        self.ids.clear();
        self.active = false;
        self.select_only(selected.iter().copied());
        self.resized |= self.total_width() != width;
        trace!(choices = self.choices.len(), "selector choices replaced");
    }

    /// Replace the choices with `(id, label)` pairs, selecting by id
    pub fn set_choices_with_ids<I, S>(
        &mut self,
        choices: impl IntoIterator<Item = (I, S)>,
        selected: &[&str],
    ) where
        I: Into<String>,
        S: Into<RichText>,
    {
        let (ids, labels): (Vec<String>, Vec<RichText>) = choices
            .into_iter()
            .map(|(id, label)| (id.into(), label.into()))
            .unzip();
        self.set_choices(labels, &[]);
        self.ids = ids;
        let selected = self.positions(selected);
        self.select_only(selected);
    }

    /// Ids of the selected choices, in choice order. Empty when the choices
    /// carry no ids.
    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected
            .iter()
            .filter_map(|&i| self.ids.get(i))
            .map(String::as_str)
            .collect()
    }

    /// Show choice `index` without selecting it. Clamped to the last choice.
    pub fn set_display(&mut self, index: usize) {
        self.display = index.min(self.choices.len().saturating_sub(1));
    }

    pub fn selection(&self) -> &[usize] {
        &self.selected
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn display(&self) -> usize {
        self.display
    }

    fn select_only(&mut self, selected: impl IntoIterator<Item = usize>) {
        let len = self.choices.len();
        self.selected = selected.into_iter().filter(|&i| i < len).collect();
        self.selected.sort_unstable();
        self.selected.dedup();
        if !self.multi_select {
            self.selected.truncate(1);
        }
        self.display = self.first_selected();
    }

    fn positions(&self, ids: &[&str]) -> Vec<usize> {
        ids.iter()
            .filter_map(|s| self.ids.iter().position(|id| id == s))
            .collect()
    }

    fn first_selected(&self) -> usize {
        self.selected.first().copied().unwrap_or(0)
    }

    fn text_width(&self) -> u16 {
        let longest = self.choices.iter().map(RichText::len).max().unwrap_or(0);
        self.width
            .unwrap_or(longest.min(u16::MAX as usize) as u16)
    }

    /// Text plus padding, the check column and both focus badges
    fn total_width(&self) -> u16 {
        self.text_width()
            .saturating_add(self.hpad * 2)
            .saturating_add(3)
    }

    fn open(&mut self) {
        self.active = true;
        self.y_offset = self.area.y as isize - self.display as isize;
        trace!(display = self.display, "selector opened");
    }

    fn close(&mut self) {
        self.active = false;
        self.display = self.first_selected();
    }

    fn select(&mut self, index: usize) {
        if self.multi_select {
            match self.selected.binary_search(&index) {
                Ok(at) => {
                    self.selected.remove(at);
                }
                Err(at) => self.selected.insert(at, index),
            }
        } else {
            self.selected = vec![index];
        }
        if let Some(f) = self.on_change.as_mut() {
            f(&self.selected);
        }
    }

    /// Draw one choice on canvas row `y`. `region` spans this selector's
    /// columns and the whole canvas height.
    fn draw_choice(
        &self,
        region: &mut Region<'_>,
        index: usize,
        y: u16,
        highlight: bool,
        palette: &Palette,
    ) {
        let Some(choice) = self.choices.get(index) else {
            return;
        };
        let style = if highlight {
            palette.focus()
        } else if self.active {
            palette.badge(true)
        } else {
            palette.normal()
        };
        let rows = region.rows();
        let width = region.cols();
        if width < 3 {
            return;
        }
        region
            .set_style(style)
            .at(0, y)
            .write(&" ".repeat(width as usize));
        if highlight {
            region.move_cursor(1, y);
        }

        let is_selected = self.selected.binary_search(&index).is_ok();
        let show_check = if self.active {
            y > 0 && y + 1 < rows
        } else {
            self.multi_select
        };
        region.at(1, y);
        if is_selected && show_check {
            region.write(CHECK);
        } else {
            region.move_by(1, 0);
        }
        region.move_by(self.hpad as i32, 0);

        let more_above = self.active && y == 0 && index > 0;
        let more_below = self.active && y + 1 == rows && index + 1 < self.choices.len();
        let room = width.saturating_sub(self.hpad * 2 + 3).min(self.text_width());
        if more_above || more_below {
            region.write(MORE);
        } else {
            choice
                .slice(0, room as usize)
                .render(region, &HashMap::new(), None);
        }

        if highlight {
            region
                .set_style(palette.badge(true))
                .at(0, y)
                .write(FOCUS_LEFT)
                .at(width - 1, y)
                .write(FOCUS_RIGHT);
        }
    }
}

impl FormComponent for FormSelector {
    fn accepts_focus(&self) -> bool {
        !self.choices.is_empty()
    }

    fn constraint(&self) -> Constraint {
        Constraint::Fixed(self.total_width())
    }

    fn compute_height(&mut self, _width: u16) -> u16 {
        1
    }

    fn attach(&mut self, area: Rect) {
        self.area = area;
    }

    fn draw(&mut self, canvas: &mut Buffer, palette: &Palette) {
        let rows = canvas.height();
        let columns = Rect::new(self.area.x, 0, self.total_width(), rows);
        if !self.active {
            let mut region = Region::new(canvas, columns);
            self.draw_choice(&mut region, self.display, self.area.y, self.focused, palette);
            return;
        }

        // keep the cursor row off the edges so the overflow markers show
        let rows_i = rows as isize;
        let display = self.display as isize;
        if self.y_offset + display <= 0 {
            self.y_offset = 1 - display;
        }
        if self.y_offset + display >= rows_i - 1 {
            self.y_offset = rows_i - 2 - display;
        }
        let mut region = Region::new(canvas, columns);
        for index in 0..self.choices.len() {
            let y = self.y_offset + index as isize;
            if y < 0 {
                continue;
            }
            if y >= rows_i {
                break;
            }
            let highlight = index == self.display;
            self.draw_choice(&mut region, index, y as u16, highlight, palette);
        }
    }

    fn take_focus(&mut self, _direction: FocusDirection) {
        self.focused = true;
    }

    fn take_reflow(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }

    fn lose_focus(&mut self, _direction: FocusDirection) {
        self.focused = false;
        self.close();
        if let Some(f) = self.on_blur.as_mut() {
            f(&self.selected);
        }
    }

    fn feed(&mut self, key: &Key) -> EventResult {
        if !self.active {
            if is_activate(key) {
                self.open();
                return EventResult::Consumed;
            }
            return EventResult::Ignored;
        }
        if !key.is_plain() {
            return EventResult::Ignored;
        }
        match key.kind {
            KeyType::Up => self.display = self.display.saturating_sub(1),
            KeyType::Down => {
                self.display = (self.display + 1).min(self.choices.len().saturating_sub(1))
            }
            KeyType::Normal if key.ch == Some(' ') => self.select(self.display),
            KeyType::Return => {
                if !self.multi_select {
                    self.select(self.display);
                }
                self.close();
            }
            KeyType::Escape => self.close(),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rows_of(canvas: &Buffer) -> Vec<String> {
        (0..canvas.height())
            .map(|y| canvas.row_text(y).trim_end().to_string())
            .collect()
    }

    fn key(kind: KeyType) -> Key {
        Key::new(kind)
    }

    #[test]
    fn test_closed_shows_selection() {
        let mut selector = FormSelector::new(["apple", "banana", "cherry"]).selected([1]);
        assert_eq!(selector.constraint(), Constraint::Fixed(11));
        selector.attach(Rect::new(0, 1, 11, 1));
        let mut canvas = Buffer::sized(12, 3);
        selector.draw(&mut canvas, &Palette::default());
        assert_eq!(rows_of(&canvas), ["", "   banana", ""]);

        selector.take_focus(FocusDirection::Next);
        selector.draw(&mut canvas, &Palette::default());
        assert_eq!(rows_of(&canvas)[1], "\u{25b6}  banana \u{25c0}");
        assert_eq!(canvas.cursor().map(|p| (p.x, p.y)), Some((1, 1)));
    }

    #[test]
    fn test_pick_one() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&changes);
        let mut selector = FormSelector::new(["apple", "banana", "cherry"])
            .on_change(move |s| seen.borrow_mut().push(s.to_vec()));
        selector.attach(Rect::new(0, 2, 11, 1));
        selector.take_focus(FocusDirection::Next);

        assert!(!selector.feed(&key(KeyType::Down)).is_consumed());
        assert!(selector.feed(&key(KeyType::Return)).is_consumed());
        assert!(selector.is_active());

        let mut canvas = Buffer::sized(12, 6);
        selector.draw(&mut canvas, &Palette::default());
        let rows = rows_of(&canvas);
        assert_eq!(rows[2], "\u{25b6}  apple  \u{25c0}");
        assert_eq!(rows[3], "   banana");
        assert_eq!(rows[4], "   cherry");

        selector.feed(&key(KeyType::Down));
        selector.feed(&key(KeyType::Down));
        selector.feed(&key(KeyType::Down));
        assert_eq!(selector.display(), 2);
        selector.feed(&key(KeyType::Return));
        assert!(!selector.is_active());
        assert_eq!(selector.selection(), [2]);
        assert_eq!(*changes.borrow(), [vec![2]]);

        selector.feed(&Key::normal(' '));
        selector.feed(&key(KeyType::Up));
        selector.feed(&key(KeyType::Escape));
        assert!(!selector.is_active());
        assert_eq!(selector.display(), 2);
        assert_eq!(selector.selection(), [2]);
    }

    #[test]
    fn test_multi_select_toggles() {
        let mut selector = FormSelector::new(["red", "green", "blue"])
            .multi_select(true)
            .selected([0]);
        selector.attach(Rect::new(0, 0, 10, 1));
        selector.take_focus(FocusDirection::Next);
        selector.feed(&key(KeyType::Return));
        selector.feed(&Key::normal(' '));
        selector.feed(&key(KeyType::Down));
        selector.feed(&key(KeyType::Down));
        selector.feed(&Key::normal(' '));
        selector.feed(&key(KeyType::Return));
        assert_eq!(selector.selection(), [2]);
        assert_eq!(selector.display(), 2);

        let mut canvas = Buffer::sized(12, 1);
        selector.lose_focus(FocusDirection::Next);
        selector.draw(&mut canvas, &Palette::default());
        assert_eq!(rows_of(&canvas), [" \u{2713} blue"]);
    }

    #[test]
    fn test_choices_with_ids() {
        let sizes = [("s", "small"), ("m", "medium"), ("l", "large")];
        let mut selector = FormSelector::with_ids(sizes)
            .multi_select(true)
            .select_ids(&["l", "xl", "s"]);
        assert_eq!(selector.selection(), [0, 2]);
        assert_eq!(selector.selected_ids(), ["s", "l"]);
        assert_eq!(selector.display(), 0);
        assert!(!selector.take_reflow());

        selector.set_choices_with_ids([("m", "medium"), ("xxl", "extra large")], &["xxl"]);
        assert_eq!(selector.selection(), [1]);
        assert_eq!(selector.selected_ids(), ["xxl"]);
        assert_eq!(selector.display(), 1);
        assert!(selector.take_reflow());
        assert!(!selector.take_reflow());

        // plain choices carry no ids
        selector.set_choices(["one", "two"], &[0]);
        assert_eq!(selector.selection(), [0]);
        assert!(selector.selected_ids().is_empty());
    }

    #[test]
    fn test_set_choices_resets_selection_and_display() {
        let mut selector = FormSelector::new(["apple", "banana", "cherry"]).selected([2]);
        selector.attach(Rect::new(0, 0, 11, 1));
        selector.take_focus(FocusDirection::Next);
        selector.feed(&key(KeyType::Return));
        assert!(selector.is_active());

        selector.set_choices(["fig", "kiwi"], &[5]);
        assert!(!selector.is_active());
        assert!(selector.selection().is_empty());
        assert_eq!(selector.display(), 0);
        // narrower choices shrink the field
        assert_eq!(selector.constraint(), Constraint::Fixed(9));
        assert!(selector.take_reflow());

        selector.set_display(7);
        assert_eq!(selector.display(), 1);
        let mut canvas = Buffer::sized(10, 1);
        selector.lose_focus(FocusDirection::Next);
        selector.set_display(1);
        selector.draw(&mut canvas, &Palette::default());
        assert_eq!(rows_of(&canvas), ["   kiwi"]);
        assert!(selector.selection().is_empty());
    }

    #[test]
    fn test_colored_choices_are_measured_without_markup() {
        let choices = [RichText::parse("{f00:red}", "default"), RichText::from("green")];
        let mut selector = FormSelector::new(choices);
        assert_eq!(selector.constraint(), Constraint::Fixed(10));
        selector.attach(Rect::new(0, 0, 10, 1));
        let mut canvas = Buffer::sized(10, 1);
        selector.draw(&mut canvas, &Palette::default());
        assert_eq!(rows_of(&canvas), ["   red"]);
        assert_eq!(
            canvas.get(3, 0).map(|c| c.fg),
            Some(crate::style::Color::Rgb(0xff, 0, 0))
        );
    }

    #[test]
    fn test_open_list_scrolls_near_the_edges() {
        let choices: Vec<String> = (0..10).map(|i| format!("item {i}")).collect();
        let mut selector = FormSelector::new(choices);
        selector.attach(Rect::new(0, 0, 11, 1));
        selector.take_focus(FocusDirection::Next);
        selector.feed(&key(KeyType::Return));

        // the cursor row is pushed down off the top edge
        let mut canvas = Buffer::sized(12, 5);
        selector.draw(&mut canvas, &Palette::default());
        assert_eq!(
            rows_of(&canvas),
            ["", "\u{25b6}  item 0 \u{25c0}", "   item 1", "   item 2", "   \u{2026}"]
        );

        for _ in 0..5 {
            selector.feed(&key(KeyType::Down));
        }
        selector.draw(&mut canvas, &Palette::default());
        assert_eq!(
            rows_of(&canvas),
            ["   \u{2026}", "   item 3", "   item 4", "\u{25b6}  item 5 \u{25c0}", "   \u{2026}"]
        );
        assert_eq!(canvas.cursor().map(|p| p.y), Some(3));
    }
}
