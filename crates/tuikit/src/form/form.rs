//! A vertical stack of labelled fields inside a scroll view

use super::component::{FocusDirection, FormComponent};
use crate::buffer::{Buffer, Region};
use crate::config::FormConfig;
use crate::event::{EventResult, Key, KeyType, Modifiers};
use crate::geometry::Rect;
use crate::layout::{Constraint, Grid};
use crate::rich_text::lpad;
use crate::scroll_view::ScrollView;
use std::rc::Rc;
use tracing::debug;

/// A custom form key handler, checked before focus keys
pub type FormBinding = Rc<dyn Fn(&Key, &mut Form)>;

/// One row of a form: an optional label in the left column and a
/// component in the right one
pub struct FormField {
    pub label: Option<String>,
    /// Span both columns and ignore the label
    pub full_width: bool,
    pub component: Box<dyn FormComponent>,
}

impl FormField {
    pub fn new(component: impl FormComponent + 'static) -> Self {
        Self {
            label: None,
            full_width: false,
            component: Box::new(component),
        }
    }

    pub fn labeled(label: impl Into<String>, component: impl FormComponent + 'static) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(component)
        }
    }

    pub fn full_width(component: impl FormComponent + 'static) -> Self {
        Self {
            full_width: true,
            ..Self::new(component)
        }
    }
}

/// Fields stacked top to bottom, with exactly one holding focus
///
/// The form draws into the content of its own scroll view and keeps the
/// focused field in the frame. Tab and Control-Down move focus forward,
/// Shift-Tab and Control-Up move it back. Every other key goes to the
/// focused component.
pub struct Form {
    config: FormConfig,
    view: ScrollView,
    fields: Vec<FormField>,
    focus: usize,
    label_regions: Vec<Rect>,
    regions: Vec<Rect>,
    bindings: Vec<(Key, FormBinding)>,
}

impl Form {
    pub fn new(area: Rect, fields: Vec<FormField>, config: FormConfig) -> Self {
        let mut view = ScrollView::new(area, config.scroll.clone());
        // a form scrolls to follow focus, never to follow its bottom edge
        view.unpin();
        let mut form = Self {
            config,
            view,
            fields,
            focus: 0,
            label_regions: Vec::new(),
            regions: Vec::new(),
            bindings: Vec::new(),
        };
        // when nothing accepts focus, the first field holds it anyway
        if let Some(index) = form.fields.iter().position(|f| f.component.accepts_focus()) {
            form.focus = index;
            form.fields[index].component.take_focus(FocusDirection::Next);
        }
        form.refresh();
        form
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    /// Index of the focused field
    pub fn focused(&self) -> usize {
        self.focus
    }

    /// Where field `index` sits in the form's canvas
    pub fn region(&self, index: usize) -> Option<Rect> {
        self.regions.get(index).copied()
    }

    pub fn scroll_view(&self) -> &ScrollView {
        &self.view
    }

    pub fn scroll_view_mut(&mut self) -> &mut ScrollView {
        &mut self.view
    }

    pub fn add_field(&mut self, field: FormField) {
        self.fields.push(field);
        let index = self.fields.len() - 1;
        let focus_accepts = self
            .fields
            .get(self.focus)
            .is_some_and(|f| index != self.focus && f.component.accepts_focus());
        if !focus_accepts && self.fields[index].component.accepts_focus() {
            self.focus = index;
            self.fields[index].component.take_focus(FocusDirection::Next);
        }
        self.refresh();
    }

    /// Remove a field. When it holds focus, focus goes to the next field
    /// that accepts it, or back to the previous one at the end of the form.
    pub fn remove_field(&mut self, index: usize) -> Option<FormField> {
        if index >= self.fields.len() {
            return None;
        }
        if index != self.focus {
            let field = self.fields.remove(index);
            if self.focus > index {
                self.focus -= 1;
            }
            self.refresh();
            return Some(field);
        }

        let target = self
            .find_accepting(Some(index), FocusDirection::Next)
            .map(|i| (i, FocusDirection::Next))
            .or_else(|| {
                self.find_accepting(Some(index), FocusDirection::Previous)
                    .map(|i| (i, FocusDirection::Previous))
            });
        let direction = target.map_or(FocusDirection::Next, |(_, d)| d);
        let mut field = self.fields.remove(index);
        if field.component.accepts_focus() {
            field.component.lose_focus(direction);
        }
        match target {
            Some((i, direction)) => {
                let i = if i > index { i - 1 } else { i };
                self.focus = i;
                self.fields[i].component.take_focus(direction);
                debug!(focus = i, "form focus moved off a removed field");
            }
            // nothing left accepts focus
            None => self.focus = 0,
        }
        self.refresh();
        Some(field)
    }

    /// Move focus straight to field `index`. Fields that refuse focus are
    /// left alone.
    pub fn focus_field(&mut self, index: usize) -> bool {
        self.move_focus(index, &[])
    }

    /// Move focus straight to a part of field `index`, such as one button in
    /// a row. `path` holds one child index per level of nesting and is
    /// passed to [`FormComponent::focus_path`]. Returns whether the whole
    /// path could be followed.
    pub fn move_focus(&mut self, index: usize, path: &[usize]) -> bool {
        let accepts = self
            .fields
            .get(index)
            .is_some_and(|f| f.component.accepts_focus());
        if !accepts {
            return false;
        }
        if index != self.focus {
            let direction = if index < self.focus {
                FocusDirection::Previous
            } else {
                FocusDirection::Next
            };
            if let Some(f) = self.fields.get_mut(self.focus) {
                f.component.lose_focus(direction);
            }
            self.focus = index;
            self.fields[index].component.take_focus(direction);
            debug!(focus = index, "form focus moved");
        }
        let found = self.fields[index].component.focus_path(path);
        self.refresh();
        found
    }

    pub fn next(&mut self) {
        self.shift_focus(FocusDirection::Next);
        self.refresh();
    }

    pub fn prev(&mut self) {
        self.shift_focus(FocusDirection::Previous);
        self.refresh();
    }

    /// Register a handler for `key`, replacing any earlier one for an
    /// equal key
    pub fn bind(&mut self, key: Key, f: impl Fn(&Key, &mut Form) + 'static) {
        let f: FormBinding = Rc::new(f);
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, f));
    }

    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    pub fn feed(&mut self, key: &Key) -> EventResult {
        let binding = self
            .bindings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, f)| Rc::clone(f));
        if let Some(f) = binding {
            f(key, self);
            self.refresh();
            return EventResult::Consumed;
        }

        let direction = match key.kind {
            KeyType::Tab if key.modifiers.is_empty() => Some(FocusDirection::Next),
            KeyType::Tab if key.modifiers == Modifiers::SHIFT => Some(FocusDirection::Previous),
            KeyType::Up if key.modifiers == Modifiers::CONTROL => Some(FocusDirection::Previous),
            KeyType::Down if key.modifiers == Modifiers::CONTROL => Some(FocusDirection::Next),
            _ => None,
        };
        let result = match direction {
            Some(direction) => {
                self.shift_focus(direction);
                EventResult::Consumed
            }
            None => match self.fields.get_mut(self.focus) {
                Some(field) => field.component.feed(key),
                None => EventResult::Ignored,
            },
        };
        self.refresh();
        result
    }

    /// Apply height changes components asked for since the last call.
    /// Returns whether the form was laid out again.
    pub fn process_pending(&mut self) -> bool {
        let mut changed = false;
        for field in &mut self.fields {
            changed |= field.component.take_reflow();
        }
        if changed {
            debug!("form reflow for component height change");
            self.refresh();
        }
        changed
    }

    pub fn resize(&mut self, area: Rect) {
        self.view.resize(area);
        self.refresh();
    }

    /// Draw the visible part of the form onto the screen
    pub fn draw(&self, screen: &mut Buffer) {
        self.view.draw(screen);
    }

    fn shift_focus(&mut self, direction: FocusDirection) {
        // a component with parts of its own moves inside itself first
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.component.shift_focus(direction) {
                return;
            }
        }
        if !self.fields.iter().any(|f| f.component.accepts_focus()) {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.component.lose_focus(direction);
        }

        // off either end, walk back from that end instead
        let (index, entered) = match self.find_accepting(Some(self.focus), direction) {
            Some(index) => (index, direction),
            None => {
                let back = direction.reverse();
                match self.find_accepting(None, back) {
                    Some(index) => (index, back),
                    None => return,
                }
            }
        };
        self.focus = index;
        self.fields[index].component.take_focus(entered);
        debug!(focus = index, "form focus moved");
    }

    /// First field after `from` in `direction` that accepts focus. With no
    /// starting point the walk starts from the near end.
    fn find_accepting(&self, from: Option<usize>, direction: FocusDirection) -> Option<usize> {
        let len = self.fields.len();
        let mut index = match from {
            Some(from) => direction.step(from, len),
            None => direction.entry(len),
        };
        while let Some(i) = index {
            if self.fields[i].component.accepts_focus() {
                return Some(i);
            }
            index = direction.step(i, len);
        }
        None
    }

    fn refresh(&mut self) {
        self.layout();
        self.render();
        self.ensure_focus();
    }

    /// Size the canvas to every field's height and place each field
    fn layout(&mut self) {
        let width = self.view.content().width();
        let padding = self.config.vertical_padding;
        let label_cols = self.config.label_width.min(width);
        let content_cols = width - label_cols;

        let mut heights = Vec::with_capacity(self.fields.len());
        for field in &mut self.fields {
            let cols = if field.full_width { width } else { content_cols };
            let height = field.component.compute_height(cols);
            // a label takes a line even next to an empty component
            let labeled = !field.full_width && field.label.is_some();
            heights.push(height.max(u16::from(labeled)));
        }

        let mut rows = vec![Constraint::Fixed(padding)];
        rows.extend(heights.iter().map(|h| Constraint::Fixed(h.saturating_add(padding))));
        let total = rows
            .iter()
            .map(|r| r.minimum() as u32)
            .sum::<u32>()
            .min(u16::MAX as u32) as u16;
        self.view.resize_content(total);

        let grid = Grid::new(
            Rect::sized(width, total),
            vec![Constraint::Fixed(label_cols), Constraint::Fill(1)],
            rows,
        );
        self.label_regions.clear();
        self.regions.clear();
        for (i, (field, height)) in self.fields.iter_mut().zip(heights).enumerate() {
            let row = i + 1;
            let area = if field.full_width {
                grid.span(0, row, 2, row + 1)
            } else {
                grid.cell(1, row)
            };
            let area = area.with_height(height);
            field.component.attach(area);
            self.label_regions.push(grid.cell(0, row).with_height(1));
            self.regions.push(area);
        }
    }

    fn render(&mut self) {
        let label_width = self
            .config
            .label_width
            .saturating_sub(self.config.label_spacing) as usize;
        let palette = &self.config.palette;
        let canvas = self.view.content_mut();
        canvas.hide_cursor();
        Region::all(canvas).set_style(palette.blank()).clear();

        for (i, field) in self.fields.iter().enumerate() {
            let Some(label) = field.label.as_deref().filter(|_| !field.full_width) else {
                continue;
            };
            let area = self.label_regions[i];
            let style = self.config.label_style(i == self.focus);
            Region::new(canvas, area)
                .set_style(style)
                .clear()
                .at(0, 0)
                .write(&lpad(&fit_label(label, label_width), label_width));
        }

        // the focused field last, so anything it draws outside its own
        // area (an open selector) ends up on top
        for (i, field) in self.fields.iter_mut().enumerate() {
            if i != self.focus {
                field.component.draw(canvas, palette);
            }
        }
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.component.draw(canvas, palette);
        }
    }

    fn ensure_focus(&mut self) {
        if let Some(area) = self.regions.get(self.focus) {
            self.view.reveal(area.y as usize, area.bottom() as usize);
        }
    }
}

/// Cut a label to `width` columns, marking the cut with an ellipsis
fn fit_label(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return label.to_string();
    }
    let mut fitted: String = label.chars().take(width.saturating_sub(1)).collect();
    if width > 0 {
        fitted.push('\u{2026}');
    }
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Palette;
    use crate::form::{FormButton, FormText};
    use std::cell::RefCell;

    /// A one-line component that records what happened to it
    struct Recorder {
        name: &'static str,
        accepts: bool,
        height: u16,
        area: Rect,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &'static str, accepts: bool, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name,
                accepts,
                height: 1,
                area: Rect::default(),
                log: Rc::clone(log),
            }
        }
    }

    impl FormComponent for Recorder {
        fn accepts_focus(&self) -> bool {
            self.accepts
        }

        fn compute_height(&mut self, _width: u16) -> u16 {
            self.height
        }

        fn attach(&mut self, area: Rect) {
            self.area = area;
        }

        fn draw(&mut self, canvas: &mut Buffer, palette: &Palette) {
            Region::new(canvas, self.area)
                .set_style(palette.normal())
                .write(self.name);
        }

        fn take_focus(&mut self, direction: FocusDirection) {
            self.log.borrow_mut().push(format!("take {} {:?}", self.name, direction));
        }

        fn lose_focus(&mut self, _direction: FocusDirection) {
            self.log.borrow_mut().push(format!("lose {}", self.name));
        }

        fn feed(&mut self, key: &Key) -> EventResult {
            self.log.borrow_mut().push(format!("feed {} {:?}", self.name, key.ch));
            EventResult::Consumed
        }
    }

    fn screen_rows(form: &Form) -> Vec<String> {
        let frame = form.scroll_view().frame();
        let mut screen = Buffer::new(frame);
        form.draw(&mut screen);
        (frame.y..frame.bottom())
            .map(|y| screen.row_text(y).trim_end().to_string())
            .collect()
    }

    #[test]
    fn test_focus_visits_accepting_fields_and_bounces() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let fields = vec![
            FormField::new(Recorder::new("a", false, &log)),
            FormField::new(Recorder::new("b", true, &log)),
            FormField::new(Recorder::new("c", false, &log)),
            FormField::new(Recorder::new("d", true, &log)),
        ];
        let mut form = Form::new(Rect::sized(40, 10), fields, FormConfig::default());
        assert_eq!(form.focused(), 1);

        let mut visited = vec![form.focused()];
        for _ in 0..3 {
            form.next();
            visited.push(form.focused());
        }
        assert_eq!(visited, [1, 3, 3, 3]);
        assert_eq!(
            log.borrow()[..4],
            ["take b Next", "lose b", "take d Next", "lose d"]
        );
        // bouncing off the end enters the last field again from behind
        assert_eq!(log.borrow()[4], "take d Previous");

        form.prev();
        assert_eq!(form.focused(), 1);
        form.prev();
        assert_eq!(form.focused(), 1);
    }

    #[test]
    fn test_nothing_focusable() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let fields = vec![
            FormField::new(Recorder::new("a", false, &log)),
            FormField::new(Recorder::new("b", false, &log)),
        ];
        let mut form = Form::new(Rect::sized(40, 10), fields, FormConfig::default());
        assert_eq!(form.focused(), 0);
        form.next();
        form.prev();
        assert_eq!(form.focused(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_keys_route_to_focus_or_move_it() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let fields = vec![
            FormField::new(Recorder::new("a", true, &log)),
            FormField::new(Recorder::new("b", true, &log)),
        ];
        let mut form = Form::new(Rect::sized(40, 10), fields, FormConfig::default());
        assert!(form.feed(&Key::normal('x')).is_consumed());
        form.feed(&Key::new(KeyType::Tab));
        assert_eq!(form.focused(), 1);
        form.feed(&Key::new(KeyType::Tab).with_modifiers(Modifiers::SHIFT));
        assert_eq!(form.focused(), 0);
        form.feed(&Key::new(KeyType::Down).with_modifiers(Modifiers::CONTROL));
        assert_eq!(form.focused(), 1);
        form.feed(&Key::new(KeyType::Up).with_modifiers(Modifiers::CONTROL));
        assert_eq!(form.focused(), 0);
        assert_eq!(log.borrow()[1], "feed a Some('x')");
        assert!(!log.borrow().iter().any(|l| l.starts_with("feed b")));
    }

    #[test]
    fn test_custom_binding_wins() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let fields = vec![
            FormField::new(Recorder::new("a", true, &log)),
            FormField::new(Recorder::new("b", true, &log)),
        ];
        let mut form = Form::new(Rect::sized(40, 10), fields, FormConfig::default());
        form.bind(Key::new(KeyType::Tab), |_, form| form.prev());
        form.bind(Key::new(KeyType::Tab), |_, form| {
            form.focus_field(1);
        });
        form.feed(&Key::new(KeyType::Tab));
        assert_eq!(form.focused(), 1);
        form.clear_bindings();
        form.feed(&Key::new(KeyType::Tab));
        assert_eq!(form.focused(), 1);
    }

    #[test]
    fn test_labels_and_layout() {
        let config = FormConfig {
            label_width: 8,
            ..FormConfig::default()
        };
        let fields = vec![
            FormField::labeled("Name", FormText::plain("hello")),
            FormField::labeled("Very long label", FormText::plain("there")),
            FormField::full_width(FormText::plain("wide text")),
        ];
        let form = Form::new(Rect::sized(30, 10), fields, config);
        assert_eq!(form.region(0), Some(Rect::new(8, 1, 21, 1)));
        assert_eq!(form.region(2), Some(Rect::new(0, 5, 29, 1)));
        assert_eq!(form.scroll_view().content_rows(), 7);
        let rows = screen_rows(&form);
        assert_eq!(&rows[..6], ["", "   Name hello", "", "Very l… there", "", "wide text"]);
    }

    #[test]
    fn test_focus_scrolls_into_view() {
        let clicks = Rc::new(RefCell::new(0));
        let fields: Vec<FormField> = (0..6)
            .map(|i| {
                let clicks = Rc::clone(&clicks);
                FormField::labeled(
                    format!("button {i}"),
                    FormButton::new("Go", move || *clicks.borrow_mut() += 1),
                )
            })
            .collect();
        let mut form = Form::new(Rect::sized(40, 5), fields, FormConfig::default());
        assert_eq!(form.scroll_view().content_rows(), 13);
        assert_eq!(form.scroll_view().frame_top(), 0);
        for _ in 0..3 {
            form.next();
        }
        // field 3 covers rows 7..8
        assert_eq!(form.scroll_view().frame_top(), 3);
        let mut screen = Buffer::sized(40, 5);
        form.draw(&mut screen);
        assert_eq!(screen.cursor().map(|p| p.y), Some(4));

        form.feed(&Key::new(KeyType::Return));
        assert_eq!(*clicks.borrow(), 1);
        form.focus_field(0);
        assert_eq!(form.scroll_view().frame_top(), 1);
    }

    #[test]
    fn test_remove_focused_field_moves_focus_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let fields = vec![
            FormField::new(Recorder::new("a", true, &log)),
            FormField::new(Recorder::new("b", false, &log)),
            FormField::new(Recorder::new("c", true, &log)),
        ];
        let mut form = Form::new(Rect::sized(40, 10), fields, FormConfig::default());
        let removed = form.remove_field(0);
        assert!(removed.is_some());
        assert_eq!(form.fields().len(), 2);
        assert_eq!(form.focused(), 1);
        assert_eq!(log.borrow()[..3], ["take a Next", "lose a", "take c Next"]);

        form.remove_field(1);
        assert_eq!(form.focused(), 0);
        assert!(form.remove_field(5).is_none());

        form.add_field(FormField::new(Recorder::new("e", true, &log)));
        assert_eq!(form.focused(), 1);
        assert_eq!(log.borrow().last().map(String::as_str), Some("take e Next"));
    }

    #[test]
    fn test_remove_focused_last_field_goes_back() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let fields = vec![
            FormField::new(Recorder::new("a", true, &log)),
            FormField::new(Recorder::new("b", true, &log)),
            FormField::new(Recorder::new("c", true, &log)),
        ];
        let mut form = Form::new(Rect::sized(40, 10), fields, FormConfig::default());
        assert!(form.focus_field(2));
        form.remove_field(2);
        assert_eq!(form.focused(), 1);
        assert_eq!(
            log.borrow()[log.borrow().len() - 2..],
            ["lose c", "take b Previous"]
        );

        // removing a field before the focus keeps the same field focused
        form.remove_field(0);
        assert_eq!(form.focused(), 0);
        assert_eq!(log.borrow().last().map(String::as_str), Some("take b Previous"));
    }

    #[test]
    fn test_move_focus_into_a_row() {
        use crate::form::{FormButtons, FormRow};
        let retried = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&retried);
        let row = FormRow::new(Vec::new())
            .push(FormButton::new("Abort", || {}))
            .push(
                FormButtons::new()
                    .button("Retry", move || *seen.borrow_mut() += 1)
                    .button("Fail", || {}),
            );
        let fields = vec![
            FormField::new(FormButton::new("Top", || {})),
            FormField::new(row),
        ];
        let mut form = Form::new(Rect::sized(40, 10), fields, FormConfig::default());
        assert_eq!(form.focused(), 0);

        assert!(form.move_focus(1, &[1, 0]));
        assert_eq!(form.focused(), 1);
        form.feed(&Key::new(KeyType::Return));
        assert_eq!(*retried.borrow(), 1);

        // a path that goes nowhere still focuses the field
        assert!(!form.move_focus(0, &[3]));
        assert_eq!(form.focused(), 0);
        assert!(!form.move_focus(5, &[]));
    }

    #[test]
    fn test_fit_label() {
        assert_eq!(fit_label("Name", 8), "Name");
        assert_eq!(fit_label("Very long label", 7), "Very l\u{2026}");
        assert_eq!(fit_label("x", 0), "");
    }
}
