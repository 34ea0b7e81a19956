use super::component::{FocusDirection, FormComponent};
use crate::buffer::Buffer;
use crate::config::{EditBoxConfig, FormEditBoxConfig, Palette};
use crate::edit::EditBox;
use crate::event::{EventResult, Key, KeyType};
use crate::geometry::Rect;
use crate::layout::Constraint;
use tracing::debug;

/// Decides whether the text may be left as it is
pub type BlurCheck = Box<dyn Fn(&str) -> bool>;

pub type TextCallback = Box<dyn FnMut(&str)>;

/// An [`EditBox`] in a form field
///
/// The box grows between its minimum and maximum height as the text
/// wraps. Growth is requested when the text changes and granted on the
/// form's next [`process_pending`](crate::form::Form::process_pending).
///
/// With a blur check installed, focus will not leave while the text fails
/// it. A showing completion is accepted first in case that fixes the text;
/// otherwise the box turns the error color until the next key.
pub struct FormEditBox {
    config: FormEditBoxConfig,
    edit: EditBox,
    height: u16,
    pending_height: Option<u16>,
    focused: bool,
    is_error: bool,
    allow_blur: Option<BlurCheck>,
    on_change: Option<TextCallback>,
    on_blur: Option<TextCallback>,
}

impl FormEditBox {
    pub fn new(text: &str, config: FormEditBoxConfig) -> Self {
        let config = config.clamped();
        let edit_config = EditBoxConfig {
            max_length: config.max_length as usize,
            allow_scroll: true,
            use_history: false,
            enter_action: config.enter_action,
            word_wrap: config.word_wrap,
            visible_linefeed: config.visible_linefeed,
            focused: false,
            ..EditBoxConfig::default()
        };
        let mut edit = EditBox::new(edit_config);
        if !text.is_empty() {
            edit.insert(text);
        }
        // the request made before the box had any width means nothing
        edit.take_height_request();
        Self {
            height: config.min_height,
            config,
            edit,
            pending_height: None,
            focused: false,
            is_error: false,
            allow_blur: None,
            on_change: None,
            on_blur: None,
        }
    }

    /// Refuse to lose focus while `check` rejects the text
    pub fn allow_blur_if(mut self, check: impl Fn(&str) -> bool + 'static) -> Self {
        self.allow_blur = Some(Box::new(check));
        self
    }

    /// Called with the text after every key, and on blur
    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_blur(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_blur = Some(Box::new(f));
        self
    }

    pub fn auto_complete(mut self, f: impl Fn(&str) -> Option<Vec<String>> + 'static) -> Self {
        self.edit.set_auto_complete(f);
        self
    }

    pub fn text(&self) -> String {
        self.edit.text()
    }

    pub fn set_text(&mut self, text: &str) {
        self.edit.set_text(text);
        self.collect_height_request();
    }

    pub fn edit_box(&self) -> &EditBox {
        &self.edit
    }

    pub fn edit_box_mut(&mut self) -> &mut EditBox {
        &mut self.edit
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Whether the last attempt to leave was refused
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    fn passes(&self) -> bool {
        match &self.allow_blur {
            Some(check) => check(&self.edit.text()),
            None => true,
        }
    }

    fn collect_height_request(&mut self) {
        if let Some(lines) = self.edit.take_height_request() {
            let lines = lines.min(u16::MAX as usize) as u16;
            let height = lines.clamp(self.config.min_height, self.config.max_height);
            // last request wins; asking for the current height cancels
            self.pending_height = (height != self.height).then_some(height);
        }
    }

    fn changed(&mut self) {
        if let Some(f) = self.on_change.as_mut() {
            f(&self.edit.text());
        }
    }
}

impl FormComponent for FormEditBox {
    fn constraint(&self) -> Constraint {
        Constraint::range(1, self.config.min_width, self.config.max_length)
    }

    fn compute_height(&mut self, _width: u16) -> u16 {
        self.height
    }

    fn attach(&mut self, area: Rect) {
        let area = Rect::new(
            area.x,
            area.y,
            area.width.min(self.config.max_length),
            self.height,
        );
        // reattaching resets the scroll position, so only on a real move
        if area != self.edit.area() {
            self.edit.attach(area);
            self.collect_height_request();
        }
    }

    fn draw(&mut self, canvas: &mut Buffer, palette: &Palette) {
        let style = if self.is_error {
            palette.error()
        } else if self.focused {
            palette.focus()
        } else {
            palette.normal()
        };
        self.edit.set_style(style);
        self.edit.set_suggestion_color(palette.suggestion());
        self.edit.draw(canvas);
    }

    fn take_focus(&mut self, _direction: FocusDirection) {
        self.focused = true;
        self.edit.set_focused(true);
    }

    fn lose_focus(&mut self, _direction: FocusDirection) {
        self.focused = false;
        self.edit.set_focused(false);
        self.edit.clear_suggestions();
        self.changed();
        if let Some(f) = self.on_blur.as_mut() {
            f(&self.edit.text());
        }
    }

    fn feed(&mut self, key: &Key) -> EventResult {
        self.is_error = false;
        let result = self.edit.feed(key);
        if self.config.always_suggest {
            self.edit.check_for_suggestions();
        }
        self.collect_height_request();
        self.changed();
        result
    }

    fn shift_focus(&mut self, _direction: FocusDirection) -> bool {
        if self.passes() {
            return false;
        }
        if self.edit.suggestions().is_some() {
            self.edit.feed(&Key::new(KeyType::Right));
            self.collect_height_request();
            if self.passes() {
                return false;
            }
        }
        debug!(text = %self.edit.text(), "edit box kept focus after failed check");
        self.is_error = true;
        true
    }

    fn allow_blur(&self) -> bool {
        self.passes()
    }

    fn take_reflow(&mut self) -> bool {
        match self.pending_height.take() {
            Some(height) => {
                self.height = height;
                true
            }
            None => false,
        }
    }
}
