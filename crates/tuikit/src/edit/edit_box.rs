//! The editable text control

use super::commit::CommitStream;
use super::history::History;
use super::lines::{self, DisplayLine};
use super::suggest::{take_common_prefix, AutoComplete, Suggestions};
use crate::buffer::{Buffer, Region};
use crate::config::{EditBoxConfig, EnterAction};
use crate::event::{EventResult, Key, KeyType, Modifiers};
use crate::geometry::Rect;
use crate::style::{Color, Style};
use std::rc::Rc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

const ELLIPSIS: &str = "\u{2026}";
const LINEFEED: &str = "\u{21b2}";

/// A custom key handler, checked before the built-in keymap
pub type Binding = Rc<dyn Fn(&Key, &mut EditBox)>;

/// Word characters for word motion and deletion
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A text editor confined to a fixed rectangle
///
/// Single-line text (no word wrap, no linefeeds) flows row by row through
/// the whole rectangle and scrolls sideways in half-width steps. Anything
/// else is laid out in display lines that scroll a line at a time. Either
/// way the cursor is kept inside the rectangle after every key.
pub struct EditBox {
    config: EditBoxConfig,
    style: Style,
    suggestion_color: Color,
    area: Rect,
    max_length: usize,

    text: Vec<char>,
    pos: usize,
    /// First visible character, single-line layout
    visible_pos: usize,
    /// First visible display line, multi-line layout
    top_line: usize,

    ideal_height: usize,
    height_request: Option<usize>,

    history: History,
    bindings: Vec<(Key, Binding)>,
    auto_complete: Option<AutoComplete>,
    suggestions: Option<Suggestions>,

    commit_tx: UnboundedSender<String>,
    commit_rx: Option<UnboundedReceiver<String>>,
}

impl EditBox {
    pub fn new(config: EditBoxConfig) -> Self {
        let (commit_tx, commit_rx) = mpsc::unbounded_channel();
        let history = History::new(config.history.clone(), config.max_history);
        let style = Style::parse(&config.color, &config.background_color);
        let suggestion_color = Color::parse_or_reset(&config.suggestion_color);
        let max_length = config.max_length;
        Self {
            config,
            style,
            suggestion_color,
            area: Rect::default(),
            max_length,
            text: Vec::new(),
            pos: 0,
            visible_pos: 0,
            top_line: 0,
            ideal_height: 1,
            height_request: None,
            history,
            bindings: Vec::new(),
            auto_complete: None,
            suggestions: None,
            commit_tx,
            commit_rx: Some(commit_rx),
        }
    }

    /// A box already placed in `area`
    pub fn with_area(config: EditBoxConfig, area: Rect) -> Self {
        let mut edit_box = Self::new(config);
        edit_box.attach(area);
        edit_box
    }

    pub fn config(&self) -> &EditBoxConfig {
        &self.config
    }

    /// Place the box. May be called again whenever the owner's layout moves.
    pub fn attach(&mut self, area: Rect) {
        self.area = area;
        self.max_length = self.config.max_length;
        let capacity = self.capacity();
        if !self.config.allow_scroll && capacity > 0 {
            self.max_length = self.max_length.min(capacity - 1);
        }
        if self.text.len() > self.max_length {
            self.text.truncate(self.max_length);
        }
        self.pos = self.pos.min(self.text.len());
        self.visible_pos = 0;
        self.top_line = 0;
        self.refresh();
    }

    /// Resize in place, keeping the origin
    pub fn resize(&mut self, rows: u16, cols: u16) {
        let area = Rect::new(self.area.x, self.area.y, cols, rows);
        self.attach(area);
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn set_suggestion_color(&mut self, color: Color) {
        self.suggestion_color = color;
    }

    /// Whether this box places the terminal cursor when drawn
    pub fn set_focused(&mut self, focused: bool) {
        self.config.focused = focused;
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// First visible character
    pub fn visible_pos(&self) -> usize {
        if self.is_flat() {
            self.visible_pos
        } else {
            self.display_lines()
                .get(self.top_line)
                .map(|line| line.start)
                .unwrap_or(0)
        }
    }

    pub fn content_left(&self) -> String {
        self.text[..self.pos].iter().collect()
    }

    pub fn content_right(&self) -> String {
        self.text[self.pos..].iter().collect()
    }

    /// Replace the text and put the cursor at the end
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().take(self.max_length).collect();
        self.pos = self.text.len();
        self.suggestions = None;
        self.refresh();
    }

    /// Empty the box and stop browsing history
    pub fn reset(&mut self) {
        self.text.clear();
        self.pos = 0;
        self.visible_pos = 0;
        self.top_line = 0;
        self.suggestions = None;
        self.history.rewind();
        self.refresh();
    }

    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Handle `key` with `f` instead of the keymap. Binding a key again
    /// replaces the old handler.
    pub fn bind(&mut self, key: Key, f: impl Fn(&Key, &mut EditBox) + 'static) {
        let f: Binding = Rc::new(f);
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, f));
    }

    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    pub fn set_auto_complete(&mut self, f: impl Fn(&str) -> Option<Vec<String>> + 'static) {
        self.auto_complete = Some(Box::new(f));
    }

    pub fn suggestions(&self) -> Option<&Suggestions> {
        self.suggestions.as_ref()
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions = None;
        self.refresh();
    }

    /// Look up completions for the current text and show the first as ghost
    /// text, without inserting anything
    pub fn check_for_suggestions(&mut self) {
        let Some(complete) = &self.auto_complete else {
            return;
        };
        self.suggestions = match complete(&self.text()) {
            Some(list) if !list.is_empty() => Some(Suggestions::new(list)),
            _ => None,
        };
        self.refresh();
    }

    /// Number of rows the text would like. Follows the content as it grows
    /// and shrinks.
    pub fn ideal_height(&self) -> usize {
        self.ideal_height
    }

    /// The latest unanswered height change, if the ideal height moved since
    /// the last call
    pub fn take_height_request(&mut self) -> Option<usize> {
        self.height_request.take()
    }

    /// The stream of committed lines. There is only one; later calls give
    /// `None`.
    pub fn commits(&mut self) -> Option<CommitStream> {
        self.commit_rx.take().map(CommitStream::new)
    }

    // ----- key dispatch

    pub fn feed(&mut self, key: &Key) -> EventResult {
        let binding = self
            .bindings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, f)| Rc::clone(f));
        if let Some(f) = binding {
            f(key, self);
            return EventResult::Consumed;
        }

        if self.suggestions.is_some()
            && !(key.is_plain() && matches!(key.kind, KeyType::Tab | KeyType::Right))
        {
            self.clear_suggestions();
        }

        if key.modifiers == Modifiers::NONE {
            match key.kind {
                KeyType::Backspace => self.backspace(),
                KeyType::Delete => self.delete_forward(),
                KeyType::Tab => self.tab(),
                KeyType::Return => self.enter(),
                KeyType::Left => self.left(),
                KeyType::Right => self.right(),
                KeyType::Up if self.config.use_history => self.history_previous(),
                KeyType::Up => self.line_up(),
                KeyType::Down if self.config.use_history => self.history_next(),
                KeyType::Down => self.line_down(),
                KeyType::Home => self.home(),
                KeyType::End => self.end(),
                KeyType::Normal => match key.ch {
                    Some(ch) => self.insert(ch.encode_utf8(&mut [0; 4])),
                    None => return EventResult::Ignored,
                },
                _ => return EventResult::Ignored,
            }
        } else if key.modifiers == Modifiers::CONTROL {
            match key.kind {
                KeyType::Left => self.word_left(),
                KeyType::Right => self.word_right(),
                KeyType::Up => self.line_up(),
                KeyType::Down => self.line_down(),
                KeyType::Normal => match key.ch.map(|c| c.to_ascii_lowercase()) {
                    Some('a') => self.home(),
                    Some('b') => self.left(),
                    Some('d') => self.delete_forward(),
                    Some('e') => self.end(),
                    Some('f') => self.right(),
                    Some('h') => self.backspace(),
                    Some('j') | Some('m') => self.enter(),
                    Some('k') => self.delete_to_eol(),
                    Some('n') => self.history_next(),
                    Some('p') => self.history_previous(),
                    Some('t') => self.transpose(),
                    Some('w') => self.delete_word(),
                    _ => return EventResult::Ignored,
                },
                _ => return EventResult::Ignored,
            }
        } else {
            return EventResult::Ignored;
        }
        EventResult::Consumed
    }

    // ----- commands

    /// Insert at the cursor. Text past the length cap is cut off.
    pub fn insert(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len();
        self.text.splice(self.pos..self.pos, chars);
        self.pos += n;
        if self.text.len() > self.max_length {
            self.text.truncate(self.max_length);
            self.pos = self.pos.min(self.text.len());
        }
        self.refresh();
    }

    pub fn backspace(&mut self) {
        if self.pos == 0 {
            return;
        }
        self.pos -= 1;
        self.text.remove(self.pos);
        self.refresh();
    }

    pub fn delete_forward(&mut self) {
        if self.pos >= self.text.len() {
            return;
        }
        self.text.remove(self.pos);
        self.refresh();
    }

    pub fn left(&mut self) {
        if self.pos == 0 {
            return;
        }
        self.move_to(self.pos - 1);
    }

    /// Move right, or accept the shown suggestion
    pub fn right(&mut self) {
        if let Some(suggestions) = self.suggestions.take() {
            self.insert(suggestions.current());
            return;
        }
        if self.pos >= self.text.len() {
            return;
        }
        self.move_to(self.pos + 1);
    }

    pub fn home(&mut self) {
        if self.is_flat() {
            self.move_to(0);
        } else {
            let lines = self.display_lines();
            let (row, _) = lines::locate(&lines, self.pos);
            self.move_to(lines[row].start);
        }
    }

    pub fn end(&mut self) {
        if self.is_flat() {
            self.move_to(self.text.len());
        } else {
            let lines = self.display_lines();
            let (row, _) = lines::locate(&lines, self.pos);
            self.move_to(lines::line_end(&self.text, &lines, row));
        }
    }

    pub fn word_left(&mut self) {
        let pos = self.word_start();
        self.move_to(pos);
    }

    pub fn word_right(&mut self) {
        let mut pos = self.pos;
        while pos < self.text.len() && !is_word_char(self.text[pos]) {
            pos += 1;
        }
        while pos < self.text.len() && is_word_char(self.text[pos]) {
            pos += 1;
        }
        self.move_to(pos);
    }

    fn word_start(&self) -> usize {
        let mut pos = self.pos;
        while pos > 0 && !is_word_char(self.text[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(self.text[pos - 1]) {
            pos -= 1;
        }
        pos
    }

    /// Cursor up one row
    pub fn line_up(&mut self) {
        if self.is_flat() {
            let step = self.round_factor();
            if self.pos >= step {
                self.move_to(self.pos - step);
            }
            return;
        }
        let lines = self.display_lines();
        let (row, col) = lines::locate(&lines, self.pos);
        if row == 0 {
            return;
        }
        let target = lines[row - 1].start + col;
        self.move_to(target.min(lines::last_on_row(&lines, row - 1)));
    }

    /// Cursor down one row
    pub fn line_down(&mut self) {
        if self.is_flat() {
            let step = self.round_factor();
            if self.pos + step <= self.text.len() {
                self.move_to(self.pos + step);
            }
            return;
        }
        let lines = self.display_lines();
        let (row, col) = lines::locate(&lines, self.pos);
        if row + 1 >= lines.len() {
            return;
        }
        let target = lines[row + 1].start + col;
        self.move_to(target.min(lines::last_on_row(&lines, row + 1)));
    }

    /// Cut from the cursor to the end of the text, or of the display line
    /// in multi-line layout
    pub fn delete_to_eol(&mut self) {
        let end = if self.is_flat() {
            self.text.len()
        } else {
            let lines = self.display_lines();
            let (row, _) = lines::locate(&lines, self.pos);
            lines::line_end(&self.text, &lines, row)
        };
        if self.pos >= end {
            return;
        }
        self.text.drain(self.pos..end);
        self.refresh();
    }

    /// Swap the characters on either side of the cursor
    pub fn transpose(&mut self) {
        if self.pos == 0 || self.pos >= self.text.len() {
            return;
        }
        self.text.swap(self.pos - 1, self.pos);
        self.refresh();
    }

    /// Delete the word before the cursor
    pub fn delete_word(&mut self) {
        let start = self.word_start();
        if start == self.pos {
            return;
        }
        self.text.drain(start..self.pos);
        self.pos = start;
        self.refresh();
    }

    pub fn history_previous(&mut self) {
        let current = self.text();
        if let Some(line) = self.history.previous(&current) {
            self.replace_text(&line);
        }
    }

    pub fn history_next(&mut self) {
        if let Some(line) = self.history.next() {
            self.replace_text(&line);
        }
    }

    /// Complete the text: cycle cached suggestions, or ask the completion
    /// function and insert whatever all candidates agree on
    pub fn tab(&mut self) {
        if let Some(suggestions) = &mut self.suggestions {
            suggestions.advance();
            self.refresh();
            return;
        }
        let Some(complete) = &self.auto_complete else {
            return;
        };
        let mut list = match complete(&self.text()) {
            Some(list) if !list.is_empty() => list,
            _ => return,
        };
        if list.len() == 1 {
            self.insert(&list[0]);
            return;
        }
        let prefix = take_common_prefix(&mut list);
        if !prefix.is_empty() {
            self.insert(&prefix);
        }
        self.suggestions = Some(Suggestions::new(list));
        self.refresh();
    }

    pub fn enter(&mut self) {
        match self.config.enter_action {
            EnterAction::Ignore => {}
            EnterAction::Insert => self.insert("\n"),
            EnterAction::Commit => self.commit(),
        }
    }

    fn commit(&mut self) {
        let line = self.text();
        if self.config.use_history && !line.is_empty() {
            self.history.record(&line);
        }
        self.reset();
        debug!(len = line.chars().count(), "edit box commit");
        // a dropped stream only means nobody is listening
        let _ = self.commit_tx.send(line);
    }

    fn replace_text(&mut self, line: &str) {
        self.text = line.chars().take(self.max_length).collect();
        self.pos = self.text.len();
        self.refresh();
    }

    // ----- layout

    fn is_flat(&self) -> bool {
        !self.config.word_wrap && !self.text.contains(&'\n')
    }

    fn capacity(&self) -> usize {
        self.area.width as usize * self.area.height as usize
    }

    /// Sideways scroll step, single-line layout
    fn round_factor(&self) -> usize {
        let cols = self.area.width as usize;
        if self.area.height == 1 {
            (cols / 2).max(1)
        } else {
            cols.max(1)
        }
    }

    fn display_lines(&self) -> Vec<DisplayLine> {
        let width = (self.area.width as usize).saturating_sub(1);
        lines::layout(&self.text, width, self.config.word_wrap)
    }

    fn suggestion_len(&self) -> usize {
        self.suggestions
            .as_ref()
            .map(|s| s.current().chars().count())
            .unwrap_or(0)
    }

    fn move_to(&mut self, pos: usize) {
        self.pos = pos.min(self.text.len());
        self.refresh();
    }

    /// Bring the cursor into view and recompute the ideal height
    fn refresh(&mut self) {
        if self.is_flat() {
            self.top_line = 0;
            self.scroll_flat();
            let cols = (self.area.width as usize).max(1);
            self.set_ideal_height((self.text.len() + 2).div_ceil(cols));
        } else {
            self.visible_pos = 0;
            let lines = self.display_lines();
            self.scroll_lines(&lines);
            self.set_ideal_height(lines.len());
        }
    }

    fn scroll_flat(&mut self) {
        let size = self.capacity();
        if size == 0 {
            self.visible_pos = 0;
            return;
        }
        let step = self.round_factor();
        // snap, in case a resize changed the step
        self.visible_pos = self.visible_pos / step * step;
        if size > self.text.len() + self.suggestion_len() {
            self.visible_pos = 0;
        }
        while self.pos <= self.visible_pos && self.visible_pos > 0 {
            self.visible_pos = self.visible_pos.saturating_sub(step);
        }
        while self.config.allow_scroll && self.pos >= self.visible_pos + size {
            self.visible_pos += step;
        }
    }

    fn scroll_lines(&mut self, lines: &[DisplayLine]) {
        let rows = self.area.height as usize;
        if rows == 0 {
            self.top_line = 0;
            return;
        }
        let margin = if rows >= 3 { 1 } else { 0 };
        let max_top = lines.len().saturating_sub(rows);
        let (row, _) = lines::locate(lines, self.pos);
        let mut top = self.top_line.min(max_top);
        if row < top + margin {
            top = row.saturating_sub(margin);
        }
        if row + margin >= top + rows {
            top = row + margin + 1 - rows;
        }
        self.top_line = top.min(max_top);
    }

    fn set_ideal_height(&mut self, lines: usize) {
        if self.ideal_height == lines {
            return;
        }
        trace!(from = self.ideal_height, to = lines, "edit box height request");
        self.ideal_height = lines;
        self.height_request = Some(lines);
    }

    // ----- drawing

    /// Cursor position inside the box
    pub fn cursor(&self) -> Option<(u16, u16)> {
        let cols = self.area.width as usize;
        let rows = self.area.height as usize;
        if cols == 0 || rows == 0 {
            return None;
        }
        let (x, y) = if self.is_flat() {
            let offset = self.pos.saturating_sub(self.visible_pos);
            (offset % cols, offset / cols)
        } else {
            let (row, col) = lines::locate(&self.display_lines(), self.pos);
            // a one-column box still wraps at one character
            (col.min(cols - 1), row.saturating_sub(self.top_line))
        };
        (x < cols && y < rows).then_some((x as u16, y as u16))
    }

    pub fn draw(&self, buf: &mut Buffer) {
        let mut region = Region::new(buf, self.area);
        if region.cols() == 0 || region.rows() == 0 {
            return;
        }
        region.set_style(self.style).clear().at(0, 0);
        if self.is_flat() {
            self.draw_flat(&mut region);
        } else {
            self.draw_lines(&mut region);
        }
        if self.config.focused {
            if let Some((x, y)) = self.cursor() {
                region.move_cursor(x, y);
            }
        }
    }

    fn draw_flat(&self, region: &mut Region<'_>) {
        let size = self.capacity();
        let start = self.visible_pos.min(self.text.len());
        let end = (self.visible_pos + size).min(self.text.len());
        let shown = &self.text[start..end];
        let more_left = self.visible_pos > 0;
        let more_right = self.visible_pos + size < self.text.len();

        let from = usize::from(more_left).min(shown.len());
        let to = shown.len().saturating_sub(usize::from(more_right)).max(from);
        if more_left {
            region.color(self.suggestion_color).write(ELLIPSIS);
        }
        let middle: String = shown[from..to].iter().collect();
        region.color(self.style.fg).write(&middle);
        if more_right {
            region.color(self.suggestion_color).write(ELLIPSIS);
        }
        if let Some(suggestions) = &self.suggestions {
            region.color(self.suggestion_color).write(suggestions.current());
        }
    }

    fn draw_lines(&self, region: &mut Region<'_>) {
        let lines = self.display_lines();
        let rows = region.rows() as usize;
        let cols = region.cols() as usize;
        let bottom = (self.top_line + rows).min(lines.len());
        for (y, line) in lines[self.top_line..bottom].iter().enumerate() {
            region.at(0, y as u16);
            for (x, &c) in self.text[line.start..line.end()].iter().enumerate() {
                if x == 0 && y == 0 && self.top_line > 0 {
                    region.color(self.suggestion_color).write(ELLIPSIS);
                } else if c == '\n' {
                    let glyph = if self.config.visible_linefeed { LINEFEED } else { " " };
                    region.color(self.suggestion_color).write(glyph);
                } else {
                    region.color(self.style.fg).write(c.encode_utf8(&mut [0; 4]));
                }
            }
            if y + 1 == rows && bottom < lines.len() {
                let x = line.len.min(cols.saturating_sub(1));
                region.at(x as u16, y as u16).color(self.suggestion_color).write(ELLIPSIS);
            }
        }
        if let Some(suggestions) = &self.suggestions {
            let (row, col) = lines::locate(&lines, self.text.len());
            if row >= self.top_line && row < bottom {
                region
                    .at(col as u16, (row - self.top_line) as u16)
                    .color(self.suggestion_color)
                    .write(suggestions.current());
            }
        }
    }
}

impl std::fmt::Debug for EditBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditBox")
            .field("text", &self.text())
            .field("pos", &self.pos)
            .field("area", &self.area)
            .field("suggestions", &self.suggestions)
            .finish_non_exhaustive()
    }
}
