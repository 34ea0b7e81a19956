//! Append-only log of rich-text lines, wrapped to a width and kept to a
//! maximum number of lines

use crate::buffer::{Buffer, Region};
use crate::config::LogViewConfig;
use crate::geometry::Rect;
use crate::rich_text::RichText;
use crate::scroll_view::ScrollView;
use crate::style::{Color, Style};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// How rows of the wrapped content moved, so a view looking at row `n` can
/// find the same text afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMove {
    /// This many rows fell off the top
    Discarded(usize),
    /// The lines were rewrapped. Holds each line's row count before and after.
    Reflowed { old: Vec<usize>, new: Vec<usize> },
}

impl ContentMove {
    pub fn translate(&self, row: usize) -> usize {
        match self {
            ContentMove::Discarded(rows) => row.saturating_sub(*rows),
            ContentMove::Reflowed { old, new } => {
                // the offset inside the line is lost in a reflow
                let (line, _) = row_to_line(old, row);
                line_to_row(new, line)
            }
        }
    }
}

/// The line holding `row`, and how many rows into that line it is
fn row_to_line(heights: &[usize], row: usize) -> (usize, usize) {
    let mut rows = 0;
    for (i, &height) in heights.iter().enumerate() {
        if rows + height > row {
            return (i, row - rows);
        }
        rows += height;
    }
    (heights.len(), row - rows)
}

/// First row of the line before `line`, keeping one line of context above
fn line_to_row(heights: &[usize], line: usize) -> usize {
    heights.iter().take(line.saturating_sub(1)).sum()
}

pub struct LogView {
    config: LogViewConfig,
    cols: u16,
    lines: VecDeque<RichText>,
    wrapped: VecDeque<Vec<RichText>>,
    moves: Vec<ContentMove>,
}

impl LogView {
    pub fn new(cols: u16, config: LogViewConfig) -> Self {
        Self {
            config,
            cols,
            lines: VecDeque::new(),
            wrapped: VecDeque::new(),
            moves: Vec::new(),
        }
    }

    pub fn config(&self) -> &LogViewConfig {
        &self.config
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Total wrapped rows
    pub fn rows(&self) -> usize {
        self.wrapped.iter().map(Vec::len).sum()
    }

    /// Wrapped rows a canvas can hold, saturating at its height limit
    fn canvas_rows(&self) -> u16 {
        u16::try_from(self.rows()).unwrap_or(u16::MAX)
    }

    pub fn lines(&self) -> impl Iterator<Item = &RichText> {
        self.lines.iter()
    }

    fn wrap_width(&self) -> usize {
        (self.cols as usize).saturating_sub(1)
    }

    /// Add a plain line in the default color
    pub fn add(&mut self, line: &str) {
        let text = RichText::string(self.config.default_color.as_str(), line);
        self.add_text(text);
    }

    pub fn add_text(&mut self, text: RichText) {
        self.wrapped.push_back(text.wrap(self.wrap_width(), self.config.word_wrap));
        self.lines.push_back(text);
        if self.lines.len() > self.config.max_lines {
            self.lines.pop_front();
            if let Some(discarded) = self.wrapped.pop_front() {
                trace!(rows = discarded.len(), "log line expired");
                self.moves.push(ContentMove::Discarded(discarded.len()));
            }
        }
    }

    /// Rewrap every line for a new width. Nothing happens if the width is
    /// unchanged.
    pub fn reflow(&mut self, cols: u16) {
        if cols == self.cols {
            return;
        }
        self.cols = cols;
        let old: Vec<usize> = self.wrapped.iter().map(Vec::len).collect();
        let width = self.wrap_width();
        self.wrapped = self
            .lines
            .iter()
            .map(|line| line.wrap(width, self.config.word_wrap))
            .collect();
        let new: Vec<usize> = self.wrapped.iter().map(Vec::len).collect();
        debug!(cols, rows = self.rows(), "log view reflowed");
        self.moves.push(ContentMove::Reflowed { old, new });
    }

    /// Row moves since the last call, oldest first
    pub fn take_moves(&mut self) -> Vec<ContentMove> {
        std::mem::take(&mut self.moves)
    }

    /// Render every wrapped row into `canvas`, resizing it to fit
    pub fn draw(&self, canvas: &mut Buffer) {
        let origin = canvas.area();
        let rows = self.canvas_rows();
        canvas.resize(Rect::new(origin.x, origin.y, self.cols, rows));
        let default = Color::parse_or_reset(&self.config.default_color);
        let mut region = Region::all(canvas);
        for (y, row) in (0..rows).zip(self.wrapped.iter().flatten()) {
            region
                .set_style(Style::new().fg(default))
                .at(0, y)
                .clear_to_eol();
            row.render(
                &mut region,
                &self.config.color_aliases,
                Some(self.config.default_color.as_str()),
            );
        }
    }

    /// Render into a scroll view's content and let the view follow any rows
    /// that moved
    pub fn sync(&mut self, view: &mut ScrollView) {
        let width = view.content().width();
        self.reflow(width);
        view.resize_content(self.canvas_rows());
        self.draw(view.content_mut());
        for content_move in self.moves.drain(..) {
            view.adjust_view(|row| content_move.translate(row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrollViewConfig;
    use crate::rich_text::wrap_text;
    use std::collections::HashMap;

    fn rows_of(canvas: &Buffer) -> Vec<String> {
        let area = canvas.area();
        (area.y..area.bottom())
            .map(|y| canvas.row_text(y).trim_end().to_string())
            .collect()
    }

    fn capped(max_lines: usize) -> LogViewConfig {
        LogViewConfig {
            max_lines,
            ..LogViewConfig::default()
        }
    }

    #[test]
    fn test_wrap_text() {
        let text = RichText::string("777", "turn off the television");
        let wrapped = |width| -> Vec<String> {
            wrap_text(&text, width).iter().map(ToString::to_string).collect()
        };
        assert_eq!(wrapped(50), ["{777:turn off the television}"]);
        assert_eq!(wrapped(20), ["{777:turn off the }", "{777:television}"]);
        assert_eq!(
            wrapped(5),
            ["{777:turn }", "{777:off }", "{777:the }", "{777:telev}", "{777:ision}"]
        );

        let word = RichText::string("777", "monosyllabicism");
        let strings: Vec<String> = wrap_text(&word, 8).iter().map(ToString::to_string).collect();
        assert_eq!(strings, ["{777:monosyll}", "{777:abicism}"]);
    }

    #[test]
    fn test_canvas_height_saturates() {
        let mut view = LogView::new(2, capped(70_000));
        for _ in 0..(u16::MAX as usize + 4) {
            view.add("x");
        }
        assert_eq!(view.rows(), u16::MAX as usize + 4);
        let mut canvas = Buffer::sized(2, 1);
        view.draw(&mut canvas);
        assert_eq!(canvas.height(), u16::MAX);
        assert_eq!(canvas.row_text(u16::MAX - 1).trim_end(), "x");
    }

    #[test]
    fn test_adds_at_the_bottom() {
        let mut view = LogView::new(20, LogViewConfig::default());
        view.add("hello");
        view.add("second");
        let mut canvas = Buffer::sized(20, 10);
        view.draw(&mut canvas);
        assert_eq!(rows_of(&canvas), ["hello", "second"]);
        assert_eq!(canvas.get(0, 0).map(|c| c.fg), Some(Color::Rgb(0xaa, 0xaa, 0xaa)));
    }

    #[test]
    fn test_resizes_horizontally() {
        let mut view = LogView::new(20, LogViewConfig::default());
        view.add("turn off the television");
        view.add("second line");
        let mut canvas = Buffer::sized(20, 1);
        view.draw(&mut canvas);
        assert_eq!(rows_of(&canvas), ["turn off the", "television", "second line"]);

        view.reflow(11);
        view.draw(&mut canvas);
        assert_eq!(
            rows_of(&canvas),
            ["turn off", "the", "television", "second", "line"]
        );

        view.reflow(25);
        view.draw(&mut canvas);
        assert_eq!(rows_of(&canvas), ["turn off the television", "second line"]);
        assert_eq!(view.take_moves().len(), 2);
    }

    #[test]
    fn test_reports_expiring_lines() {
        let mut view = LogView::new(20, capped(20));
        view.add("first");
        view.add("one line that's actually several lines because it will wrap a lot");
        for i in 0..18 {
            view.add(&i.to_string());
        }
        assert!(view.take_moves().is_empty());
        view.add("new line");
        view.add("newer line");
        let seen: Vec<usize> = view.take_moves().iter().map(|m| m.translate(10)).collect();
        assert_eq!(seen, [9, 6]);
        assert_eq!(view.lines().count(), 20);
    }

    #[test]
    fn test_translates_reflowed_rows() {
        let mut view = LogView::new(20, capped(20));
        for i in 1..=5 {
            view.add(&format!(
                "{i} line that's actually several lines because it will wrap a lot"
            ));
        }
        assert_eq!(view.rows(), 20);
        view.reflow(21);
        let moves = view.take_moves();
        assert_eq!(moves.len(), 1);
        let translated: Vec<usize> = [0, 3, 4, 7, 8].iter().map(|&r| moves[0].translate(r)).collect();
        assert_eq!(translated, [0, 0, 0, 0, 4]);
    }

    #[test]
    fn test_custom_color_names() {
        let config = LogViewConfig {
            color_aliases: HashMap::from([("mars".to_string(), "f00".to_string())]),
            ..capped(20)
        };
        let mut view = LogView::new(20, config);
        view.add_text(RichText::parse("Welcome to {mars:Mars}", "777"));
        let mut canvas = Buffer::sized(20, 1);
        view.draw(&mut canvas);
        assert_eq!(rows_of(&canvas), ["Welcome to Mars"]);
        assert_eq!(canvas.get(0, 0).map(|c| c.fg), Some(Color::Rgb(0x77, 0x77, 0x77)));
        assert_eq!(canvas.get(11, 0).map(|c| c.fg), Some(Color::Rgb(0xff, 0, 0)));
    }

    #[test]
    fn test_blank_lines_take_a_row() {
        let mut view = LogView::new(6, capped(20));
        view.add_text(RichText::parse("start", "777"));
        view.add_text(RichText::parse("", "777"));
        view.add_text(RichText::parse("end", "777"));
        let mut canvas = Buffer::sized(6, 1);
        view.draw(&mut canvas);
        assert_eq!(rows_of(&canvas), ["start", "", "end"]);
    }

    #[test]
    fn test_sync_keeps_unpinned_view_on_its_lines() {
        let mut scroll = ScrollView::new(Rect::sized(20, 10), ScrollViewConfig::default());
        let mut view = LogView::new(19, capped(30));
        for i in 0..30 {
            view.add(&format!("line {i}"));
        }
        view.sync(&mut scroll);
        assert_eq!(scroll.frame_top(), 20);
        assert!(scroll.is_pinned());

        scroll.scroll_up(10);
        assert_eq!(scroll.frame_top(), 10);
        view.add("line 30");
        view.add("line 31");
        view.sync(&mut scroll);
        assert_eq!(scroll.frame_top(), 8);
        assert_eq!(scroll.content().row_text(8).trim_end(), "line 10");

        scroll.jump_to_bottom();
        view.add("line 32");
        view.sync(&mut scroll);
        assert_eq!(scroll.frame_top(), 20);
        assert_eq!(scroll.content().row_text(29).trim_end(), "line 32");
    }
}
