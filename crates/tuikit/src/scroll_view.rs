//! A frame that shows part of a taller content buffer, with a scrollbar
//!
//! The content is one column narrower than the frame. The last column holds
//! the scrollbar. While the view is pinned it follows the bottom of the
//! content as the content grows. An anchor line can stop that, so a reader
//! never loses the line they were looking at.

use crate::buffer::{Buffer, Region};
use crate::config::ScrollViewConfig;
use crate::geometry::Rect;
use crate::style::{Color, Style};
use tracing::trace;

pub struct ScrollView {
    config: ScrollViewConfig,
    frame: Rect,
    content: Buffer,
    frame_top: usize,
    pinned: bool,
    anchor: Option<usize>,
}

impl ScrollView {
    pub fn new(frame: Rect, config: ScrollViewConfig) -> Self {
        let content = Buffer::sized(frame.width.saturating_sub(1), frame.height);
        Self {
            config,
            frame,
            content,
            frame_top: 0,
            pinned: true,
            anchor: None,
        }
    }

    pub fn config(&self) -> &ScrollViewConfig {
        &self.config
    }

    /// The frame this view draws into, scrollbar included
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn content(&self) -> &Buffer {
        &self.content
    }

    /// The content buffer, for drawing. Change its height through
    /// [`resize_content`](Self::resize_content) so the view can follow.
    pub fn content_mut(&mut self) -> &mut Buffer {
        &mut self.content
    }

    pub fn content_rows(&self) -> usize {
        self.content.height() as usize
    }

    fn frame_rows(&self) -> usize {
        self.frame.height as usize
    }

    /// Change the content height, keeping its cells
    pub fn resize_content(&mut self, rows: u16) {
        let width = self.content.width();
        self.content.resize(Rect::sized(width, rows));
        self.frame_top = self.frame_top.min(self.max_top());
        self.follow();
    }

    /// Move or resize the frame. The content keeps its height and takes the
    /// new width.
    pub fn resize(&mut self, frame: Rect) {
        self.frame = frame;
        let rows = self.content.height();
        self.content.resize(Rect::sized(frame.width.saturating_sub(1), rows));
        self.frame_top = self.frame_top.min(self.max_top());
        self.follow();
    }

    pub fn frame_top(&self) -> usize {
        self.frame_top
    }

    /// One past the last content row in view
    pub fn frame_bottom(&self) -> usize {
        self.frame_top + self.frame_rows()
    }

    /// How far down the content the bottom of the frame sits
    pub fn visible_percent(&self) -> usize {
        let rows = self.content_rows();
        if rows == 0 {
            return 100;
        }
        (100 * self.frame_bottom() / rows).min(100)
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Stop following the bottom of the content
    pub fn unpin(&mut self) {
        self.set_pinned(false);
    }

    pub fn jump_to_bottom(&mut self) {
        self.set_pinned(true);
        self.follow();
    }

    /// Hold `line` in view when growth would push it above the frame. A
    /// negative line counts up from the last content row on screen.
    pub fn set_anchor(&mut self, line: Option<isize>) {
        self.anchor = match line {
            Some(line) if line < 0 => {
                let last = self.frame_bottom().min(self.frame_top + self.content_rows());
                Some(last.saturating_sub(line.unsigned_abs()))
            }
            Some(line) => Some(line as usize),
            None => None,
        };
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn scroll_up(&mut self, count: usize) {
        if self.frame_top == 0 {
            return;
        }
        self.frame_top = self.frame_top.saturating_sub(count);
        self.update_pinned();
    }

    pub fn scroll_down(&mut self, count: usize) {
        if self.at_bottom() {
            return;
        }
        self.frame_top = (self.frame_top + count).min(self.max_top());
        self.update_pinned();
    }

    /// Up a frame, keeping one row of overlap
    pub fn page_up(&mut self) {
        let step = self.frame_rows().saturating_sub(1).max(1);
        self.scroll_up(step);
    }

    /// Down a frame, keeping one row of overlap
    pub fn page_down(&mut self) {
        let step = self.frame_rows().saturating_sub(1).max(1);
        self.scroll_down(step);
    }

    /// Let the content's owner report rows moving around (old lines
    /// expiring, a reflow) so an unpinned view stays on the same lines
    pub fn adjust_view(&mut self, translate: impl Fn(usize) -> usize) {
        if self.pinned {
            return;
        }
        self.frame_top = translate(self.frame_top).min(self.max_top());
        self.update_pinned();
    }

    /// Scroll the least amount that brings content rows `top..bottom` into
    /// view, preferring the top edge
    pub fn reveal(&mut self, top: usize, bottom: usize) {
        if top < self.frame_top {
            self.scroll_up(self.frame_top - top);
        } else if bottom > self.frame_bottom() {
            self.scroll_down(bottom - self.frame_bottom());
        }
    }

    fn max_top(&self) -> usize {
        self.content_rows().saturating_sub(self.frame_rows())
    }

    fn at_bottom(&self) -> bool {
        self.frame_bottom() >= self.content_rows()
    }

    fn update_pinned(&mut self) {
        let pinned = self.at_bottom();
        self.set_pinned(pinned);
    }

    fn set_pinned(&mut self, pinned: bool) {
        if self.pinned != pinned {
            trace!(pinned, frame_top = self.frame_top, "scroll view pin changed");
        }
        self.pinned = pinned;
    }

    /// Track the bottom of the content while pinned, unless that would
    /// scroll the anchor away
    fn follow(&mut self) {
        if !self.pinned {
            return;
        }
        self.frame_top = self.max_top();
        if let Some(anchor) = self.anchor {
            if self.frame_top > anchor {
                self.frame_top = anchor;
                self.anchor = None;
                self.set_pinned(false);
            }
        }
    }

    /// First screen row of the content, when the content is shorter than the
    /// frame
    fn content_offset(&self) -> usize {
        let short = self.frame_rows().saturating_sub(self.content_rows());
        if self.config.gravity_is_top {
            0
        } else {
            short
        }
    }

    /// Where content row `row` lands in the frame, if it is in view
    pub fn screen_row(&self, row: usize) -> Option<u16> {
        if row < self.frame_top || row >= self.frame_bottom() || row >= self.content_rows() {
            return None;
        }
        Some((row - self.frame_top + self.content_offset()) as u16)
    }

    pub fn draw(&self, screen: &mut Buffer) {
        let cols = self.frame.width.saturating_sub(1);
        let background = Style::new().bg(Color::parse_or_reset(&self.config.background_color));
        Region::new(screen, self.frame.with_width(cols))
            .set_style(background)
            .clear();

        let remaining = self.content_rows().saturating_sub(self.frame_top);
        let visible = self.frame_rows().min(remaining);
        let source = Rect::new(0, self.frame_top as u16, cols, visible as u16);
        screen.blit(
            self.frame.x,
            self.frame.y + self.content_offset() as u16,
            &self.content,
            source,
        );
        self.draw_scrollbar(screen);

        if let Some(p) = self.content.cursor() {
            if let Some(y) = self.screen_row(p.y as usize) {
                screen.set_cursor(self.frame.x + p.x, self.frame.y + y);
            }
        }
    }

    fn draw_scrollbar(&self, screen: &mut Buffer) {
        if self.frame.width == 0 {
            return;
        }
        let bar_area = Rect::new(self.frame.right() - 1, self.frame.y, 1, self.frame.height);
        let mut bar = Region::new(screen, bar_area);
        let background = Color::parse_or_reset(&self.config.background_color);
        let track = self.config.track_char.to_string();
        bar.color_bg(Color::parse_or_reset(&self.config.track_color), background);

        let rows = self.frame_rows();
        let content = self.content_rows();
        if self.frame_top == 0 && self.frame_bottom() >= content {
            let ch = if self.config.auto_hide { " " } else { track.as_str() };
            for y in 0..rows {
                bar.at(0, y as u16).write(ch);
            }
            return;
        }

        for y in 0..rows {
            bar.at(0, y as u16).write(&track);
        }
        let bar_char = self.config.bar_char.to_string();
        bar.color(Color::parse_or_reset(&self.config.bar_color));
        let top = round_div(rows * self.frame_top, content);
        let bottom = round_div(rows * self.frame_bottom(), content).min(rows);
        for y in top..bottom {
            bar.at(0, y as u16).write(&bar_char);
        }
    }
}

/// `n / d` rounded half up
fn round_div(n: usize, d: usize) -> usize {
    if d == 0 {
        return 0;
    }
    (2 * n + d) / (2 * d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn config() -> ScrollViewConfig {
        ScrollViewConfig {
            background_color: "black".to_string(),
            track_color: "red".to_string(),
            bar_color: "white".to_string(),
            ..ScrollViewConfig::default()
        }
    }

    fn view(content_rows: u16) -> ScrollView {
        let mut sv = ScrollView::new(Rect::sized(20, 10), config());
        sv.resize_content(content_rows);
        sv
    }

    fn bar_column(screen: &Buffer) -> String {
        (0..screen.height())
            .filter_map(|y| screen.get(19, y).map(|c| c.symbol.clone()))
            .collect()
    }

    #[test]
    fn test_hides_scrollbar_when_content_fits() {
        let sv = view(10);
        assert_eq!((sv.frame_top(), sv.frame_bottom()), (0, 10));
        let mut screen = Buffer::sized(20, 10);
        sv.draw(&mut screen);
        assert_eq!(bar_column(&screen), " ".repeat(10));
    }

    #[test]
    fn test_track_without_auto_hide() {
        let mut sv = ScrollView::new(
            Rect::sized(20, 5),
            ScrollViewConfig {
                auto_hide: false,
                ..config()
            },
        );
        sv.resize_content(5);
        let mut screen = Buffer::sized(20, 5);
        sv.draw(&mut screen);
        assert_eq!(bar_column(&screen), "│".repeat(5));
        assert_eq!(screen.get(19, 0).map(|c| c.fg), Some(Color::Red));
    }

    #[test]
    fn test_short_content_sits_at_bottom() {
        let mut sv = view(1);
        sv.content_mut().set_string(0, 0, "hello", Style::new().fg(Color::White));
        let mut screen = Buffer::sized(20, 10);
        sv.draw(&mut screen);
        assert_eq!(screen.row_text(9).trim_end(), "hello");
        assert_eq!(screen.row_text(0).trim_end(), "");

        let mut top = ScrollView::new(
            Rect::sized(20, 10),
            ScrollViewConfig {
                gravity_is_top: true,
                ..config()
            },
        );
        top.resize_content(1);
        top.content_mut().set_string(0, 0, "hello", Style::new());
        let mut screen = Buffer::sized(20, 10);
        top.draw(&mut screen);
        assert_eq!(screen.row_text(0).trim_end(), "hello");
    }

    #[test]
    fn test_scrollbar_tracks_frame() {
        let mut sv = view(20);
        sv.content_mut().set_string(0, 0, "hello", Style::new());
        sv.content_mut().set_string(0, 19, "goodbye", Style::new());
        sv.scroll_up(20);
        assert_eq!((sv.frame_top(), sv.frame_bottom()), (0, 10));
        let mut screen = Buffer::sized(20, 10);
        sv.draw(&mut screen);
        assert_eq!(screen.row_text(0), format!("hello{}█", " ".repeat(14)));
        assert_eq!(bar_column(&screen), "█████│││││");

        sv.scroll_down(2);
        assert_eq!((sv.frame_top(), sv.frame_bottom()), (2, 12));
        sv.draw(&mut screen);
        assert_eq!(bar_column(&screen), "│█████││││");
        assert_eq!(screen.row_text(0), format!("{}│", " ".repeat(19)));

        sv.scroll_down(8);
        assert_eq!((sv.frame_top(), sv.frame_bottom()), (10, 20));
        sv.draw(&mut screen);
        assert_eq!(bar_column(&screen), "│││││█████");
        assert_eq!(screen.row_text(9), format!("goodbye{}█", " ".repeat(12)));
        assert!(sv.is_pinned());
    }

    #[test]
    fn test_page_up_down() {
        let mut sv = view(25);
        sv.scroll_up(100);
        let mut seen = vec![(sv.frame_top(), sv.visible_percent())];
        sv.page_down();
        seen.push((sv.frame_top(), sv.visible_percent()));
        sv.page_down();
        seen.push((sv.frame_top(), sv.visible_percent()));
        sv.scroll_up(1);
        seen.push((sv.frame_top(), sv.visible_percent()));
        sv.page_up();
        seen.push((sv.frame_top(), sv.visible_percent()));
        sv.page_up();
        seen.push((sv.frame_top(), sv.visible_percent()));
        assert_eq!(seen, [(0, 40), (9, 76), (15, 100), (14, 96), (5, 60), (0, 40)]);
    }

    #[test]
    fn test_ignores_scrolling_short_content() {
        let mut sv = view(5);
        sv.page_down();
        sv.page_up();
        sv.scroll_down(1);
        sv.scroll_up(1);
        assert_eq!((sv.frame_top(), sv.frame_bottom(), sv.visible_percent()), (0, 10, 100));
        assert!(sv.is_pinned());
    }

    #[test]
    fn test_pinned_follows_growth() {
        let mut sv = view(14);
        assert_eq!((sv.frame_top(), sv.frame_bottom()), (4, 14));
        sv.unpin();
        sv.resize_content(15);
        assert_eq!((sv.frame_top(), sv.frame_bottom()), (4, 14));
        sv.jump_to_bottom();
        assert_eq!((sv.frame_top(), sv.frame_bottom()), (5, 15));
    }

    #[test]
    fn test_adjust_view() {
        let mut sv = view(25);
        sv.scroll_up(100);
        sv.scroll_down(5);
        assert_eq!(sv.frame_top(), 5);
        sv.adjust_view(|row| row.saturating_sub(3));
        assert_eq!(sv.frame_top(), 2);

        sv.jump_to_bottom();
        sv.adjust_view(|_| 0);
        assert_eq!(sv.frame_top(), 15);
    }

    #[test]
    fn test_anchor_unpins() {
        let mut sv = view(14);
        assert!(sv.is_pinned());
        sv.set_anchor(Some(13));
        sv.resize_content(17);
        assert_eq!(sv.frame_top(), 7);
        sv.resize_content(23);
        assert_eq!(sv.frame_top(), 13);
        assert!(sv.is_pinned());
        sv.resize_content(24);
        assert_eq!((sv.frame_top(), sv.frame_bottom()), (13, 23));
        assert!(!sv.is_pinned());
        assert_eq!(sv.anchor(), None);
    }

    #[test]
    fn test_negative_anchor_with_short_content() {
        let mut sv = view(5);
        sv.set_anchor(Some(-1));
        assert_eq!(sv.anchor(), Some(4));
        sv.resize_content(15);
        assert_eq!((sv.frame_top(), sv.frame_bottom()), (4, 14));
        assert!(!sv.is_pinned());
    }

    #[test]
    fn test_cursor_maps_into_frame() {
        let mut sv = view(25);
        sv.scroll_up(100);
        sv.scroll_down(5);
        sv.content_mut().set_cursor(3, 7);
        let mut screen = Buffer::new(Rect::new(0, 0, 30, 12));
        sv.draw(&mut screen);
        assert_eq!(screen.cursor(), Some(Point::new(3, 2)));

        sv.content_mut().set_cursor(3, 20);
        let mut screen = Buffer::sized(20, 10);
        sv.draw(&mut screen);
        assert_eq!(screen.cursor(), None);
    }

    #[test]
    fn test_reveal_scrolls_minimally() {
        let mut sv = view(40);
        sv.scroll_up(100);
        sv.reveal(12, 14);
        assert_eq!(sv.frame_top(), 4);
        sv.reveal(2, 30);
        assert_eq!(sv.frame_top(), 2);
    }
}
