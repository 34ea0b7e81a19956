//! A drawing pen confined to part of a buffer
//!
//! Widgets never address buffer cells directly. They take a `Region` over
//! the area they were given and write through it: text wraps at the right
//! edge, anything below the bottom edge is dropped, and colors stick until
//! changed.

use super::{Buffer, Cell};
use crate::geometry::{Point, Rect};
use crate::style::{Color, Style};

/// A pen over a rectangular part of a [`Buffer`]
pub struct Region<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    /// Pen position, relative to `area`
    x: u16,
    y: u16,
    style: Style,
}

impl<'a> Region<'a> {
    /// A region over `area`, clipped to the buffer
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = buf.area().intersect(&area);
        Self {
            buf,
            area,
            x: 0,
            y: 0,
            style: Style::new(),
        }
    }

    /// A region covering the whole buffer
    pub fn all(buf: &'a mut Buffer) -> Self {
        let area = buf.area();
        Self::new(buf, area)
    }

    /// A narrower region inside this one, in relative coordinates.
    /// The pen style carries over.
    pub fn clip(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) -> Region<'_> {
        let area = self.area.clip(x1, y1, x2, y2);
        let style = self.style;
        let mut region = Region::new(&mut *self.buf, area);
        region.style = style;
        region
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn cols(&self) -> u16 {
        self.area.width
    }

    pub fn rows(&self) -> u16 {
        self.area.height
    }

    /// Pen position
    pub fn pen(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn at(&mut self, x: u16, y: u16) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) -> &mut Self {
        let p = Point::new(self.x, self.y).offset(dx, dy);
        self.x = p.x;
        self.y = p.y;
        self
    }

    /// Change the foreground, keeping the background
    pub fn color(&mut self, fg: Color) -> &mut Self {
        self.style.fg = fg;
        self
    }

    pub fn color_bg(&mut self, fg: Color, bg: Color) -> &mut Self {
        self.style = Style::new().fg(fg).bg(bg);
        self
    }

    pub fn set_style(&mut self, style: Style) -> &mut Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Write text at the pen, wrapping to the next row at the right edge.
    /// A linefeed moves the pen to the start of the next row. Writing stops
    /// at the bottom edge and the pen stays where the text was cut.
    pub fn write(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            if self.y >= self.area.height {
                break;
            }
            let wrap = c == '\n' || self.x >= self.area.width;
            if wrap {
                if self.y + 1 >= self.area.height {
                    break;
                }
                self.x = 0;
                self.y += 1;
                if c == '\n' {
                    continue;
                }
            }
            let width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1).max(1) as u16;
            self.buf.set(
                self.area.x + self.x,
                self.area.y + self.y,
                Cell::new(c.to_string(), self.style),
            );
            self.x = self.x.saturating_add(width);
        }
        self
    }

    /// Blank the whole region in the current colors
    pub fn clear(&mut self) -> &mut Self {
        self.buf.fill(self.area, self.style);
        self
    }

    /// Blank from the pen to the right edge of its row
    pub fn clear_to_eol(&mut self) -> &mut Self {
        if self.y < self.area.height && self.x < self.area.width {
            let rest = Rect::new(
                self.area.x + self.x,
                self.area.y + self.y,
                self.area.width - self.x,
                1,
            );
            self.buf.fill(rest, self.style);
        }
        self
    }

    /// Place the terminal cursor, in region coordinates
    pub fn move_cursor(&mut self, x: u16, y: u16) -> &mut Self {
        if x < self.area.width && y < self.area.height {
            self.buf.set_cursor(self.area.x + x, self.area.y + y);
        }
        self
    }
}
