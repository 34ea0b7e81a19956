//! 2D grid of cells with a native cursor slot

use super::Cell;
use crate::geometry::{Point, Rect};
use crate::style::Style;

/// A grid of cells covering `area`, plus the position where the terminal's
/// own cursor should be shown after drawing.
#[derive(Debug, Clone)]
pub struct Buffer {
    area: Rect,
    /// Row-major cells
    cells: Vec<Cell>,
    cursor: Option<Point>,
}

impl Buffer {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            cells: vec![Cell::empty(); area.area() as usize],
            cursor: None,
        }
    }

    /// A buffer at the origin
    pub fn sized(width: u16, height: u16) -> Self {
        Self::new(Rect::sized(width, height))
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn width(&self) -> u16 {
        self.area.width
    }

    pub fn height(&self) -> u16 {
        self.area.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if self.area.contains(x, y) {
            let local_x = (x - self.area.x) as usize;
            let local_y = (y - self.area.y) as usize;
            Some(local_y * self.area.width as usize + local_x)
        } else {
            None
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Set a cell, ignored when out of bounds
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    /// Write a string on one row, clipped at the right edge
    pub fn set_string(&mut self, x: u16, y: u16, s: &str, style: Style) {
        let mut current_x = x;
        for c in s.chars() {
            if current_x >= self.area.right() {
                break;
            }
            self.set(current_x, y, Cell::new(c.to_string(), style));
            let width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1).max(1);
            current_x = current_x.saturating_add(width as u16);
        }
    }

    /// Paint `area` with blank cells
    pub fn fill(&mut self, area: Rect, style: Style) {
        let clipped = self.area.intersect(&area);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, Cell::blank(style));
            }
        }
    }

    /// Reset every cell and forget the cursor
    pub fn clear(&mut self) {
        self.cells.fill(Cell::empty());
        self.cursor = None;
    }

    /// Where the native cursor should be drawn, in absolute coordinates
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Place the native cursor; positions outside the buffer are ignored
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        if self.area.contains(x, y) {
            self.cursor = Some(Point::new(x, y));
        }
    }

    pub fn hide_cursor(&mut self) {
        self.cursor = None;
    }

    /// Copy `source` (a rect of `other`) so its top-left lands at `(x, y)`.
    /// Anything falling outside either buffer is skipped.
    pub fn blit(&mut self, x: u16, y: u16, other: &Buffer, source: Rect) {
        let source = other.area.intersect(&source);
        for dy in 0..source.height {
            for dx in 0..source.width {
                if let Some(cell) = other.get(source.x + dx, source.y + dy) {
                    self.set(x.saturating_add(dx), y.saturating_add(dy), cell.clone());
                }
            }
        }
    }

    /// Change the covered area, keeping the cells that still fit
    pub fn resize(&mut self, area: Rect) {
        let mut cells = vec![Cell::empty(); area.area() as usize];
        let keep = self.area.intersect(&area);
        for y in keep.y..keep.bottom() {
            for x in keep.x..keep.right() {
                if let Some(cell) = self.get(x, y) {
                    let idx = (y - area.y) as usize * area.width as usize + (x - area.x) as usize;
                    cells[idx] = cell.clone();
                }
            }
        }
        self.area = area;
        self.cells = cells;
        if let Some(p) = self.cursor {
            if !area.contains(p.x, p.y) {
                self.cursor = None;
            }
        }
    }

    /// The symbols of one row joined together, handy for inspection
    pub fn row_text(&self, y: u16) -> String {
        (self.area.x..self.area.right())
            .filter_map(|x| self.get(x, y).map(|c| c.symbol.as_str()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.area.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = self.area.x + (i % width) as u16;
            let y = self.area.y + (i / width) as u16;
            (x, y, cell)
        })
    }

    /// Cells that differ from `other`, for incremental terminal updates
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.iter()
            .filter(move |(x, y, cell)| other.get(*x, *y).map(|c| c != *cell).unwrap_or(true))
    }
}
