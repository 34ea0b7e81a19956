//! Two-axis layout: columns and rows resolved independently

use super::flex::resolve;
use super::Constraint;
use crate::geometry::Rect;

/// A grid of cells inside an area, recomputable on resize
#[derive(Debug, Clone)]
pub struct Grid {
    area: Rect,
    columns: Vec<Constraint>,
    rows: Vec<Constraint>,
    lefts: Vec<u16>,
    tops: Vec<u16>,
}

impl Grid {
    pub fn new(area: Rect, columns: Vec<Constraint>, rows: Vec<Constraint>) -> Self {
        let mut grid = Self {
            area,
            columns,
            rows,
            lefts: Vec::new(),
            tops: Vec::new(),
        };
        grid.resize(area);
        grid
    }

    /// Recompute every edge for a new area
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.lefts = edges(&self.columns, area.width);
        self.tops = edges(&self.rows, area.height);
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Column edges relative to the area, with the far edge last
    pub fn lefts(&self) -> &[u16] {
        &self.lefts
    }

    /// Row edges relative to the area, with the far edge last
    pub fn tops(&self) -> &[u16] {
        &self.tops
    }

    /// The cell at one column and row
    pub fn cell(&self, col: usize, row: usize) -> Rect {
        self.span(col, row, col + 1, row + 1)
    }

    /// Cells from `(col0, row0)` up to but excluding `(col1, row1)`.
    /// Out-of-range indices are clamped to the grid edge.
    pub fn span(&self, col0: usize, row0: usize, col1: usize, row1: usize) -> Rect {
        let edge = |v: &[u16], i: usize| v.get(i).or(v.last()).copied().unwrap_or(0);
        let (x1, x2) = (edge(&self.lefts, col0), edge(&self.lefts, col1));
        let (y1, y2) = (edge(&self.tops, row0), edge(&self.tops, row1));
        self.area.clip(x1, y1, x2, y2)
    }
}

fn edges(constraints: &[Constraint], total: u16) -> Vec<u16> {
    let slots = resolve(constraints, total, 0);
    let mut edges: Vec<u16> = slots.iter().map(|(offset, _)| *offset).collect();
    let end = slots
        .last()
        .map(|(offset, size)| offset.saturating_add(*size))
        .unwrap_or(0);
    edges.push(end);
    edges
}
