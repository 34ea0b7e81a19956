//! Rectangular areas of a buffer

/// A rectangular area of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// A rectangle anchored at the origin
    pub const fn sized(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Number of cells covered
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Same origin and width with a new height
    pub const fn with_height(self, height: u16) -> Self {
        Self::new(self.x, self.y, self.width, height)
    }

    /// Same origin and height with a new width
    pub const fn with_width(self, width: u16) -> Self {
        Self::new(self.x, self.y, width, self.height)
    }

    /// Shift the whole rectangle right/down
    pub const fn translate(self, dx: u16, dy: u16) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// A sub-rectangle given in coordinates relative to this one,
    /// `(x1, y1)` inclusive and `(x2, y2)` exclusive, clamped to fit.
    pub fn clip(&self, x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let x2 = x2.clamp(x1, self.width);
        let y2 = y2.clamp(y1, self.height);
        Self::new(self.x + x1, self.y + y1, x2 - x1, y2 - y1)
    }

    pub fn intersect(&self, other: &Rect) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if x >= right || y >= bottom {
            Self::default()
        } else {
            Self::new(x, y, right - x, bottom - y)
        }
    }
}
