//! A cell coordinate

/// A cell coordinate, either absolute in a buffer or relative to a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Move by a signed offset, stopping at zero
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, u16::MAX as i32) as u16;
        Self {
            x: clamp(self.x as i32 + dx),
            y: clamp(self.y as i32 + dy),
        }
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}
