//! Layout direction

/// Axis along which a layout splits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}
