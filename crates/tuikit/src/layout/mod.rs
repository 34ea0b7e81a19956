//! Constraint-based splitting of areas into rows, columns and grids

mod constraint;
mod direction;
mod flex;
mod grid;

pub use constraint::Constraint;
pub use direction::Direction;
pub use flex::Layout;
pub use grid::Grid;
