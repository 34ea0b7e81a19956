//! Cell grids and the pen used to draw on them

mod buffer;
mod cell;
mod region;

pub use buffer::Buffer;
pub use cell::Cell;
pub use region::Region;
