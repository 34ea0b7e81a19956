//! Colors and cell styles

mod color;
mod style;

pub use color::Color;
pub use style::Style;
