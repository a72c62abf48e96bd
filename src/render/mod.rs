//! Rendering - the widget's draw step and its window presentation

mod canvas;
mod display;

pub use canvas::*;
pub use display::*;
