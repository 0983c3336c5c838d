//! The [`Path`] value type: construction from native strings or validated text, decomposition into
//! [`Components`], composition, normalization and display.

mod components;
mod display;
mod ops;
mod path;

pub use components::*;
pub use display::*;
pub use path::*;
