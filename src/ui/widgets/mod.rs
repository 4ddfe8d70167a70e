//! Small reusable widgets

mod color;
mod spinner;

pub use color::hex_color;
pub use spinner::{spinner_frame, Spinner};
