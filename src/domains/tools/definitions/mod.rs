//! Tool definitions module.
//!
//! Each tool is defined in its own file.

pub mod about;
pub mod rgb;

pub use about::AboutTool;
pub use rgb::{RgbOutput, RgbParams, RgbTool};
