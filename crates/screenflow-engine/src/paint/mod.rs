//! Paint model shared by surfaces and screens.
//!
//! Scope is intentionally narrow: solid sRGB colors. Geometry types remain in
//! `coords`.

pub mod color;

pub use color::{Color, ColorParseError};
