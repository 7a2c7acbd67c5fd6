//! Font loading, measurement and CPU glyph rasterization.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
