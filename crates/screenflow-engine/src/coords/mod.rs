//! Coordinate and geometry types shared by surfaces, screens and the runtime.
//!
//! Canonical CPU space:
//! - Integer logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Positions are signed so that blits may start off-surface (transitions slide
//! previews in from outside the visible area).

mod point;
mod rect;
mod size;

pub use point::Point;
pub use rect::Rect;
pub use size::Size;
