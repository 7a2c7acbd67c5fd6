//! CPU raster surfaces.
//!
//! Screens draw into an [`Image`]; the runtime uploads the flow's framebuffer
//! image to the GPU once per frame. The [`Surface`] trait is the narrow
//! contract consumers such as transitions depend on, so they can be exercised
//! against recording doubles.

mod image;

pub use self::image::Image;

use crate::coords::{Point, Size};
use crate::paint::Color;

/// Minimal drawing contract: query size, fill, blit.
pub trait Surface {
    /// Surface extent in logical pixels.
    fn size(&self) -> Size;

    /// Replaces every pixel with `color`.
    fn fill(&mut self, color: Color);

    /// Composites `source` with its top-left corner at `position`.
    ///
    /// `position` may be negative or past the surface edge; the source is
    /// clipped to the destination bounds.
    fn blit(&mut self, source: &Image, position: Point);
}
