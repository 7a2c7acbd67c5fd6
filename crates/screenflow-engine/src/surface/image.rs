use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

use crate::coords::{Point, Rect, Size};
use crate::paint::Color;

use super::Surface;

/// Owned RGBA8 raster in straight-alpha sRGB.
///
/// Backed by an `image::RgbaImage`, so the raw bytes can be uploaded to a
/// `Rgba8UnormSrgb` texture as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixels: RgbaImage,
}

impl Image {
    /// Creates a fully transparent image.
    pub fn new(size: Size) -> Self {
        Self { pixels: RgbaImage::new(size.width, size.height) }
    }

    /// Creates an image where every pixel is `color`.
    pub fn filled(size: Size, color: Color) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(size.width, size.height, to_rgba(color)),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::zero(), self.size())
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 {
            return None;
        }
        self.pixels
            .get_pixel_checked(x as u32, y as u32)
            .map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Composites `color` over the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(p) = self.pixels.get_pixel_mut_checked(x as u32, y as u32) {
            let dst = Color::rgba(p[0], p[1], p[2], p[3]);
            *p = to_rgba(color.over(dst));
        }
    }

    /// Replaces the pixels covered by `rect` (clipped to the image) with `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clip) = self.bounds().intersect(rect) else { return; };
        let px = to_rgba(color);
        for y in clip.origin.y..clip.max().y {
            for x in clip.origin.x..clip.max().x {
                self.pixels.put_pixel(x as u32, y as u32, px);
            }
        }
    }

    /// Raw RGBA8 bytes, row-major, no padding.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Writes the image as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.pixels
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

impl Surface for Image {
    fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }

    fn fill(&mut self, color: Color) {
        let px = to_rgba(color);
        for p in self.pixels.pixels_mut() {
            *p = px;
        }
    }

    fn blit(&mut self, source: &Image, position: Point) {
        let target = Rect::from_origin_size(position, source.size());
        let Some(clip) = self.bounds().intersect(target) else { return; };

        for y in clip.origin.y..clip.max().y {
            for x in clip.origin.x..clip.max().x {
                let s = source.pixels.get_pixel((x - position.x) as u32, (y - position.y) as u32);
                match s[3] {
                    255 => self.pixels.put_pixel(x as u32, y as u32, *s),
                    0 => {}
                    _ => self.blend_pixel(x, y, Color::rgba(s[0], s[1], s[2], s[3])),
                }
            }
        }
    }
}

#[inline]
fn to_rgba(c: Color) -> Rgba<u8> {
    Rgba([c.r, c.g, c.b, c.a])
}
