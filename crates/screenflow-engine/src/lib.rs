//! screenflow engine crate.
//!
//! Platform and presentation pieces used by the screen flow library: pixel
//! geometry, colors, CPU raster surfaces, font rasterization, platform-neutral
//! input, and a winit + wgpu runtime that shows a CPU framebuffer in a window.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod surface;
pub mod text;
pub mod window;
