//! GPU presentation.
//!
//! All drawing happens on the CPU into a [`crate::surface::Image`]; the only
//! GPU work is uploading that image and stretching it over the swapchain.

mod ctx;
mod present;

pub use ctx::{RenderCtx, RenderTarget};
pub use present::Presenter;
