//! Runtime-facing application contract.
//!
//! Higher layers implement [`App`]; the window runtime calls it with a
//! [`FrameCtx`] per frame. No winit internals leak beyond these types.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
