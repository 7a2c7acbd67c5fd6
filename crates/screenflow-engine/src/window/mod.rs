//! Window + runtime loop.
//!
//! Owns the winit event loop and the presentation window.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
