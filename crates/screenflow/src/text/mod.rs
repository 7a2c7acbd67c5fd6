//! Line wrapping for screen messages.

mod message;
mod wrap;

pub use message::Message;
pub use wrap::{normalize, wrap, wrap_paragraph, TextMeasure, WrappedText};
