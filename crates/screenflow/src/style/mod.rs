//! Screen styling: partial style layers, the stylesheet that cascades them,
//! and the resolved style screens draw with.

mod property;
mod sheet;
mod types;

pub use property::{parse_color, parse_length, PropertyParser, StyleTarget, MAX_LENGTH};
pub use sheet::{StyleSheet, GLOBAL_SELECTOR};
pub use types::{
    BoxStyle, ButtonStyle, FontStyle, ResolvedButton, ResolvedFont, ScreenStyle, StyleSet,
    DEFAULT_FONT_FAMILY,
};
