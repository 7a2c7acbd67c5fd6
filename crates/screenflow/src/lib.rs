//! screenflow: stack-based screen flows on top of `screenflow-engine`.
//!
//! A flow is a set of named screens (message, select, input, list or your
//! own types) described in a small XML document, styled with a CSS subset
//! and navigated with horizontal slide transitions.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use screenflow::prelude::*;
//!
//! Application::new()
//!     .title("Kiosk")
//!     .font("arial", std::fs::read("arial.ttf")?)
//!     .flow(r#"
//!         <screenflow>
//!           <screen name="welcome" type="message"><message>Touch to start</message></screen>
//!           <screen name="menu" type="select">
//!             <message>What now?</message>
//!             <option>Again</option>
//!             <option>Quit</option>
//!           </screen>
//!         </screenflow>"#)
//!     .stylesheet(".select button { background-color: navy }")
//!     .setup(|flow| {
//!         flow.screen_mut::<MessageScreen>("welcome")?
//!             .on_touch(|nav| nav.navigate_to("menu"));
//!         flow.screen_mut::<SelectScreen>("menu")?
//!             .on_select(|index, _, nav| if index == 0 { nav.navigate_back() } else { nav.quit() });
//!         Ok(())
//!     })
//!     .run("welcome")?;
//! ```
//!
//! # Custom screen types
//!
//! Implement [`Screen`](screens::Screen) and register a factory for its type
//! tag with [`ScreenFlow::register_factory`](flow::ScreenFlow::register_factory).
//! Definitions with `type="your-tag"` are then built by that factory.

pub mod app;
pub mod definition;
pub mod error;
pub mod flow;
pub mod navigator;
pub mod registry;
pub mod screens;
pub mod style;
pub mod text;
pub mod transition;
pub mod typeset;

#[cfg(test)]
mod testing;

/// Convenience re-exports for application code.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::definition::ScreenDef;
    pub use crate::error::{
        DefinitionError, FlowError, LookupError, NavigationError, RegistrationConflict,
    };
    pub use crate::flow::{FlowBackend, FlowConfig, FlowState, ScreenFlow};
    pub use crate::navigator::Navigator;
    pub use crate::screens::{
        EventResult, InputScreen, ListScreen, MessageScreen, Orientation, Screen, ScreenBase,
        ScreenContext, SelectScreen,
    };
    pub use crate::style::{ScreenStyle, StyleSheet};
    pub use crate::typeset::Typesetter;
    pub use screenflow_engine::coords::{Point, Rect, Size};
    pub use screenflow_engine::input::InputEvent;
    pub use screenflow_engine::paint::Color;
    pub use screenflow_engine::surface::{Image, Surface};
}
