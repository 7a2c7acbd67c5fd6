//! Screens: the named, typed pages a flow navigates between.
//!
//! Every screen owns a [`ScreenBase`] holding its name, its type tag and
//! the [`ScreenContext`] the flow injects when the screen is added. Drawing
//! before that point fails with [`ScreenError::Detached`].

use std::any::Any;
use std::rc::Rc;

use screenflow_engine::coords::Size;
use screenflow_engine::input::InputEvent;
use screenflow_engine::surface::Image;

use crate::error::ScreenError;
use crate::navigator::Navigator;
use crate::style::ScreenStyle;
use crate::typeset::Typesetter;

pub(crate) mod draw;
pub mod field;
pub mod input;
pub mod list;
pub mod message;
pub mod select;

pub use field::{FieldChange, TextField};
pub use input::InputScreen;
pub use list::{ItemRenderer, ListScreen};
pub use message::MessageScreen;
pub use select::{Orientation, SelectScreen};

/// Result returned by [`Screen::on_event`] and [`Screen::on_activated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Something changed; the screen needs a redraw.
    Consumed,
    /// Nothing to do.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

/// Collaborators shared by all screens of a flow.
#[derive(Clone)]
pub struct ScreenContext {
    pub fonts: Rc<dyn Typesetter>,
    pub style: ScreenStyle,
}

/// Identity and injected context common to every screen.
pub struct ScreenBase {
    name: String,
    kind: String,
    context: Option<ScreenContext>,
}

impl ScreenBase {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { name: name.into(), kind: kind.into(), context: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn set_context(&mut self, context: ScreenContext) {
        self.context = Some(context);
    }

    pub fn is_attached(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Result<&ScreenContext, ScreenError> {
        self.context
            .as_ref()
            .ok_or_else(|| ScreenError::Detached(self.name.clone()))
    }
}

/// A page of the flow.
///
/// Implement this for custom screen types and register a factory for them
/// with [`ScreenFlow::register_factory`](crate::flow::ScreenFlow::register_factory).
pub trait Screen: Any {
    fn base(&self) -> &ScreenBase;
    fn base_mut(&mut self) -> &mut ScreenBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    /// Type tag, e.g. `"message"`.
    fn kind(&self) -> &str {
        self.base().kind()
    }

    /// Called by the flow on registration and whenever the style changes.
    fn attach(&mut self, context: ScreenContext) {
        self.base_mut().set_context(context);
    }

    /// Renders the whole screen onto `surface`.
    fn draw(&mut self, surface: &mut Image) -> Result<(), ScreenError>;

    /// Renders the screen into a fresh image of `size`.
    fn generate_preview(&mut self, size: Size) -> Result<Image, ScreenError> {
        let mut preview = Image::new(size);
        self.draw(&mut preview)?;
        Ok(preview)
    }

    /// The flow is about to show this screen: it is the target of a
    /// navigation or the start screen. Runs before the preview is drawn.
    fn on_arriving(&mut self) {}

    /// The screen became the active one. `Consumed` asks for a redraw.
    fn on_activated(&mut self) -> EventResult {
        EventResult::Ignored
    }

    fn on_event(&mut self, event: &InputEvent, nav: &mut Navigator) -> EventResult;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
