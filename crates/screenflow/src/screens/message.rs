use std::any::Any;

use screenflow_engine::input::InputEvent;
use screenflow_engine::surface::{Image, Surface};

use crate::definition::ScreenDef;
use crate::error::{DefinitionError, ScreenError};
use crate::navigator::Navigator;
use crate::text::Message;

use super::draw::{block_size, draw_lines_centered, FontMeasure};
use super::{EventResult, Screen, ScreenBase, ScreenContext};

type TouchHandler = Box<dyn FnMut(&mut Navigator)>;

/// A wrapped message centered on the screen. Touching anywhere fires
/// [`on_touch`](MessageScreen::on_touch).
pub struct MessageScreen {
    base: ScreenBase,
    message: Message,
    on_touch: Option<TouchHandler>,
}

impl MessageScreen {
    pub const KIND: &'static str = "message";

    pub fn new(name: impl Into<String>, message: &str) -> Self {
        Self {
            base: ScreenBase::new(name, Self::KIND),
            message: Message::new(message),
            on_touch: None,
        }
    }

    /// Requires `message`.
    pub fn from_def(def: &ScreenDef) -> Result<Self, DefinitionError> {
        let mut screen = Self::new(def.name.as_str(), def.single("message")?);
        screen.base = ScreenBase::new(def.name.as_str(), def.kind.as_str());
        Ok(screen)
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn set_message(&mut self, text: &str) {
        self.message.set_text(text);
    }

    pub fn on_touch(&mut self, handler: impl FnMut(&mut Navigator) + 'static) -> &mut Self {
        self.on_touch = Some(Box::new(handler));
        self
    }
}

impl Screen for MessageScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn attach(&mut self, context: ScreenContext) {
        self.base.set_context(context);
        self.message.invalidate();
    }

    fn draw(&mut self, surface: &mut Image) -> Result<(), ScreenError> {
        let ctx = self.base.context()?;
        let (fonts, style) = (&*ctx.fonts, &ctx.style);

        surface.fill(style.background);
        let area = surface.bounds().inset(style.padding);
        let measure = FontMeasure { fonts, font: &style.primary };
        let lines = self.message.lines(&measure, area.size.width);

        let block = area.centered(block_size(fonts, &style.primary, lines));
        draw_lines_centered(surface, fonts, &style.primary, lines, block);
        Ok(())
    }

    fn on_event(&mut self, event: &InputEvent, nav: &mut Navigator) -> EventResult {
        match (event, self.on_touch.as_mut()) {
            (InputEvent::PointerButton(button), Some(handler)) if button.is_touch() => {
                handler(nav);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
