use std::any::Any;

use screenflow_engine::coords::{Point, Rect};
use screenflow_engine::input::{InputEvent, Key, KeyState};
use screenflow_engine::surface::{Image, Surface};

use crate::definition::ScreenDef;
use crate::error::{DefinitionError, ScreenError};
use crate::navigator::Navigator;
use crate::text::Message;

use super::draw::{
    block_size, button_size, draw_button, draw_lines_centered, stack_vertically, FontMeasure,
};
use super::field::{FieldChange, TextField};
use super::{EventResult, Screen, ScreenBase, ScreenContext};

pub const DEFAULT_SUBMIT_LABEL: &str = "OK";

type SubmitHandler = Box<dyn FnMut(&str, &mut Navigator)>;

/// A prompt, a single-line text field and a submit button.
///
/// Typed text goes into the field. Enter or touching the button calls
/// [`on_submit`](InputScreen::on_submit) with the current value.
pub struct InputScreen {
    base: ScreenBase,
    message: Message,
    placeholder: Option<String>,
    submit_label: String,
    field: TextField,
    field_rect: Rect,
    submit_rect: Rect,
    on_submit: Option<SubmitHandler>,
}

impl InputScreen {
    pub const KIND: &'static str = "input";

    pub fn new(name: impl Into<String>, message: &str) -> Self {
        Self {
            base: ScreenBase::new(name, Self::KIND),
            message: Message::new(message),
            placeholder: None,
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
            field: TextField::default(),
            field_rect: Rect::default(),
            submit_rect: Rect::default(),
            on_submit: None,
        }
    }

    /// Requires `message`. Optional `placeholder`, `submit` and `maxlength`.
    pub fn from_def(def: &ScreenDef) -> Result<Self, DefinitionError> {
        let mut screen = Self::new(def.name.as_str(), def.single("message")?);
        screen.base = ScreenBase::new(def.name.as_str(), def.kind.as_str());
        screen.placeholder = def.optional("placeholder")?.map(str::to_string);
        if let Some(label) = def.optional("submit")? {
            screen.submit_label = label.to_string();
        }
        screen.field = TextField::new(def.parse("maxlength")?);
        Ok(screen)
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        let value = self.field.text().to_string();
        self.field = TextField::new(Some(max_length));
        self.field.set_text(&value);
        self
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn value(&self) -> &str {
        self.field.text()
    }

    pub fn set_value(&mut self, value: &str) {
        self.field.set_text(value);
    }

    pub fn clear(&mut self) {
        self.field.set_text("");
    }

    pub fn max_length(&self) -> Option<usize> {
        self.field.max_length()
    }

    /// Button rectangle from the last draw.
    pub fn submit_rect(&self) -> Rect {
        self.submit_rect
    }

    pub fn field_rect(&self) -> Rect {
        self.field_rect
    }

    pub fn on_submit(&mut self, handler: impl FnMut(&str, &mut Navigator) + 'static) -> &mut Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    fn submit(&mut self, nav: &mut Navigator) -> EventResult {
        let Some(handler) = self.on_submit.as_mut() else {
            return EventResult::Ignored;
        };
        log::debug!("{}: submitted {:?}", self.base.name(), self.field.text());
        handler(self.field.text(), nav);
        EventResult::Consumed
    }
}

impl Screen for InputScreen {
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
        let text = block_size(fonts, &style.primary, lines);

        let inset = style.button.padding / 2;
        let field_height = fonts.line_height(&style.primary) + 2 * inset;
        let button = button_size(fonts, &style.button, [self.submit_label.as_str()]);

        let tops = stack_vertically(area, &[text.height, field_height, button.height], style.padding);
        let text_area = Rect::new(area.origin.x, tops[0], area.size.width, text.height);
        draw_lines_centered(surface, fonts, &style.primary, lines, text_area);

        // Field: 1px border in the primary color around the screen background.
        let field = Rect::new(area.origin.x, tops[1], area.size.width, field_height);
        surface.fill_rect(field, style.primary.color);
        let inner = field.inset(1);
        let mut content = Image::filled(inner.size, style.background);

        let value = self.field.text();
        let text_x = inset.saturating_sub(1) as i32;
        if value.is_empty() {
            if let Some(placeholder) = &self.placeholder {
                let image = fonts.render(placeholder, &style.secondary);
                let y = (inner.size.height as i32 - image.height() as i32) / 2;
                content.blit(&image, Point::new(text_x, y));
            }
        }

        // Scroll so the caret stays inside the field.
        let caret = fonts.measure(&value[..self.field.cursor()], &style.primary).width as i32;
        let visible = inner.size.width as i32 - 2 * text_x;
        let scroll = (caret - visible + 1).max(0);
        let line_height = fonts.line_height(&style.primary);
        let line_top = (inner.size.height as i32 - line_height as i32) / 2;
        if !value.is_empty() {
            let image = fonts.render(value, &style.primary);
            content.blit(&image, Point::new(text_x - scroll, line_top));
        }
        content.fill_rect(
            Rect::new(text_x + caret - scroll, line_top, 1, line_height),
            style.primary.color,
        );
        surface.blit(&content, inner.origin);

        let center_x = area.origin.x + area.size.width as i32 / 2;
        let submit = Rect::from_origin_size(Point::new(center_x - button.width as i32 / 2, tops[2]), button);
        draw_button(surface, fonts, &style.button, &self.submit_label, submit);

        self.field_rect = field;
        self.submit_rect = submit;
        Ok(())
    }

    fn on_event(&mut self, event: &InputEvent, nav: &mut Navigator) -> EventResult {
        match event {
            InputEvent::Key { key: Key::Enter, state: KeyState::Pressed, .. } => self.submit(nav),
            InputEvent::PointerButton(button) if button.is_touch() => {
                if self.submit_rect.contains(Point::from_f32(button.x, button.y)) {
                    self.submit(nav)
                } else {
                    EventResult::Ignored
                }
            }
            _ => match self.field.on_event(event) {
                FieldChange::Ignored => EventResult::Ignored,
                FieldChange::Handled | FieldChange::Edited => EventResult::Consumed,
            },
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use screenflow_engine::coords::Size;
    use screenflow_engine::paint::Color;

    use super::*;
    use crate::navigator::NavCommand;
    use crate::testing::context;

    fn attached() -> InputScreen {
        let mut screen = InputScreen::new("ask", "Your name?").with_placeholder("name");
        screen.attach(context());
        screen.generate_preview(Size::new(300, 300)).unwrap();
        screen
    }

    fn capture(screen: &mut InputScreen) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        screen.on_submit(move |value, nav| {
            sink.borrow_mut().push(value.to_string());
            nav.navigate_to("thanks");
        });
        seen
    }

    // ── definition ────────────────────────────────────────────────────────

    #[test]
    fn from_def_reads_optional_keys() {
        let def = ScreenDef::new("ask", "input")
            .with("message", "Name?")
            .with("placeholder", "type here")
            .with("submit", "Go")
            .with("maxlength", "8");
        let screen = InputScreen::from_def(&def).unwrap();
        assert_eq!(screen.placeholder(), Some("type here"));
        assert_eq!(screen.submit_label(), "Go");
        assert_eq!(screen.max_length(), Some(8));
    }

    #[test]
    fn defaults_without_optional_keys() {
        let def = ScreenDef::new("ask", "input").with("message", "Name?");
        let screen = InputScreen::from_def(&def).unwrap();
        assert_eq!(screen.submit_label(), DEFAULT_SUBMIT_LABEL);
        assert_eq!(screen.max_length(), None);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn field_spans_the_padded_width() {
        let screen = attached();
        // Heights 15 (message), 35 (field) and 55 (button) with 20px gaps,
        // centered in the 260px padded area.
        assert_eq!(screen.field_rect(), Rect::new(20, 112, 260, 35));
        assert_eq!(screen.submit_rect(), Rect::new(120, 167, 60, 55));
    }

    #[test]
    fn field_border_uses_primary_color() {
        let mut screen = attached();
        let preview = screen.generate_preview(Size::new(300, 300)).unwrap();
        assert_eq!(preview.pixel(20, 112), Some(Color::BLACK));
        assert_eq!(preview.pixel(200, 100), Some(Color::WHITE));
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn typing_and_backspace_edit_the_value() {
        let mut screen = attached();
        let mut nav = Navigator::default();
        assert_eq!(screen.on_event(&InputEvent::text("Ada"), &mut nav), EventResult::Consumed);
        screen.on_event(&InputEvent::key_press(Key::Backspace), &mut nav);
        assert_eq!(screen.value(), "Ad");
        assert!(nav.is_empty());
    }

    #[test]
    fn enter_submits_current_value() {
        let mut screen = attached();
        let seen = capture(&mut screen);
        let mut nav = Navigator::default();
        screen.set_value("Grace");
        assert_eq!(screen.on_event(&InputEvent::key_press(Key::Enter), &mut nav), EventResult::Consumed);
        assert_eq!(*seen.borrow(), ["Grace"]);
        assert_eq!(nav.commands(), [NavCommand::NavigateTo("thanks".into())]);
    }

    #[test]
    fn touching_the_button_submits() {
        let mut screen = attached();
        let seen = capture(&mut screen);
        let mut nav = Navigator::default();
        assert_eq!(screen.on_event(&InputEvent::touch(10.0, 10.0), &mut nav), EventResult::Ignored);
        assert_eq!(screen.on_event(&InputEvent::touch(140.0, 170.0), &mut nav), EventResult::Consumed);
        assert_eq!(*seen.borrow(), [""]);
    }

    #[test]
    fn long_values_still_draw() {
        let mut screen = attached();
        screen.set_value(&"w".repeat(100));
        assert!(screen.generate_preview(Size::new(300, 300)).is_ok());
    }
}
