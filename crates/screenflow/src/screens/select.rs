use std::any::Any;
use std::str::FromStr;

use screenflow_engine::coords::{Point, Rect};
use screenflow_engine::input::InputEvent;
use screenflow_engine::surface::{Image, Surface};

use crate::definition::ScreenDef;
use crate::error::{DefinitionError, ScreenError};
use crate::navigator::Navigator;
use crate::text::Message;

use super::draw::{
    block_size, button_size, cells, cells_size, draw_button, draw_lines_centered,
    stack_vertically, FontMeasure,
};
use super::{EventResult, Screen, ScreenBase, ScreenContext};

/// Gap between option buttons when the definition does not set `cellpadding`.
pub const DEFAULT_CELL_PADDING: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            other => Err(format!("expected `vertical` or `horizontal`, found `{other}`")),
        }
    }
}

type SelectHandler = Box<dyn FnMut(usize, &str, &mut Navigator)>;

/// A message above a row or column of option buttons.
///
/// All buttons share the size of the widest label. Buttons are separated by
/// the cell padding, so `n` options have `n - 1` gaps.
pub struct SelectScreen {
    base: ScreenBase,
    message: Message,
    options: Vec<String>,
    orientation: Orientation,
    cell_padding: u32,
    /// Button rectangles from the last draw, for hit testing.
    option_rects: Vec<Rect>,
    on_select: Option<SelectHandler>,
}

impl SelectScreen {
    pub const KIND: &'static str = "select";

    /// Fails with fewer than two options.
    pub fn new(
        name: impl Into<String>,
        message: &str,
        options: Vec<String>,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        if options.len() < 2 {
            return Err(DefinitionError::InvalidValue {
                screen: name,
                key: "option".to_string(),
                value: options.join(", "),
                reason: "a select screen needs at least two options".to_string(),
            });
        }
        Ok(Self {
            base: ScreenBase::new(name, Self::KIND),
            message: Message::new(message),
            options,
            orientation: Orientation::default(),
            cell_padding: DEFAULT_CELL_PADDING,
            option_rects: Vec::new(),
            on_select: None,
        })
    }

    /// Requires `message` and at least two `option`s. Optional
    /// `orientation` and `cellpadding`.
    pub fn from_def(def: &ScreenDef) -> Result<Self, DefinitionError> {
        let mut screen = Self::new(def.name.as_str(), def.single("message")?, def.list("option")?.to_vec())?;
        screen.base = ScreenBase::new(def.name.as_str(), def.kind.as_str());
        if let Some(orientation) = def.parse("orientation")? {
            screen.orientation = orientation;
        }
        if let Some(padding) = def.parse("cellpadding")? {
            screen.cell_padding = padding;
        }
        Ok(screen)
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_cell_padding(mut self, padding: u32) -> Self {
        self.cell_padding = padding;
        self
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cell_padding(&self) -> u32 {
        self.cell_padding
    }

    /// Where each option was drawn last time. Empty before the first draw.
    pub fn option_rects(&self) -> &[Rect] {
        &self.option_rects
    }

    /// Called with the option index and label when an option is touched.
    pub fn on_select(
        &mut self,
        handler: impl FnMut(usize, &str, &mut Navigator) + 'static,
    ) -> &mut Self {
        self.on_select = Some(Box::new(handler));
        self
    }
}

impl Screen for SelectScreen {
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
        let horizontal = self.orientation == Orientation::Horizontal;

        surface.fill(style.background);
        let area = surface.bounds().inset(style.padding);

        let measure = FontMeasure { fonts, font: &style.primary };
        let lines = self.message.lines(&measure, area.size.width);
        let text = block_size(fonts, &style.primary, lines);

        let cell = button_size(fonts, &style.button, self.options.iter().map(String::as_str));
        let grid = cells_size(self.options.len(), cell, self.cell_padding, horizontal);

        let tops = stack_vertically(area, &[text.height, grid.height], style.padding);
        let text_area = Rect::new(area.origin.x, tops[0], area.size.width, text.height);
        draw_lines_centered(surface, fonts, &style.primary, lines, text_area);

        let center_x = area.origin.x + area.size.width as i32 / 2;
        let rects = cells(self.options.len(), cell, self.cell_padding, horizontal, center_x, tops[1]);
        for (label, rect) in self.options.iter().zip(&rects) {
            draw_button(surface, fonts, &style.button, label, *rect);
        }
        self.option_rects = rects;
        Ok(())
    }

    fn on_event(&mut self, event: &InputEvent, nav: &mut Navigator) -> EventResult {
        let InputEvent::PointerButton(button) = event else {
            return EventResult::Ignored;
        };
        if !button.is_touch() {
            return EventResult::Ignored;
        }

        let point = Point::from_f32(button.x, button.y);
        let Some(index) = self.option_rects.iter().position(|r| r.contains(point)) else {
            return EventResult::Ignored;
        };
        log::debug!("{}: option {index} selected", self.base.name());
        match self.on_select.as_mut() {
            Some(handler) => {
                handler(index, &self.options[index], nav);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
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

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn attached(orientation: Orientation, labels: &[&str]) -> SelectScreen {
        let mut screen = SelectScreen::new("menu", "Pick", options(labels))
            .unwrap()
            .with_orientation(orientation);
        screen.attach(context());
        screen.generate_preview(Size::new(300, 300)).unwrap();
        screen
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn needs_two_options() {
        assert!(SelectScreen::new("s", "m", options(&["only"])).is_err());
        assert!(SelectScreen::new("s", "m", options(&["a", "b"])).is_ok());
    }

    #[test]
    fn from_def_reads_layout_keys() {
        let def = ScreenDef::new("s", "select")
            .with("message", "m")
            .with("option", "a")
            .with("option", "b")
            .with("orientation", "Horizontal")
            .with("cellpadding", "4");
        let screen = SelectScreen::from_def(&def).unwrap();
        assert_eq!(screen.orientation(), Orientation::Horizontal);
        assert_eq!(screen.cell_padding(), 4);
        assert_eq!(screen.options(), ["a", "b"]);
    }

    #[test]
    fn from_def_rejects_bad_orientation_and_single_option() {
        let base = ScreenDef::new("s", "select").with("message", "m");
        let single = base.clone().with("option", "a");
        assert!(matches!(SelectScreen::from_def(&single), Err(DefinitionError::ExpectedList { .. })));

        let diagonal = base.with("option", "a").with("option", "b").with("orientation", "diagonal");
        assert!(matches!(SelectScreen::from_def(&diagonal), Err(DefinitionError::InvalidValue { .. })));
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn vertical_options_are_stacked_below_the_message() {
        let screen = attached(Orientation::Vertical, &["yes", "no"]);
        // 70x55 cells (30x15 label + 20 padding), 10px apart, centered on x=150.
        assert_eq!(screen.option_rects(), [Rect::new(115, 107, 70, 55), Rect::new(115, 172, 70, 55)]);
    }

    #[test]
    fn horizontal_options_share_a_row() {
        let screen = attached(Orientation::Horizontal, &["yes", "no"]);
        assert_eq!(screen.option_rects(), [Rect::new(75, 140, 70, 55), Rect::new(155, 140, 70, 55)]);
    }

    #[test]
    fn n_options_have_n_minus_one_gaps() {
        let screen = attached(Orientation::Vertical, &["a", "b", "c"]);
        let rects = screen.option_rects();
        let span = rects[2].max().y - rects[0].min().y;
        assert_eq!(span, 3 * rects[0].size.height as i32 + 2 * DEFAULT_CELL_PADDING as i32);
    }

    #[test]
    fn buttons_are_painted() {
        let mut screen = SelectScreen::new("menu", "Pick", options(&["yes", "no"])).unwrap();
        screen.attach(context());
        let preview = screen.generate_preview(Size::new(300, 300)).unwrap();
        assert_eq!(preview.pixel(115, 107), Some(Color::BLACK));
        assert_eq!(preview.pixel(114, 107), Some(Color::WHITE));
        // Label "no" (20x15) centered in the second button.
        assert_eq!(preview.pixel(140, 192), Some(Color::WHITE));
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn touching_an_option_reports_index_and_label() {
        let mut screen = attached(Orientation::Vertical, &["yes", "no"]);
        let picked = Rc::new(RefCell::new(None));
        let sink = picked.clone();
        screen.on_select(move |i, label, nav| {
            *sink.borrow_mut() = Some((i, label.to_string()));
            nav.navigate_back();
        });

        let mut nav = Navigator::default();
        assert_eq!(screen.on_event(&InputEvent::touch(150.0, 200.0), &mut nav), EventResult::Consumed);
        assert_eq!(*picked.borrow(), Some((1, "no".to_string())));
        assert_eq!(nav.commands(), [NavCommand::NavigateBack]);
    }

    #[test]
    fn touching_a_gap_does_nothing() {
        let mut screen = attached(Orientation::Vertical, &["yes", "no"]);
        screen.on_select(|_, _, nav| nav.quit());
        let mut nav = Navigator::default();
        assert_eq!(screen.on_event(&InputEvent::touch(150.0, 165.0), &mut nav), EventResult::Ignored);
        assert!(nav.is_empty());
    }
}
