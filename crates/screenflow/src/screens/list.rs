use std::any::Any;

use screenflow_engine::coords::{Point, Rect, Size};
use screenflow_engine::input::{InputEvent, Key, KeyState};
use screenflow_engine::surface::{Image, Surface};

use crate::definition::ScreenDef;
use crate::error::{DefinitionError, ScreenError};
use crate::navigator::Navigator;
use crate::text::Message;

use super::draw::{block_size, draw_lines_centered, draw_text, FontMeasure};
use super::select::{Orientation, DEFAULT_CELL_PADDING};
use super::{EventResult, Screen, ScreenBase, ScreenContext};

type ItemHandler = Box<dyn FnMut(usize, &str, &mut Navigator)>;
type ItemProvider = Box<dyn FnMut() -> Vec<String>>;

/// Draws item `index` into its cell. The cell is pre-filled with the screen
/// background; separators are drawn afterwards.
pub type ItemRenderer = Box<dyn FnMut(usize, &str, &ScreenContext, &mut Image)>;

/// A scrollable row or column of items under an optional label.
///
/// Items are either fixed or produced by a provider that is called again
/// every time the flow is about to show the screen, so the sliding preview
/// already has them. Touching an item calls
/// [`on_item_select`](ListScreen::on_item_select).
pub struct ListScreen {
    base: ScreenBase,
    label: Option<Message>,
    items: Vec<String>,
    provider: Option<ItemProvider>,
    renderer: Option<ItemRenderer>,
    orientation: Orientation,
    cell_padding: u32,
    /// Pixels scrolled along the list axis.
    scroll: u32,
    /// Item area and item extent along the list axis from the last draw.
    viewport: Rect,
    item_extent: u32,
    on_item_select: Option<ItemHandler>,
}

impl ListScreen {
    pub const KIND: &'static str = "list";

    pub fn new(name: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            base: ScreenBase::new(name, Self::KIND),
            label: None,
            items,
            provider: None,
            renderer: None,
            orientation: Orientation::Vertical,
            cell_padding: DEFAULT_CELL_PADDING,
            scroll: 0,
            viewport: Rect::default(),
            item_extent: 0,
            on_item_select: None,
        }
    }

    /// Optional `label`, any number of `item`s, `orientation` and
    /// `cellpadding`.
    pub fn from_def(def: &ScreenDef) -> Result<Self, DefinitionError> {
        let mut screen = Self::new(def.name.as_str(), def.values("item").to_vec());
        screen.base = ScreenBase::new(def.name.as_str(), def.kind.as_str());
        screen.label = def.optional("label")?.map(Message::new);
        if let Some(orientation) = def.parse("orientation")? {
            screen.orientation = orientation;
        }
        if let Some(padding) = def.parse("cellpadding")? {
            screen.cell_padding = padding;
        }
        Ok(screen)
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(Message::new(label));
        self
    }

    pub fn with_cell_padding(mut self, padding: u32) -> Self {
        self.cell_padding = padding;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn label(&self) -> Option<&Message> {
        self.label.as_ref()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Replaces the items and scrolls back to the start.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.scroll = 0;
    }

    /// Source of items, queried each time the screen is about to be shown.
    pub fn set_provider(&mut self, provider: impl FnMut() -> Vec<String> + 'static) -> &mut Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Replaces the default one-line text cell.
    pub fn set_renderer(
        &mut self,
        renderer: impl FnMut(usize, &str, &ScreenContext, &mut Image) + 'static,
    ) -> &mut Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Pulls fresh items from the provider. Returns `false` without one.
    pub fn refresh(&mut self) -> bool {
        let Some(provider) = self.provider.as_mut() else {
            return false;
        };
        let items = provider();
        log::debug!("{}: refreshed {} items", self.base.name(), items.len());
        self.set_items(items);
        true
    }

    pub fn on_item_select(
        &mut self,
        handler: impl FnMut(usize, &str, &mut Navigator) + 'static,
    ) -> &mut Self {
        self.on_item_select = Some(Box::new(handler));
        self
    }

    pub fn scroll_offset(&self) -> u32 {
        self.scroll
    }

    fn horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    /// Viewport length along the list axis.
    fn viewport_extent(&self) -> u32 {
        if self.horizontal() { self.viewport.size.width } else { self.viewport.size.height }
    }

    /// Largest scroll offset for the last drawn viewport.
    pub fn max_scroll(&self) -> u32 {
        let len = u32::try_from(self.items.len()).unwrap_or(u32::MAX);
        self.item_extent.saturating_mul(len).saturating_sub(self.viewport_extent())
    }

    /// Scrolls by `delta` pixels (positive moves towards the end), clamped.
    /// Returns whether the offset changed.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let target = (self.scroll as i64 + delta as i64).clamp(0, self.max_scroll() as i64) as u32;
        let changed = target != self.scroll;
        self.scroll = target;
        changed
    }

    /// Index of the item drawn under `point`, if any.
    pub fn item_at(&self, point: Point) -> Option<usize> {
        if !self.viewport.contains(point) || self.item_extent == 0 {
            return None;
        }
        let offset = if self.horizontal() {
            point.x.abs_diff(self.viewport.origin.x)
        } else {
            point.y.abs_diff(self.viewport.origin.y)
        };
        let index = (u64::from(offset) + u64::from(self.scroll)) / u64::from(self.item_extent);
        usize::try_from(index).ok().filter(|i| *i < self.items.len())
    }

    fn on_key(&mut self, key: Key) -> EventResult {
        let step = i32::try_from(self.item_extent).unwrap_or(i32::MAX);
        let page = i32::try_from(self.viewport_extent()).unwrap_or(i32::MAX);
        let (back, forward) = if self.horizontal() {
            (Key::ArrowLeft, Key::ArrowRight)
        } else {
            (Key::ArrowUp, Key::ArrowDown)
        };
        let changed = match key {
            k if k == forward => self.scroll_by(step),
            k if k == back => self.scroll_by(-step),
            Key::PageDown => self.scroll_by(page),
            Key::PageUp => self.scroll_by(-page),
            Key::Home => self.scroll_by(i32::MIN),
            Key::End => self.scroll_by(i32::MAX),
            _ => return EventResult::Ignored,
        };
        if changed { EventResult::Consumed } else { EventResult::Ignored }
    }

    /// Extent of one item along the list axis.
    fn measure_extent(&self, ctx: &ScreenContext) -> u32 {
        let (fonts, font) = (&*ctx.fonts, &ctx.style.primary);
        let content = if self.horizontal() {
            self.items.iter().map(|item| fonts.measure(item, font).width).max().unwrap_or(0)
        } else {
            fonts.line_height(font)
        };
        content.saturating_add(self.cell_padding).max(1)
    }
}

impl Screen for ListScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn attach(&mut self, context: ScreenContext) {
        self.base.set_context(context);
        if let Some(label) = self.label.as_mut() {
            label.invalidate();
        }
    }

    fn draw(&mut self, surface: &mut Image) -> Result<(), ScreenError> {
        let ctx = self.base.context()?.clone();
        let (fonts, style) = (&*ctx.fonts, &ctx.style);

        surface.fill(style.background);
        let area = surface.bounds().inset(style.padding);
        let mut top = area.origin.y;

        if let Some(label) = self.label.as_mut() {
            let measure = FontMeasure { fonts, font: &style.primary };
            let lines = label.lines(&measure, area.size.width);
            let block = block_size(fonts, &style.primary, lines);
            let label_area = Rect::new(area.origin.x, top, area.size.width, block.height);
            draw_lines_centered(surface, fonts, &style.primary, lines, label_area);
            let gap = block.height.saturating_add(style.padding);
            top = top.saturating_add(i32::try_from(gap).unwrap_or(i32::MAX));
        }

        let height = area.max().y.saturating_sub(top).max(0) as u32;
        self.viewport = Rect::new(area.origin.x, top, area.size.width, height);
        self.item_extent = self.measure_extent(&ctx);
        self.scroll = self.scroll.min(self.max_scroll());

        let horizontal = self.horizontal();
        let extent = self.item_extent;
        let viewport_extent = i64::from(self.viewport_extent());
        let cell_size = if horizontal {
            Size::new(extent, self.viewport.size.height)
        } else {
            Size::new(self.viewport.size.width, extent)
        };
        let at = |main: i32| if horizontal { Point::new(main, 0) } else { Point::new(0, main) };

        let mut cells = Image::filled(self.viewport.size, style.background);
        let text_offset = (self.cell_padding / 2).min(i32::MAX as u32) as i32;
        for (i, item) in self.items.iter().enumerate() {
            let start = i as i64 * i64::from(extent) - i64::from(self.scroll);
            if start >= viewport_extent {
                break;
            }
            if start + i64::from(extent) < 0 {
                continue;
            }
            let start = start.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;

            let mut cell = Image::filled(cell_size, style.background);
            match self.renderer.as_mut() {
                Some(render) => render(i, item, &ctx, &mut cell),
                None => draw_text(&mut cell, fonts, &style.primary, item, at(text_offset)),
            }
            cells.blit(&cell, at(start));

            if i + 1 < self.items.len() {
                let edge = start.saturating_add(i32::try_from(extent).unwrap_or(i32::MAX) - 1);
                let separator = if horizontal {
                    Rect::new(edge, 0, 1, self.viewport.size.height)
                } else {
                    Rect::new(0, edge, self.viewport.size.width, 1)
                };
                cells.fill_rect(separator, style.secondary.color);
            }
        }
        surface.blit(&cells, self.viewport.origin);
        Ok(())
    }

    fn on_arriving(&mut self) {
        self.refresh();
    }

    fn on_event(&mut self, event: &InputEvent, nav: &mut Navigator) -> EventResult {
        match event {
            InputEvent::MouseWheel { delta, .. } => {
                // Wheel up (positive) reveals earlier items.
                let extent = self.item_extent as f32;
                let mut pixels = delta.vertical_pixels(extent);
                if self.horizontal() && delta.horizontal_pixels(extent) != 0.0 {
                    pixels = delta.horizontal_pixels(extent);
                }
                if self.scroll_by(-pixels.round() as i32) {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            InputEvent::Key { key, state: KeyState::Pressed, .. } => self.on_key(*key),
            InputEvent::PointerButton(button) if button.is_touch() => {
                let Some(index) = self.item_at(Point::from_f32(button.x, button.y)) else {
                    return EventResult::Ignored;
                };
                match self.on_item_select.as_mut() {
                    Some(handler) => {
                        handler(index, &self.items[index], nav);
                        EventResult::Consumed
                    }
                    None => EventResult::Ignored,
                }
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

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use screenflow_engine::coords::Size;
    use screenflow_engine::input::{Modifiers, MouseWheelDelta};
    use screenflow_engine::paint::Color;

    use super::*;
    use crate::screens::Orientation;
    use crate::testing::context;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item {i}")).collect()
    }

    fn drawn(mut screen: ListScreen) -> ListScreen {
        screen.attach(context());
        screen.generate_preview(Size::new(200, 200)).unwrap();
        screen
    }

    fn wheel(y: f32) -> InputEvent {
        InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y }, modifiers: Modifiers::default() }
    }

    // ── definition ────────────────────────────────────────────────────────

    #[test]
    fn from_def_accepts_zero_one_or_many_items() {
        let none = ListScreen::from_def(&ScreenDef::new("l", "list")).unwrap();
        assert!(none.items().is_empty());
        let one = ListScreen::from_def(&ScreenDef::new("l", "list").with("item", "a")).unwrap();
        assert_eq!(one.items(), ["a"]);
        let def = ScreenDef::new("l", "list").with("item", "a").with("item", "b").with("label", "Pick");
        let many = ListScreen::from_def(&def).unwrap();
        assert_eq!(many.items(), ["a", "b"]);
        assert_eq!(many.label().map(Message::text).as_deref(), Some("Pick"));
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn rows_fill_the_padded_area() {
        let screen = drawn(ListScreen::new("l", items(3)));
        // 15px lines plus 10px cell padding.
        assert_eq!(screen.item_at(Point::new(30, 20)), Some(0));
        assert_eq!(screen.item_at(Point::new(30, 73)), Some(2));
        assert_eq!(screen.item_at(Point::new(30, 100)), None);
        assert_eq!(screen.max_scroll(), 0);
    }

    #[test]
    fn label_pushes_rows_down() {
        let screen = drawn(ListScreen::new("l", items(3)).with_label("Pick"));
        assert_eq!(screen.item_at(Point::new(30, 54)), None);
        assert_eq!(screen.item_at(Point::new(30, 55)), Some(0));
    }

    #[test]
    fn rows_are_painted_with_separators() {
        let mut screen = ListScreen::new("l", items(2));
        screen.attach(context());
        let preview = screen.generate_preview(Size::new(200, 200)).unwrap();
        assert_eq!(preview.pixel(20, 25), Some(Color::BLACK));
        assert_eq!(preview.pixel(100, 44), Some(Color::GRAY));
        assert_eq!(preview.pixel(100, 69), Some(Color::WHITE));
    }

    // ── scrolling ─────────────────────────────────────────────────────────

    #[test]
    fn wheel_and_keys_scroll_within_bounds() {
        let mut screen = drawn(ListScreen::new("l", items(10)));
        let mut nav = Navigator::default();
        assert_eq!(screen.max_scroll(), 90);

        assert_eq!(screen.on_event(&wheel(-1.0), &mut nav), EventResult::Consumed);
        assert_eq!(screen.scroll_offset(), 25);
        assert_eq!(screen.on_event(&InputEvent::key_press(Key::End), &mut nav), EventResult::Consumed);
        assert_eq!(screen.scroll_offset(), 90);
        assert_eq!(screen.on_event(&InputEvent::key_press(Key::ArrowDown), &mut nav), EventResult::Ignored);
        assert_eq!(screen.on_event(&wheel(2.0), &mut nav), EventResult::Consumed);
        assert_eq!(screen.scroll_offset(), 40);
        screen.on_event(&InputEvent::key_press(Key::Home), &mut nav);
        assert_eq!(screen.scroll_offset(), 0);
    }

    #[test]
    fn touch_accounts_for_scroll() {
        let mut screen = drawn(ListScreen::new("l", items(10)));
        let picked = Rc::new(Cell::new(None));
        let sink = picked.clone();
        screen.on_item_select(move |i, _, _| sink.set(Some(i)));
        screen.scroll_by(50);

        let mut nav = Navigator::default();
        assert_eq!(screen.on_event(&InputEvent::touch(30.0, 21.0), &mut nav), EventResult::Consumed);
        assert_eq!(picked.get(), Some(2));
    }

    // ── orientation ───────────────────────────────────────────────────────

    #[test]
    fn from_def_reads_orientation() {
        let def = ScreenDef::new("l", "list").with("orientation", "horizontal");
        assert_eq!(ListScreen::from_def(&def).unwrap().orientation(), Orientation::Horizontal);
        let bad = ScreenDef::new("l", "list").with("orientation", "diagonal");
        assert!(ListScreen::from_def(&bad).is_err());
    }

    #[test]
    fn horizontal_items_are_columns() {
        // "item 0" is 60px wide, so columns are 70px with the cell padding.
        let mut screen = drawn(ListScreen::new("l", items(4)).with_orientation(Orientation::Horizontal));
        assert_eq!(screen.item_at(Point::new(20, 100)), Some(0));
        assert_eq!(screen.item_at(Point::new(89, 30)), Some(0));
        assert_eq!(screen.item_at(Point::new(90, 30)), Some(1));
        assert_eq!(screen.max_scroll(), 4 * 70 - 160);

        let mut nav = Navigator::default();
        assert_eq!(screen.on_event(&InputEvent::key_press(Key::ArrowRight), &mut nav), EventResult::Consumed);
        assert_eq!(screen.scroll_offset(), 70);
        assert_eq!(screen.on_event(&InputEvent::key_press(Key::ArrowDown), &mut nav), EventResult::Ignored);
        assert_eq!(screen.item_at(Point::new(20, 100)), Some(1));
    }

    #[test]
    fn horizontal_separators_are_vertical_lines() {
        let mut screen = ListScreen::new("l", items(2)).with_orientation(Orientation::Horizontal);
        screen.attach(context());
        let preview = screen.generate_preview(Size::new(200, 200)).unwrap();
        assert_eq!(preview.pixel(89, 150), Some(Color::GRAY));
        assert_eq!(preview.pixel(25, 20), Some(Color::BLACK));
    }

    // ── renderer ──────────────────────────────────────────────────────────

    #[test]
    fn custom_renderer_draws_every_visible_cell() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut screen = ListScreen::new("l", items(3));
        screen.set_renderer(move |i, item, ctx, cell| {
            log.borrow_mut().push((i, item.to_string(), cell.size()));
            cell.fill(ctx.style.secondary.color);
        });
        screen.attach(context());
        let preview = screen.generate_preview(Size::new(200, 200)).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1], (1, "item 1".to_string(), Size::new(160, 25)));
        // The default text is not drawn.
        assert_eq!(preview.pixel(20, 25), Some(Color::GRAY));
    }

    // ── provider ──────────────────────────────────────────────────────────

    #[test]
    fn provider_runs_on_every_arrival() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut screen = ListScreen::new("l", Vec::new());
        screen.set_provider(move || {
            counter.set(counter.get() + 1);
            items(counter.get())
        });

        screen.on_arriving();
        screen.on_arriving();
        assert_eq!(calls.get(), 2);
        assert_eq!(screen.items().len(), 2);
        assert_eq!(screen.on_activated(), EventResult::Ignored);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn static_items_survive_arrival() {
        let mut screen = ListScreen::new("l", items(1));
        screen.on_arriving();
        assert_eq!(screen.items(), ["item 0"]);
    }
}
