use screenflow_engine::paint::Color;

pub const DEFAULT_FONT_FAMILY: &str = "arial";

// ── partial styles ────────────────────────────────────────────────────────
//
// Every field is optional. Layers are combined field by field, the upper
// layer winning wherever it sets a value.

/// Background and padding of a box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxStyle {
    pub background_color: Option<Color>,
    pub padding: Option<u32>,
}

impl BoxStyle {
    pub fn overlay(&mut self, upper: &BoxStyle) {
        self.background_color = upper.background_color.or(self.background_color);
        self.padding = upper.padding.or(self.padding);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontStyle {
    pub family: Option<String>,
    /// Pixel size.
    pub size: Option<u32>,
    pub color: Option<Color>,
}

impl FontStyle {
    pub fn overlay(&mut self, upper: &FontStyle) {
        if upper.family.is_some() {
            self.family.clone_from(&upper.family);
        }
        self.size = upper.size.or(self.size);
        self.color = upper.color.or(self.color);
    }

    fn resolve(&self, fallback: &ResolvedFont) -> ResolvedFont {
        ResolvedFont {
            family: self.family.clone().unwrap_or_else(|| fallback.family.clone()),
            size: self.size.unwrap_or(fallback.size),
            color: self.color.unwrap_or(fallback.color),
        }
    }
}

/// A button is a box with a label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonStyle {
    pub frame: BoxStyle,
    pub font: FontStyle,
}

impl ButtonStyle {
    pub fn overlay(&mut self, upper: &ButtonStyle) {
        self.frame.overlay(&upper.frame);
        self.font.overlay(&upper.font);
    }
}

/// All the style components of one screen, at one cascade level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSet {
    pub base: BoxStyle,
    pub primary: FontStyle,
    pub secondary: FontStyle,
    pub button: ButtonStyle,
}

impl StyleSet {
    /// Built-in look: white background, black 15px primary text, gray 10px
    /// secondary text, black buttons with white labels.
    pub fn defaults() -> Self {
        let defaults = ScreenStyle::default();
        let font = |f: &ResolvedFont| FontStyle {
            family: Some(f.family.clone()),
            size: Some(f.size),
            color: Some(f.color),
        };
        Self {
            base: BoxStyle {
                background_color: Some(defaults.background),
                padding: Some(defaults.padding),
            },
            primary: font(&defaults.primary),
            secondary: font(&defaults.secondary),
            button: ButtonStyle {
                frame: BoxStyle {
                    background_color: Some(defaults.button.background),
                    padding: Some(defaults.button.padding),
                },
                font: font(&defaults.button.font),
            },
        }
    }

    pub fn overlay(&mut self, upper: &StyleSet) {
        self.base.overlay(&upper.base);
        self.primary.overlay(&upper.primary);
        self.secondary.overlay(&upper.secondary);
        self.button.overlay(&upper.button);
    }

    /// Fills whatever is still unset from the built-in look.
    pub fn resolve(&self) -> ScreenStyle {
        let d = ScreenStyle::default();
        ScreenStyle {
            background: self.base.background_color.unwrap_or(d.background),
            padding: self.base.padding.unwrap_or(d.padding),
            primary: self.primary.resolve(&d.primary),
            secondary: self.secondary.resolve(&d.secondary),
            button: ResolvedButton {
                background: self.button.frame.background_color.unwrap_or(d.button.background),
                padding: self.button.frame.padding.unwrap_or(d.button.padding),
                font: self.button.font.resolve(&d.button.font),
            },
        }
    }
}

// ── resolved styles ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFont {
    pub family: String,
    pub size: u32,
    pub color: Color,
}

impl ResolvedFont {
    pub fn new(family: impl Into<String>, size: u32, color: Color) -> Self {
        Self { family: family.into(), size, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedButton {
    pub background: Color,
    pub padding: u32,
    pub font: ResolvedFont,
}

/// Fully resolved style a screen draws with.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenStyle {
    pub background: Color,
    pub padding: u32,
    pub primary: ResolvedFont,
    pub secondary: ResolvedFont,
    pub button: ResolvedButton,
}

impl Default for ScreenStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            padding: 20,
            primary: ResolvedFont::new(DEFAULT_FONT_FAMILY, 15, Color::BLACK),
            secondary: ResolvedFont::new(DEFAULT_FONT_FAMILY, 10, Color::GRAY),
            button: ResolvedButton {
                background: Color::BLACK,
                padding: 20,
                font: ResolvedFont::new(DEFAULT_FONT_FAMILY, 15, Color::WHITE),
            },
        }
    }
}
