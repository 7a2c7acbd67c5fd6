/// Keyboard key identifier.
///
/// Only keys the flow screens react to get their own variant; everything else
/// maps to `Key::Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Space,

    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    /// Letter key, stored as its uppercase ASCII character.
    Letter(char),

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn shortcut(&self) -> bool {
        if cfg!(target_os = "macos") { self.meta } else { self.ctrl }
    }
}

/// Mouse wheel delta. `Line` counts notches, `Pixel` is high precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical scroll in logical pixels, positive when scrolling up.
    pub fn vertical_pixels(&self, line_height: f32) -> f32 {
        match *self {
            MouseWheelDelta::Line { y, .. } => y * line_height,
            MouseWheelDelta::Pixel { y, .. } => y,
        }
    }

    /// Horizontal scroll in logical pixels, positive when scrolling left.
    pub fn horizontal_pixels(&self, column_width: f32) -> f32 {
        match *self {
            MouseWheelDelta::Line { x, .. } => x * column_width,
            MouseWheelDelta::Pixel { x, .. } => x,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event with the pointer position at the time of the press.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

impl PointerButtonEvent {
    /// Primary button released: what the flow screens treat as a touch.
    pub fn is_touch(&self) -> bool {
        self.button == MouseButton::Left && self.state == MouseButtonState::Released
    }
}

/// Committed text (typed characters or IME commit).
#[derive(Debug, Clone, PartialEq)]
pub struct TextEvent {
    pub text: String,
}

/// Platform-agnostic input events.
///
/// The winit runtime translates window events into these; headless backends
/// construct them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    Text(TextEvent),

    PointerLeft,

    Focused(bool),

    /// The user asked the application to terminate.
    Quit,
}

impl InputEvent {
    /// Convenience constructor for a left-button release at `(x, y)`.
    pub fn touch(x: f32, y: f32) -> Self {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    /// Convenience constructor for a key press without modifiers.
    pub fn key_press(key: Key) -> Self {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        InputEvent::Text(TextEvent { text: text.into() })
    }
}
