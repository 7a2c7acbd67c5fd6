use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

/// Persistent input state for a single window.
///
/// The winit runtime needs the last pointer position to attach coordinates
/// to button events, and the modifier state to attach to key events.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub pointer_down: bool,
}

impl InputState {
    /// Applies `ev` to the current state and records it into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck keys when focus changes mid-press.
                    self.keys_down.clear();
                    self.pointer_down = false;
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, modifiers, repeat } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) && !repeat {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        self.keys_down.remove(key);
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent { state, x, y, modifiers, .. }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
                self.pointer_down = *state == MouseButtonState::Pressed;
            }

            InputEvent::MouseWheel { modifiers, .. } => self.modifiers = *modifiers,

            InputEvent::Text(_) => {}

            InputEvent::Quit => frame.quit_requested = true,
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
