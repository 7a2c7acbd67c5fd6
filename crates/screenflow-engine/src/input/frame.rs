use std::collections::HashSet;

use super::types::{InputEvent, Key};

/// Input collected since the last frame.
///
/// `events` keeps arrival order and is what the flow consumes; the sets are
/// derived views for callers that only care about transitions.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame (repeats excluded).
    pub keys_pressed: HashSet<Key>,

    /// Set when a `Quit` event arrived this frame.
    pub quit_requested: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.quit_requested = false;
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Moves the buffered events out, leaving the frame empty.
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        self.keys_pressed.clear();
        self.quit_requested = false;
        std::mem::take(&mut self.events)
    }
}
