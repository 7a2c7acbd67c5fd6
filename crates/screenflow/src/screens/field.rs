use screenflow_engine::input::{InputEvent, Key, KeyState};

/// Single-line editable text with a caret.
///
/// The caret is a byte offset that always sits on a char boundary. Control
/// characters are dropped on insertion and the length limit counts chars.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    text: String,
    cursor: usize,
    max_length: Option<usize>,
}

/// What a key or text event did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    /// Not a field event.
    Ignored,
    /// Handled without changing the text.
    Handled,
    /// Text changed.
    Edited,
}

impl TextField {
    pub fn new(max_length: Option<usize>) -> Self {
        Self { max_length, ..Self::default() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Replaces the text (truncated to the limit) and moves the caret to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.cursor = 0;
        self.insert_str(text);
    }

    /// Inserts at the caret; returns whether anything was inserted.
    pub fn insert_str(&mut self, s: &str) -> bool {
        let room = self
            .max_length
            .map_or(usize::MAX, |max| max.saturating_sub(self.text.chars().count()));
        let accepted: String = s.chars().filter(|c| !c.is_control()).take(room).collect();
        if accepted.is_empty() {
            return false;
        }
        self.text.insert_str(self.cursor, &accepted);
        self.cursor += accepted.len();
        true
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = prev_char(&self.text, self.cursor);
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let next = next_char(&self.text, self.cursor);
        self.text.drain(self.cursor..next);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = prev_char(&self.text, self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = next_char(&self.text, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Inserts the system clipboard text, flattened to one line.
    pub fn paste(&mut self) -> bool {
        match arboard::Clipboard::new().and_then(|mut cb| cb.get_text()) {
            Ok(text) => self.insert_str(&text.replace(['\r', '\n'], " ")),
            Err(err) => {
                log::warn!("clipboard unavailable: {err}");
                false
            }
        }
    }

    /// Applies text and editing-key events. Enter is left to the caller.
    pub fn on_event(&mut self, event: &InputEvent) -> FieldChange {
        let edited = |changed: bool| if changed { FieldChange::Edited } else { FieldChange::Handled };
        match event {
            InputEvent::Text(t) => {
                if self.insert_str(&t.text) { FieldChange::Edited } else { FieldChange::Ignored }
            }
            InputEvent::Key { key, state: KeyState::Pressed, modifiers, .. } => match key {
                Key::Backspace => edited(self.delete_backward()),
                Key::Delete => edited(self.delete_forward()),
                Key::ArrowLeft => {
                    self.move_left();
                    FieldChange::Handled
                }
                Key::ArrowRight => {
                    self.move_right();
                    FieldChange::Handled
                }
                Key::Home => {
                    self.move_home();
                    FieldChange::Handled
                }
                Key::End => {
                    self.move_end();
                    FieldChange::Handled
                }
                Key::Letter('V') if modifiers.shortcut() => edited(self.paste()),
                _ => FieldChange::Ignored,
            },
            _ => FieldChange::Ignored,
        }
    }
}

fn prev_char(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_appends_at_caret() {
        let mut field = TextField::new(None);
        assert_eq!(field.on_event(&InputEvent::text("hé")), FieldChange::Edited);
        field.move_left();
        field.insert_str("y");
        assert_eq!(field.text(), "hyé");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn control_characters_are_dropped() {
        let mut field = TextField::new(None);
        assert_eq!(field.on_event(&InputEvent::text("\r")), FieldChange::Ignored);
        field.insert_str("a\tb");
        assert_eq!(field.text(), "ab");
    }

    #[test]
    fn max_length_counts_chars() {
        let mut field = TextField::new(Some(3));
        field.insert_str("éé");
        field.insert_str("éé");
        assert_eq!(field.text(), "ééé");
        assert!(!field.insert_str("x"));
    }

    #[test]
    fn backspace_and_delete_respect_char_boundaries() {
        let mut field = TextField::new(None);
        field.set_text("aé✓");
        assert_eq!(field.on_event(&InputEvent::key_press(Key::Backspace)), FieldChange::Edited);
        assert_eq!(field.text(), "aé");
        field.move_home();
        assert!(field.delete_forward());
        assert_eq!(field.text(), "é");
        assert_eq!(field.on_event(&InputEvent::key_press(Key::Backspace)), FieldChange::Handled);
    }

    #[test]
    fn caret_movement_is_clamped() {
        let mut field = TextField::new(None);
        field.set_text("ab");
        field.move_right();
        assert_eq!(field.cursor(), 2);
        field.move_home();
        field.move_left();
        assert_eq!(field.cursor(), 0);
        field.on_event(&InputEvent::key_press(Key::End));
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn enter_is_not_a_field_key() {
        let mut field = TextField::new(None);
        assert_eq!(field.on_event(&InputEvent::key_press(Key::Enter)), FieldChange::Ignored);
    }
}
