use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Either of these held with Enter inserts a newline in a multiline input.
pub(crate) const NEWLINE_MODIFIERS: KeyModifiers = KeyModifiers::ALT.union(KeyModifiers::SHIFT);

/// Editable text with a cursor kept on a char boundary. Multiline inputs
/// take a newline on Alt+Enter or Shift+Enter.
#[derive(Debug, Default, Clone)]
pub(crate) struct TextInput {
    text: String,
    cursor: usize,
    multiline: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, s: &str) {
        self.text = s.to_string();
        self.cursor = self.text.len();
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Display width of the text between the line start and the cursor.
    pub fn cursor_column(&self) -> u16 {
        let width = self.text[self.line_start()..self.cursor].width();
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    /// Line index and column of the cursor.
    pub fn cursor_position(&self) -> (u16, u16) {
        let row = self.text[..self.cursor].matches('\n').count();
        (u16::try_from(row).unwrap_or(u16::MAX), self.cursor_column())
    }

    fn line_start(&self) -> usize {
        self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| self.cursor + i)
    }

    fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    /// Apply an editing key. Returns whether the text changed.
    pub fn input(&mut self, ev: KeyEvent) -> bool {
        match ev {
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } => {
                self.insert(c);
                true
            }
            KeyEvent {
                code: KeyCode::Enter,
                modifiers,
                ..
            } if self.multiline && modifiers.intersects(NEWLINE_MODIFIERS) => {
                self.insert('\n');
                true
            }
            KeyEvent { code: KeyCode::Backspace, .. } => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.text.replace_range(prev..self.cursor, "");
                self.cursor = prev;
                true
            }
            KeyEvent { code: KeyCode::Delete, .. } => {
                if self.cursor == self.text.len() {
                    return false;
                }
                let next = self.next_boundary();
                self.text.replace_range(self.cursor..next, "");
                true
            }
            KeyEvent { code: KeyCode::Left, .. } => {
                self.cursor = self.prev_boundary();
                false
            }
            KeyEvent { code: KeyCode::Right, .. } => {
                self.cursor = self.next_boundary();
                false
            }
            KeyEvent { code: KeyCode::Home, .. } => {
                self.cursor = self.line_start();
                false
            }
            KeyEvent { code: KeyCode::End, .. } => {
                self.cursor = self.line_end();
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            input.input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = TextInput::new();
        type_str(&mut input, "Catz");
        assert!(input.input(key(KeyCode::Backspace)));
        type_str(&mut input, "s");
        assert_eq!(input.text(), "Cats");
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut input = TextInput::new();
        type_str(&mut input, "héé");
        input.input(key(KeyCode::Left));
        input.input(key(KeyCode::Left));
        type_str(&mut input, "x");
        assert_eq!(input.text(), "hxéé");
        assert_eq!(input.cursor_column(), 2);
        input.input(key(KeyCode::Delete));
        assert_eq!(input.text(), "hxé");
    }

    #[test]
    fn home_end_and_edges() {
        let mut input = TextInput::new();
        input.set_text("abc");
        input.input(key(KeyCode::Home));
        assert!(!input.input(key(KeyCode::Backspace)));
        type_str(&mut input, ">");
        input.input(key(KeyCode::End));
        assert!(!input.input(key(KeyCode::Delete)));
        assert_eq!(input.text(), ">abc");
        assert_eq!(input.cursor_column(), 4);
    }

    #[test]
    fn alt_or_shift_enter_breaks_multiline_text() {
        let mut input = TextInput::multiline();
        type_str(&mut input, "a");
        assert!(input.input(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)));
        type_str(&mut input, "b");
        assert!(input.input(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)));
        type_str(&mut input, "cd");
        assert_eq!(input.text(), "a\nb\ncd");
        assert_eq!(input.cursor_position(), (2, 2));

        input.input(key(KeyCode::Home));
        assert_eq!(input.cursor_position(), (2, 0));
        input.input(key(KeyCode::Left));
        assert_eq!(input.cursor_position(), (1, 1));
        input.input(key(KeyCode::Home));
        input.input(key(KeyCode::End));
        assert_eq!(input.cursor_position(), (1, 1));
    }

    #[test]
    fn single_line_input_ignores_enter() {
        let mut input = TextInput::new();
        type_str(&mut input, "a");
        assert!(!input.input(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)));
        assert!(!input.input(key(KeyCode::Enter)));
        assert_eq!(input.text(), "a");
        assert_eq!(input.cursor_position(), (0, 1));
    }

    #[test]
    fn control_chords_are_not_text() {
        let mut input = TextInput::new();
        assert!(!input.input(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL)));
        assert_eq!(input.text(), "");
    }
}
