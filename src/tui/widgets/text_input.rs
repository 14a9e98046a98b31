//! Single-line text field used as the widget's free-text input.
//!
//! Cursor positions are character indices, not byte offsets, so multi-byte
//! input (e.g. "café") edits cleanly.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    chars: Vec<char>,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            return;
        }
        self.cursor = self.cursor.min(self.chars.len());
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. Returns false at the start of the field.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 || self.chars.is_empty() {
            return false;
        }
        self.cursor = self.cursor.min(self.chars.len());
        self.chars.remove(self.cursor - 1);
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor. Returns false at the end of the field.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn move_word_left(&mut self) {
        let mut pos = self.cursor.min(self.chars.len());
        while pos > 0 && self.chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && is_word_char(self.chars[pos - 1]) {
            pos -= 1;
        }
        self.cursor = pos;
    }

    pub fn move_word_right(&mut self) {
        let mut pos = self.cursor;
        while pos < self.chars.len() && is_word_char(self.chars[pos]) {
            pos += 1;
        }
        while pos < self.chars.len() && self.chars[pos].is_whitespace() {
            pos += 1;
        }
        self.cursor = pos;
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Visible slice for a field `width` cells wide, scrolled so the cursor stays in view.
    /// Returns the text and the cursor column within it.
    pub fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        // Keep one cell free for the cursor when it sits after the last char
        let offset = self.cursor.saturating_sub(width - 1);
        let end = (offset + width).min(self.chars.len());
        let text = self.chars[offset.min(end)..end].iter().collect();
        (text, self.cursor - offset)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(content: &str) -> TextInput {
        let mut input = TextInput::new();
        for ch in content.chars() {
            input.insert_char(ch);
        }
        input
    }

    #[test]
    fn inserts_and_deletes_around_the_cursor() {
        let mut input = filled("cafe");
        input.move_left();
        input.insert_char('f');
        assert_eq!(input.value(), "caffe");
        assert!(input.backspace());
        assert!(input.delete());
        assert_eq!(input.value(), "caf");
        assert!(!input.delete());
    }

    #[test]
    fn multibyte_characters_edit_by_char() {
        let mut input = TextInput::new();
        for ch in "café".chars() {
            input.insert_char(ch);
        }
        assert!(input.backspace());
        assert_eq!(input.value(), "caf");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn backspace_on_empty_input_reports_nothing_deleted() {
        let mut input = TextInput::new();
        assert!(!input.backspace());
        assert!(input.is_empty());
    }

    #[test]
    fn word_movement_skips_words_and_spaces() {
        let mut input = filled("old town walk");
        input.move_word_left();
        assert_eq!(input.cursor(), 9);
        input.move_word_left();
        assert_eq!(input.cursor(), 4);
        input.move_word_right();
        assert_eq!(input.cursor(), 9);
    }

    #[test]
    fn visible_window_follows_the_cursor() {
        let input = filled("mediterranean");
        let (text, col) = input.visible(5);
        assert_eq!(text, "nean");
        assert_eq!(col, 4);

        let mut input = input;
        input.move_home();
        let (text, col) = input.visible(5);
        assert_eq!(text, "medit");
        assert_eq!(col, 0);
    }

    #[test]
    fn newlines_are_never_inserted() {
        let mut input = filled("a\nb");
        input.insert_char('\n');
        assert_eq!(input.value(), "ab");
    }
}
