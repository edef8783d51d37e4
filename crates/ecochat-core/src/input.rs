/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Single-line text input with a character-based cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the whole text and move the cursor to the end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, ch: char) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.insert(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = InputLine::new();
        input.insert_str("añb");
        input.move_left();
        input.backspace();
        assert_eq!(input.as_str(), "ab");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut input = InputLine::new();
        input.set("hi");
        input.delete();
        assert_eq!(input.as_str(), "hi");
        input.move_home();
        input.delete();
        assert_eq!(input.as_str(), "i");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputLine::new();
        input.move_left();
        assert_eq!(input.cursor(), 0);
        input.set("🌿x");
        input.move_right();
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_blank() {
        let mut input = InputLine::new();
        assert!(input.is_blank());
        input.set(" \t ");
        assert!(input.is_blank());
        input.insert('a');
        assert!(!input.is_blank());
    }
}
