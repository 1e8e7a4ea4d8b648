use ropey::Rope;

/// Cursor position in the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, in characters.
    pub col: usize,
    /// Column to return to when moving vertically through shorter lines.
    col_memory: usize,
}

impl Cursor {
    pub const fn new() -> Self {
        Self::at(0, 0)
    }

    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The document text being edited, backed by a rope.
///
/// Every mutating method reports whether the text actually changed so the
/// caller knows when to schedule a re-render.
pub struct InputBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
}

impl InputBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            dirty: false,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the text was edited since it was loaded or last saved.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// A line's content without its line ending.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Length of a line in characters, without its line ending.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Swap in new content, e.g. after the file changed on disk.
    ///
    /// The cursor is clamped into the new text and the buffer becomes clean.
    /// Returns `false` when the content is unchanged.
    pub fn replace_text(&mut self, text: &str) -> bool {
        if self.rope == text {
            return false;
        }
        self.rope = Rope::from_str(text);
        let Cursor { line, col, .. } = self.cursor;
        self.move_to(line, col);
        self.dirty = false;
        true
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        } else {
            self.cursor.set_col(self.cursor.col + 1);
        }
        self.dirty = true;
        true
    }

    /// Insert `s` at the cursor and move the cursor past it.
    pub fn insert_str(&mut self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);

        let mut lines = s.split('\n');
        let first = lines.next().unwrap_or_default();
        match lines.enumerate().last() {
            Some((extra, last)) => {
                self.cursor.line += extra + 1;
                self.cursor.set_col(last.chars().count());
            }
            None => self.cursor.set_col(self.cursor.col + first.chars().count()),
        }
        self.dirty = true;
        true
    }

    /// Break the line at the cursor, carrying over the current indentation.
    pub fn split_line(&mut self) -> bool {
        let indent: String = self
            .line_at(self.cursor.line)
            .unwrap_or_default()
            .chars()
            .take(self.cursor.col)
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        self.insert_char('\n');
        self.insert_str(&indent);
        true
    }

    /// Delete the character before the cursor (Backspace).
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }
        let char_idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            // `\r\n` endings are removed whole.
            let start = self.rope.line_to_char(self.cursor.line - 1) + prev_len;
            self.rope.remove(start..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - 1);
        }
        self.dirty = true;
        true
    }

    /// Delete the character at the cursor (Delete).
    pub fn delete_forward(&mut self) -> bool {
        let char_idx = self.cursor_char_idx();
        if char_idx >= self.rope.len_chars() {
            return false;
        }
        let end = if self.cursor.col >= self.line_len(self.cursor.line) {
            self.rope.line_to_char(self.cursor.line + 1)
        } else {
            char_idx + 1
        };
        self.rope.remove(char_idx..end);
        self.dirty = true;
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertically(-1),
            Direction::Down => self.move_vertically(1),
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move to a position, clamped into the text.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.move_to(last_line, usize::MAX);
    }

    fn cursor_char_idx(&self) -> usize {
        let line = self.cursor.line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line) + self.cursor.col.min(self.line_len(line))
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.set_col(self.cursor.col - 1);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.line) {
            self.cursor.set_col(self.cursor.col + 1);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_vertically(&mut self, delta: isize) {
        let Some(line) = self.cursor.line.checked_add_signed(delta) else {
            return;
        };
        if line >= self.line_count() {
            return;
        }
        self.cursor.line = line;
        self.cursor.col = self.cursor.col_memory.min(self.line_len(line));
    }
}

impl std::fmt::Debug for InputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = InputBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert!(buf.is_empty());
        assert_eq!(buf.line_at(0).as_deref(), Some(""));
    }

    #[test]
    fn test_line_at_strips_line_endings() {
        let buf = InputBuffer::from_text("[1,\r\n2]\n");
        assert_eq!(buf.line_at(0).as_deref(), Some("[1,"));
        assert_eq!(buf.line_at(1).as_deref(), Some("2]"));
        assert_eq!(buf.line_at(2).as_deref(), Some(""));
        assert_eq!(buf.line_at(3), None);
    }

    #[test]
    fn test_new_buffer_is_clean() {
        let mut buf = InputBuffer::from_text("null");
        assert!(!buf.is_dirty());
        buf.insert_char(' ');
        assert!(buf.is_dirty());
        buf.mark_clean();
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_insert_char_advances_cursor() {
        let mut buf = InputBuffer::from_text("[]");
        buf.move_to(0, 1);
        buf.insert_char('1');
        assert_eq!(buf.text(), "[1]");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_columns_count_characters() {
        let mut buf = InputBuffer::from_text("\"é\"");
        buf.move_end();
        assert_eq!(buf.cursor().col, 3);
        buf.move_cursor(Direction::Left);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "\"\"");
        assert_eq!(buf.cursor().col, 1);
    }

    #[test]
    fn test_insert_str_multiline_moves_to_last_line() {
        let mut buf = InputBuffer::empty();
        assert!(buf.insert_str("{\n  \"a\": 1"));
        assert_eq!(buf.cursor(), Cursor::at(1, 8));
        assert!(!buf.insert_str(""));
    }

    #[test]
    fn test_split_line_keeps_indent() {
        let mut buf = InputBuffer::from_text("  \"a\": 1,");
        buf.move_end();
        buf.split_line();
        assert_eq!(buf.text(), "  \"a\": 1,\n  ");
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
    }

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = InputBuffer::from_text("1");
        assert!(!buf.delete_back());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = InputBuffer::from_text("[1,\r\n2]");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "[1,2]");
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_delete_forward() {
        let mut buf = InputBuffer::from_text("ab\ncd");
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "b\ncd");
        buf.move_end();
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "bcd");
        buf.move_to_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_horizontal_movement_wraps_lines() {
        let mut buf = InputBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_vertical_movement_remembers_column() {
        let mut buf = InputBuffer::from_text("abcdef\nab\nabcdef");
        buf.move_to(0, 5);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 5);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, 2);
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = InputBuffer::from_text("ab\nc");
        buf.move_to(10, 10);
        assert_eq!(buf.cursor(), Cursor::at(1, 1));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_replace_text_clamps_cursor_and_cleans() {
        let mut buf = InputBuffer::from_text("[1, 2, 3]\n[4]");
        buf.move_to(1, 3);
        buf.insert_char(' ');
        assert!(buf.replace_text("null"));
        assert_eq!(buf.text(), "null");
        assert_eq!(buf.cursor(), Cursor::at(0, 4));
        assert!(!buf.is_dirty());
        assert!(!buf.replace_text("null"));
    }
}
