use ropey::Rope;
use unicode_width::UnicodeWidthChar;

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text field backed by a rope.
///
/// The cursor is a char index into the rope (`0..=len_chars`). Vertical
/// movement remembers the column it started from so moving through a short
/// line does not lose the position.
pub struct TextField {
    rope: Rope,
    cursor: usize,
    col_memory: usize,
}

impl TextField {
    /// A field holding `text` with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let cursor = rope.len_chars();
        let mut field = Self {
            rope,
            cursor,
            col_memory: 0,
        };
        field.col_memory = field.cursor_line_col().1;
        field
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line `idx` without its trailing newline.
    pub fn line_at(&self, idx: usize) -> Option<String> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Char index of the cursor.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor as (line, char column).
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let line = self.rope.char_to_line(self.cursor);
        (line, self.cursor - self.rope.line_to_char(line))
    }

    /// Cursor as (line, display column) for placing the terminal cursor.
    pub fn cursor_display(&self) -> (usize, usize) {
        let (line, col) = self.cursor_line_col();
        let width = self
            .rope
            .line(line)
            .chars()
            .take(col)
            .map(|c| c.width().unwrap_or(0))
            .sum();
        (line, width)
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
        self.remember_col();
        true
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    /// Backspace. Joins with the previous line at column 0.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.rope.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        self.remember_col();
        true
    }

    /// Delete key.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(self.cursor..=self.cursor);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                self.remember_col();
            }
            Direction::Right => {
                self.cursor = (self.cursor + 1).min(self.rope.len_chars());
                self.remember_col();
            }
            Direction::Up => {
                let (line, _) = self.cursor_line_col();
                if line > 0 {
                    self.jump_to_line(line - 1);
                }
            }
            Direction::Down => {
                let (line, _) = self.cursor_line_col();
                if line + 1 < self.rope.len_lines() {
                    self.jump_to_line(line + 1);
                }
            }
        }
    }

    pub fn move_home(&mut self) {
        let (line, _) = self.cursor_line_col();
        self.cursor = self.rope.line_to_char(line);
        self.col_memory = 0;
    }

    pub fn move_end(&mut self) {
        let (line, _) = self.cursor_line_col();
        self.cursor = self.rope.line_to_char(line) + self.line_chars(line);
        self.remember_col();
    }

    fn jump_to_line(&mut self, line: usize) {
        let col = self.col_memory.min(self.line_chars(line));
        self.cursor = self.rope.line_to_char(line) + col;
    }

    /// Chars on `line`, excluding the line break.
    fn line_chars(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        while len > 0 && matches!(slice.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        len
    }

    fn remember_col(&mut self) {
        self.col_memory = self.cursor_line_col().1;
    }
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("rope", &format_args!("Rope({} chars)", self.rope.len_chars()))
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
