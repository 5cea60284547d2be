//! Host editor capabilities and a rope-backed reference document.
//!
//! All offsets are character offsets into the document's linear text.

use ropey::Rope;
use std::fmt;

/// Zero-based line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Operations the expander needs from the document it edits.
pub trait EditorOps {
    fn cursor(&self) -> usize;

    fn set_cursor(&mut self, offset: usize);

    fn offset_to_position(&self, offset: usize) -> Position;

    fn position_to_offset(&self, position: Position) -> usize;

    /// Exact text in `[from, to)`.
    fn read_range(&self, from: usize, to: usize) -> String;

    /// Replace `[from, to)` with `text`. `from == to` is a pure insertion.
    fn replace_range(&mut self, from: usize, to: usize, text: &str);

    /// Length of a line in characters, excluding its line break.
    fn line_length(&self, line: usize) -> usize;

    /// One indent step at the cursor.
    fn indent(&mut self) {
        let at = self.cursor();
        self.replace_range(at, at, "\t");
        self.set_cursor(at + 1);
    }

    /// Break the line at the cursor. Hosts that auto-indent may add
    /// whitespace after the break.
    fn insert_line_break(&mut self) {
        let at = self.cursor();
        self.replace_range(at, at, "\n");
        self.set_cursor(at + 1);
    }

    /// Offset of the first character on the line holding `offset`.
    fn line_start(&self, offset: usize) -> usize {
        let position = self.offset_to_position(offset);
        self.position_to_offset(Position::new(position.line, 0))
    }

    /// Offset just past the last character of `line`, before its line break.
    fn line_end(&self, line: usize) -> usize {
        self.position_to_offset(Position::new(line, 0)) + self.line_length(line)
    }
}

/// In-memory document backed by a `Rope`.
///
/// The cursor is not remapped by edits; callers place it explicitly.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    text: Rope,
    cursor: usize,
    edits: usize,
}

impl Buffer {
    /// Create a buffer with the cursor at the end of the text.
    pub fn new(text: &str) -> Self {
        let text = Rope::from_str(text);
        let cursor = text.len_chars();
        Self {
            text,
            cursor,
            edits: 0,
        }
    }

    pub fn with_cursor(text: &str, cursor: usize) -> Self {
        let mut buffer = Self::new(text);
        buffer.set_cursor(cursor);
        buffer
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// Number of `replace_range` calls since creation.
    pub fn edit_count(&self) -> usize {
        self.edits
    }

    fn clamp(&self, offset: usize) -> usize {
        offset.min(self.text.len_chars())
    }
}

impl EditorOps for Buffer {
    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, offset: usize) {
        self.cursor = self.clamp(offset);
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let offset = self.clamp(offset);
        let line = self.text.char_to_line(offset);
        Position::new(line, offset - self.text.line_to_char(line))
    }

    fn position_to_offset(&self, position: Position) -> usize {
        if position.line >= self.text.len_lines() {
            return self.text.len_chars();
        }
        let column = position.column.min(self.line_length(position.line));
        self.text.line_to_char(position.line) + column
    }

    fn read_range(&self, from: usize, to: usize) -> String {
        let to = self.clamp(to);
        let from = from.min(to);
        self.text.slice(from..to).to_string()
    }

    fn replace_range(&mut self, from: usize, to: usize, text: &str) {
        let to = self.clamp(to);
        let from = from.min(to);
        if from < to {
            self.text.remove(from..to);
        }
        if !text.is_empty() {
            self.text.insert(from, text);
        }
        self.edits += 1;
        self.cursor = self.clamp(self.cursor);
    }

    fn line_length(&self, line: usize) -> usize {
        if line >= self.text.len_lines() {
            return 0;
        }
        let slice = self.text.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }
}
