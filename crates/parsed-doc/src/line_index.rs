//! Line index over the source text of a parsed unit.
//!
//! Backed by a Rope so byte, `char` and line conversions are O(log N). Ropey is built without
//! `unicode_lines`/`cr_lines`, so only `\n` breaks lines; this matches the row numbering of the
//! syntax trees the walkers consume (a `\r\n` pair still ends exactly one line).

use crate::region::{DocumentLocation, DocumentRegion};
use ropey::Rope;

/// Line index for one immutable source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a line index for the given text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Convert a character offset to a byte offset (clamped to the text length).
    pub fn char_offset_to_byte_offset(&self, char_offset: usize) -> usize {
        self.rope.char_to_byte(char_offset.min(self.rope.len_chars()))
    }

    /// Get the zero-based line and the byte column within that line for a character offset.
    pub fn char_offset_to_line_byte_column(&self, char_offset: usize) -> (usize, usize) {
        let byte = self.char_offset_to_byte_offset(char_offset);
        self.byte_offset_to_line_byte_column(byte)
    }

    /// Get the zero-based line and the byte column within that line for a byte offset.
    pub fn byte_offset_to_line_byte_column(&self, byte_offset: usize) -> (usize, usize) {
        let byte = byte_offset.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(byte);
        (line, byte - self.rope.line_to_byte(line))
    }

    /// Editor-facing location (line, `char` column) of a byte offset.
    pub fn location_at_byte(&self, byte_offset: usize) -> DocumentLocation {
        let byte = byte_offset.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(byte);
        let column = self.rope.byte_to_char(byte) - self.rope.line_to_char(line);
        DocumentLocation::new(line, column)
    }

    /// Build a region for a half-open byte range.
    pub fn region(&self, start_byte: usize, end_byte: usize) -> DocumentRegion {
        let end_byte = end_byte.max(start_byte);
        DocumentRegion::new(
            self.location_at_byte(start_byte),
            self.location_at_byte(end_byte),
            start_byte.min(self.rope.len_bytes()),
            end_byte.min(self.rope.len_bytes()),
        )
    }

    /// Insert text (at specified character offset).
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete text range (character offset).
    pub fn delete(&mut self, start_char: usize, len_chars: usize) {
        let start_char = start_char.min(self.rope.len_chars());
        let end_char = (start_char + len_chars).min(self.rope.len_chars());

        if start_char < end_char {
            self.rope.remove(start_char..end_char);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_count_chars_not_bytes() {
        let index = LineIndex::from_text("ab\n👋c\n");
        // 👋 is 4 bytes
        assert_eq!(index.location_at_byte(7), DocumentLocation::new(1, 1));
        assert_eq!(index.byte_offset_to_line_byte_column(7), (1, 4));
        assert_eq!(index.char_offset_to_byte_offset(4), 7);
    }

    #[test]
    fn only_line_feed_breaks_lines() {
        let index = LineIndex::from_text("a\r\nb\rc\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.location_at_byte(5), DocumentLocation::new(1, 2));
        assert_eq!(index.location_at_byte(6), DocumentLocation::new(1, 3));
    }

    #[test]
    fn region_clamps_to_text() {
        let index = LineIndex::from_text("x\ny");
        let region = index.region(2, 99);
        assert_eq!(region.begin, DocumentLocation::new(1, 0));
        assert_eq!(region.end, DocumentLocation::new(1, 1));
        assert_eq!(region.end_byte, 3);
    }

    #[test]
    fn edits_track_text() {
        let mut index = LineIndex::from_text("hello\nworld");
        index.delete(0, 6);
        index.insert(0, "big ");
        assert_eq!(index.char_count(), 9);
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.char_offset_to_byte_offset(4), 4);
    }
}
