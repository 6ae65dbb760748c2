//! Source locations and regions.
//!
//! Regions carry both a `(line, column)` view for hosts that think in editor coordinates and the
//! half-open byte range of the underlying source text.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A zero-based `(line, column)` position. Columns count Unicode scalar values (`char`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct DocumentLocation {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, in `char`s from the start of the line.
    pub column: usize,
}

impl DocumentLocation {
    /// Create a new location.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A span of source text.
///
/// `begin`/`end` are the editor-facing positions; `start_byte..end_byte` is the same span in
/// UTF-8 byte offsets. Regions order by `begin`, then `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRegion {
    /// Start position (inclusive).
    pub begin: DocumentLocation,
    /// End position (exclusive).
    pub end: DocumentLocation,
    /// Start byte offset (inclusive).
    pub start_byte: usize,
    /// End byte offset (exclusive).
    pub end_byte: usize,
}

impl DocumentRegion {
    /// Create a new region.
    pub fn new(
        begin: DocumentLocation,
        end: DocumentLocation,
        start_byte: usize,
        end_byte: usize,
    ) -> Self {
        Self {
            begin,
            end,
            start_byte,
            end_byte,
        }
    }

    /// Returns the smallest region covering both `self` and `other`.
    pub fn cover(&self, other: &DocumentRegion) -> DocumentRegion {
        let (begin, start_byte) = if self.begin <= other.begin {
            (self.begin, self.start_byte)
        } else {
            (other.begin, other.start_byte)
        };
        let (end, end_byte) = if self.end >= other.end {
            (self.end, self.end_byte)
        } else {
            (other.end, other.end_byte)
        };
        DocumentRegion::new(begin, end, start_byte, end_byte)
    }

    /// Returns `true` if the region starts and ends on different lines.
    pub fn is_multi_line(&self) -> bool {
        self.end.line > self.begin.line
    }
}

impl PartialOrd for DocumentRegion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DocumentRegion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.begin, self.end, self.start_byte, self.end_byte).cmp(&(
            other.begin,
            other.end,
            other.start_byte,
            other.end_byte,
        ))
    }
}
