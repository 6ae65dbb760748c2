//! Parsing, incremental reparsing and the immutable syntax tree.

use parsed_doc::{DocumentError, DocumentRegion, LineIndex};
use std::fmt;
use std::sync::Arc;
use tree_sitter::{InputEdit, Node, Parser, Point, Query, Tree};

const COMMENTS_QUERY: &str = "(comment) @comment";
const THROWS_QUERY: &str = r#"
(throw_statement) @throw
(throw_expression) @throw
"#;

/// Compiled queries shared by every tree a [`CSharpParser`] produces.
pub(crate) struct CSharpQueries {
    pub(crate) comments: Query,
    pub(crate) throws: Query,
}

impl CSharpQueries {
    fn new(language: &tree_sitter::Language) -> Result<Self, DocumentError> {
        let compile = |source: &str| {
            Query::new(language, source).map_err(|e| DocumentError::Language(e.to_string()))
        };
        Ok(Self {
            comments: compile(COMMENTS_QUERY)?,
            throws: compile(THROWS_QUERY)?,
        })
    }
}

/// A single text edit expressed in character offsets.
///
/// `start` is a character offset in the document at the time this edit is applied; edits in a
/// [`TextChange`] are applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextEdit {
    /// Create an edit.
    pub fn new(start: usize, deleted_text: impl Into<String>, inserted_text: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: deleted_text.into(),
            inserted_text: inserted_text.into(),
        }
    }

    /// Pure insertion at `start`.
    pub fn insert(start: usize, text: impl Into<String>) -> Self {
        Self::new(start, String::new(), text)
    }
}

/// An ordered list of edits that transforms one source text into the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Edits, in application order.
    pub edits: Vec<TextEdit>,
}

/// How [`CSharpParser::reparse`] produced its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Edits were applied to the previous tree and it was re-parsed incrementally.
    Incremental,
    /// The edits did not match the previous text; the full text was parsed from scratch.
    FullReparse,
}

/// An immutable parsed C# unit: the tree, its exact source text and a line index.
pub struct SyntaxTree {
    text: String,
    tree: Tree,
    line_index: LineIndex,
    queries: Arc<CSharpQueries>,
}

impl SyntaxTree {
    /// The source text the tree was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The underlying Tree-sitter tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Root node of the tree.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Line index over [`SyntaxTree::text`].
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Returns `true` if the tree contains error or missing nodes.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    pub(crate) fn queries(&self) -> &CSharpQueries {
        &self.queries
    }

    /// Source text of a node (empty if the range is not valid UTF-8 boundaries).
    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.text.get(node.byte_range()).unwrap_or_default()
    }

    /// Region covering a node.
    pub fn node_region(&self, node: Node<'_>) -> DocumentRegion {
        self.line_index.region(node.start_byte(), node.end_byte())
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("bytes", &self.text.len())
            .field("lines", &self.line_index.line_count())
            .field("has_errors", &self.has_errors())
            .finish()
    }
}

/// Produces [`SyntaxTree`]s for C# source text.
pub struct CSharpParser {
    parser: Parser,
    queries: Arc<CSharpQueries>,
}

impl CSharpParser {
    /// Create a parser bound to the C# grammar.
    pub fn new() -> Result<Self, DocumentError> {
        let language: tree_sitter::Language = tree_sitter_c_sharp::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| DocumentError::Language(e.to_string()))?;
        let queries = Arc::new(CSharpQueries::new(&language)?);
        Ok(Self { parser, queries })
    }

    /// Parse `text` from scratch.
    pub fn parse(&mut self, text: impl Into<String>) -> Result<SyntaxTree, DocumentError> {
        let text = text.into();
        let tree = self
            .parser
            .parse(&text, None)
            .ok_or(DocumentError::Parse)?;
        tracing::debug!(bytes = text.len(), has_errors = tree.root_node().has_error(), "parsed");
        Ok(self.finish(text, tree))
    }

    /// Produce the tree for the next version of `old`.
    ///
    /// `change` is applied to the old tree and text, and the result is re-parsed incrementally.
    /// If the change does not line up with the old text (or the result differs from
    /// `full_text`), `full_text` is parsed from scratch instead.
    pub fn reparse(
        &mut self,
        old: &SyntaxTree,
        change: &TextChange,
        full_text: &str,
    ) -> Result<(SyntaxTree, UpdateMode), DocumentError> {
        let mut text = old.text.clone();
        let mut line_index = old.line_index.clone();
        let mut tree = old.tree.clone();

        let applied = apply_change(&mut text, &mut line_index, &mut tree, change).is_ok()
            && text == full_text;

        if applied {
            let tree = self
                .parser
                .parse(&text, Some(&tree))
                .ok_or(DocumentError::Parse)?;
            tracing::debug!(edits = change.edits.len(), "incremental reparse");
            return Ok((
                SyntaxTree {
                    text,
                    tree,
                    line_index,
                    queries: Arc::clone(&self.queries),
                },
                UpdateMode::Incremental,
            ));
        }

        tracing::debug!(edits = change.edits.len(), "change mismatch; full reparse");
        Ok((self.parse(full_text)?, UpdateMode::FullReparse))
    }

    fn finish(&self, text: String, tree: Tree) -> SyntaxTree {
        let line_index = LineIndex::from_text(&text);
        SyntaxTree {
            text,
            tree,
            line_index,
            queries: Arc::clone(&self.queries),
        }
    }
}

#[derive(Debug)]
struct ChangeMismatch;

fn point_for_char_offset(line_index: &LineIndex, char_offset: usize) -> Point {
    let (row, column) = line_index.char_offset_to_line_byte_column(char_offset);
    Point { row, column }
}

fn advance_point(mut point: Point, text: &str) -> Point {
    let mut parts = text.split('\n');
    let Some(first) = parts.next() else {
        return point;
    };

    point.column = point.column.saturating_add(first.len());
    for part in parts {
        point.row = point.row.saturating_add(1);
        point.column = part.len();
    }

    point
}

fn apply_change(
    text: &mut String,
    line_index: &mut LineIndex,
    tree: &mut Tree,
    change: &TextChange,
) -> Result<(), ChangeMismatch> {
    if line_index.char_count() != change.before_char_count {
        return Err(ChangeMismatch);
    }

    for edit in &change.edits {
        let start_char = edit.start;
        if start_char > line_index.char_count() {
            return Err(ChangeMismatch);
        }
        let deleted_chars = edit.deleted_text.chars().count();

        let start_byte = line_index.char_offset_to_byte_offset(start_char);
        let old_end_byte = start_byte.saturating_add(edit.deleted_text.len());
        let new_end_byte = start_byte.saturating_add(edit.inserted_text.len());

        let Some(old_slice) = text.get(start_byte..old_end_byte) else {
            return Err(ChangeMismatch);
        };
        if old_slice != edit.deleted_text {
            return Err(ChangeMismatch);
        }

        let start_position = point_for_char_offset(line_index, start_char);
        let old_end_position = advance_point(start_position, &edit.deleted_text);
        let new_end_position = advance_point(start_position, &edit.inserted_text);

        tree.edit(&InputEdit {
            start_byte,
            old_end_byte,
            new_end_byte,
            start_position,
            old_end_position,
            new_end_position,
        });

        text.replace_range(start_byte..old_end_byte, &edit.inserted_text);
        line_index.delete(start_char, deleted_chars);
        line_index.insert(start_char, &edit.inserted_text);
    }

    if line_index.char_count() != change.after_char_count {
        return Err(ChangeMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_point_crosses_lines() {
        let p = advance_point(Point { row: 2, column: 4 }, "ab\ncde");
        assert_eq!(p, Point { row: 3, column: 3 });
        let q = advance_point(Point { row: 0, column: 1 }, "xy");
        assert_eq!(q, Point { row: 0, column: 3 });
    }

    #[test]
    fn apply_change_rejects_start_past_end() {
        let mut parser = CSharpParser::new().unwrap();
        let old = parser.parse("class A { }").unwrap();
        let mut text = old.text.clone();
        let mut line_index = old.line_index.clone();
        let mut tree = old.tree.clone();
        let change = TextChange {
            before_char_count: 11,
            after_char_count: 12,
            edits: vec![TextEdit::insert(500, "X")],
        };
        assert!(apply_change(&mut text, &mut line_index, &mut tree, &change).is_err());
    }

    #[test]
    fn parse_exposes_text_and_root() {
        let mut parser = CSharpParser::new().unwrap();
        let tree = parser.parse("class A { }").unwrap();
        assert_eq!(tree.root().kind(), "compilation_unit");
        assert_eq!(tree.text(), "class A { }");
        assert!(!tree.has_errors());
    }
}
