#![warn(missing_docs)]
//! `parsed-doc-lang` - data-driven language configuration helpers for `parsed-doc`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parsing system. It
//! provides small structs that the annotation walkers use to classify comments and to recognize
//! special comment tags (`TODO`, `FIXME`, ...) in a language-aware way.

use serde::{Deserialize, Serialize};

/// Comment tokens for a given language.
///
/// The comment scanner uses this to strip delimiters and to tell documentation comments apart
/// from ordinary ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Documentation line comment token (e.g. `///`).
    pub doc_line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Documentation block comment start token (e.g. `/**`).
    pub doc_block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            ..Self::default()
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
            ..Self::default()
        }
    }

    /// Set the documentation comment tokens.
    pub fn with_doc_tokens(
        mut self,
        doc_line: impl Into<String>,
        doc_block_start: impl Into<String>,
    ) -> Self {
        self.doc_line = Some(doc_line.into());
        self.doc_block_start = Some(doc_block_start.into());
        self
    }

    /// C# comment tokens: `//`, `///`, `/* */`, `/** */`.
    pub fn csharp() -> Self {
        Self::line_and_block("//", "/*", "*/").with_doc_tokens("///", "/**")
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.as_deref().is_some_and(|s| !s.is_empty())
            && self.block_end.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if `text` opens with the documentation line token.
    pub fn is_doc_line(&self, text: &str) -> bool {
        match self.doc_line.as_deref() {
            // `////` is a plain comment that happens to start with slashes.
            Some(tok) if !tok.is_empty() => {
                text.starts_with(tok) && !text[tok.len()..].starts_with('/')
            }
            _ => false,
        }
    }

    /// Returns `true` if `text` opens with the documentation block token.
    ///
    /// `/**/` is an empty ordinary block comment, not documentation.
    pub fn is_doc_block(&self, text: &str) -> bool {
        match self.doc_block_start.as_deref() {
            Some(tok) if !tok.is_empty() => text.starts_with(tok) && text != "/**/",
            _ => false,
        }
    }
}

/// A special word that turns a comment into a task tag (e.g. `TODO`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentTag {
    /// The tag word, matched case-sensitively. Also the label of the produced tag.
    pub name: String,
}

impl CommentTag {
    /// Create a tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The default tag table: `TODO`, `FIXME`, `HACK`, `UNDONE`.
    pub fn defaults() -> Vec<CommentTag> {
        vec![
            CommentTag::new("TODO"),
            CommentTag::new("FIXME"),
            CommentTag::new("HACK"),
            CommentTag::new("UNDONE"),
        ]
    }

    /// If `text` (already stripped of comment delimiters) starts with this tag as a whole word,
    /// returns the remaining text with an optional `:` and surrounding whitespace removed.
    pub fn match_text<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.name.is_empty() {
            return None;
        }
        let rest = text.trim_start().strip_prefix(self.name.as_str())?;
        match rest.chars().next() {
            None => Some(""),
            Some(':') => Some(rest[1..].trim()),
            Some(c) if c.is_whitespace() => Some(rest.trim()),
            Some(_) => None,
        }
    }
}
