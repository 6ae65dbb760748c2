#![warn(missing_docs)]
//! `parsed-doc-csharp` - Tree-sitter C# binding for `parsed-doc`.
//!
//! This crate turns C# source into a [`SyntaxTree`] (with incremental reparsing) and wraps it in
//! a [`ParsedDocument`] that lazily produces:
//!
//! - comments
//! - tags for `throw new NotImplementedException(...)`
//! - task tags derived from comments (`TODO`, `FIXME`, ...), kept apart from the throw tags
//! - folding regions (using groups, braces, `#region`, comments)
//! - errors mapped from a [`SemanticModel`](parsed_doc::SemanticModel)
//!
//! Hosts without a compiler can attach [`SyntaxDiagnostics`] to surface parse errors.
//!
//! ```no_run
//! use parsed_doc::CancellationToken;
//! use parsed_doc_csharp::{CSharpParser, ParsedDocument, SyntaxDiagnostics};
//! use std::sync::Arc;
//!
//! let mut parser = CSharpParser::new()?;
//! let tree = Arc::new(parser.parse("class A { void M() { throw new NotImplementedException(); } }")?);
//! let doc = ParsedDocument::new("A.cs", Arc::clone(&tree))
//!     .with_semantic_model(Arc::new(SyntaxDiagnostics::new(tree)));
//!
//! let cancel = CancellationToken::new();
//! assert_eq!(doc.tags(&cancel)?.len(), 1);
//! # Ok::<(), parsed_doc::DocumentError>(())
//! ```

mod comments;
mod document;
mod folding;
mod syntax;
mod syntax_errors;
mod tags;
mod walk;

pub use comments::collect_comments;
pub use document::ParsedDocument;
pub use folding::collect_foldings;
pub use syntax::{CSharpParser, SyntaxTree, TextChange, TextEdit, UpdateMode};
pub use syntax_errors::{MISSING_TOKEN_ID, SYNTAX_ERROR_ID, SyntaxDiagnostics};
pub use tags::scan_not_implemented;
