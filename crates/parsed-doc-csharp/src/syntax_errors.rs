//! A semantic model that reports only syntax errors.

use crate::syntax::SyntaxTree;
use crate::walk::{Visit, preorder};
use parsed_doc::{Diagnostic, DiagnosticSeverity, DocumentError, SemanticModel};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Diagnostic id for an `ERROR` node.
pub const SYNTAX_ERROR_ID: &str = "syntax-error";
/// Diagnostic id for a token the parser inserted during recovery.
pub const MISSING_TOKEN_ID: &str = "missing-token";

/// A [`SemanticModel`] that reports only the parser's recovery nodes.
///
/// Useful for hosts without a compiler: errors still show up, just without semantic checks.
#[derive(Debug, Clone)]
pub struct SyntaxDiagnostics {
    syntax: Arc<SyntaxTree>,
}

impl SyntaxDiagnostics {
    /// Bind to a syntax tree.
    pub fn new(syntax: Arc<SyntaxTree>) -> Self {
        Self { syntax }
    }
}

impl SemanticModel for SyntaxDiagnostics {
    fn diagnostics(&self, cancel: &CancellationToken) -> Result<Vec<Diagnostic>, DocumentError> {
        let syntax = &self.syntax;
        let mut out = Vec::new();
        if !syntax.has_errors() {
            return Ok(out);
        }

        preorder(syntax.root(), cancel, |node| {
            if node.is_error() {
                out.push(Diagnostic::new(
                    SYNTAX_ERROR_ID,
                    DiagnosticSeverity::Error,
                    "Syntax error",
                    syntax.node_region(node),
                ));
                // One diagnostic per recovery site.
                return Visit::Skip;
            }
            if node.is_missing() {
                out.push(Diagnostic::new(
                    MISSING_TOKEN_ID,
                    DiagnosticSeverity::Error,
                    format!("'{}' expected", node.kind()),
                    syntax.node_region(node),
                ));
                return Visit::Skip;
            }
            if node.has_error() {
                Visit::Descend
            } else {
                Visit::Skip
            }
        })?;

        tracing::debug!(count = out.len(), "syntax diagnostics");
        Ok(out)
    }
}
