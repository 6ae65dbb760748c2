//! Comment collection and classification.

use crate::syntax::SyntaxTree;
use crate::walk::check_cancelled;
use parsed_doc::{AnnotationConfig, Comment, CommentConfig, CommentKind, DocumentError};
use streaming_iterator::StreamingIterator;
use tokio_util::sync::CancellationToken;
use tree_sitter::{Node, QueryCursor};

/// Collect every comment in source order.
pub fn collect_comments(
    syntax: &SyntaxTree,
    config: &AnnotationConfig,
    cancel: &CancellationToken,
) -> Result<Vec<Comment>, DocumentError> {
    check_cancelled(cancel)?;

    let query = &syntax.queries().comments;
    let mut cursor = QueryCursor::new();
    let mut out = Vec::<Comment>::new();

    let mut matches = cursor.matches(query, syntax.root(), syntax.text().as_bytes());
    while let Some(m) = matches.next() {
        check_cancelled(cancel)?;
        for capture in m.captures {
            if let Some(comment) = to_comment(syntax, &config.comment, capture.node) {
                out.push(comment);
            }
        }
    }

    out.sort_by(|a, b| a.region.cmp(&b.region));
    out.dedup_by(|a, b| a.region == b.region);
    tracing::debug!(count = out.len(), "collected comments");
    Ok(out)
}

fn to_comment(syntax: &SyntaxTree, tokens: &CommentConfig, node: Node<'_>) -> Option<Comment> {
    let raw = syntax.node_text(node).trim_end_matches(['\r', '\n']);
    if raw.is_empty() {
        return None;
    }

    let (kind, open_tag, closing_tag) = if let Some(block) = block_tokens(tokens, raw) {
        block
    } else if let Some(open) = tokens.doc_line.as_deref().filter(|_| tokens.is_doc_line(raw)) {
        (CommentKind::Documentation, open, "")
    } else if let Some(line) = tokens
        .line
        .as_deref()
        .filter(|line| tokens.has_line() && raw.starts_with(*line))
    {
        (CommentKind::SingleLine, line, "")
    } else {
        return None;
    };

    let body = &raw[open_tag.len()..];
    let body = if closing_tag.is_empty() {
        body
    } else {
        body.strip_suffix(closing_tag).unwrap_or(body)
    };

    let start = node.start_byte();
    let end = start + raw.len();
    let line_start = syntax.text()[..start].rfind('\n').map_or(0, |i| i + 1);
    let starts_line = syntax.text()[line_start..start].trim().is_empty();

    Some(Comment {
        kind,
        open_tag: open_tag.to_string(),
        closing_tag: closing_tag.to_string(),
        text: body.to_string(),
        region: syntax.line_index().region(start, end),
        starts_line,
    })
}

/// Kind and delimiters if `raw` is a block comment under `tokens`.
fn block_tokens<'a>(
    tokens: &'a CommentConfig,
    raw: &str,
) -> Option<(CommentKind, &'a str, &'a str)> {
    if !tokens.has_block() {
        return None;
    }
    let start = tokens.block_start.as_deref()?;
    let end = tokens.block_end.as_deref()?;
    if !raw.starts_with(start) {
        return None;
    }
    match tokens.doc_block_start.as_deref() {
        Some(doc) if tokens.is_doc_block(raw) => Some((CommentKind::Documentation, doc, end)),
        _ => Some((CommentKind::Block, start, end)),
    }
}
