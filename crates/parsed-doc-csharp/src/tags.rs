//! Tags for thrown `NotImplementedException`s.

use crate::syntax::SyntaxTree;
use crate::walk::{check_cancelled, named_children};
use parsed_doc::{AnnotationConfig, DocumentError, Tag};
use streaming_iterator::StreamingIterator;
use tokio_util::sync::CancellationToken;
use tree_sitter::{Node, QueryCursor};

/// Find `throw new NotImplementedException(...)` and report each as a tag.
///
/// Throws of anything other than an object creation of a configured type are ignored.
pub fn scan_not_implemented(
    syntax: &SyntaxTree,
    config: &AnnotationConfig,
    cancel: &CancellationToken,
) -> Result<Vec<Tag>, DocumentError> {
    check_cancelled(cancel)?;

    let query = &syntax.queries().throws;
    let mut cursor = QueryCursor::new();
    let mut out = Vec::<Tag>::new();

    let mut matches = cursor.matches(query, syntax.root(), syntax.text().as_bytes());
    while let Some(m) = matches.next() {
        check_cancelled(cancel)?;
        for capture in m.captures {
            let node = capture.node;
            if node.kind() == "throw_expression" && !config.tag_throw_expressions {
                continue;
            }
            if let Some(tag) = not_implemented_tag(syntax, config, node) {
                out.push(tag);
            }
        }
    }

    out.sort_by(|a, b| a.region.cmp(&b.region));
    tracing::debug!(count = out.len(), "scanned throw tags");
    Ok(out)
}

fn not_implemented_tag(syntax: &SyntaxTree, config: &AnnotationConfig, throw: Node<'_>) -> Option<Tag> {
    let created = named_children(throw).into_iter().next()?;
    if created.kind() != "object_creation_expression" {
        return None;
    }

    let ty = created.child_by_field_name("type")?;
    if !config.is_not_implemented_type(syntax.node_text(ty)) {
        return None;
    }

    let argument = created
        .child_by_field_name("arguments")
        .and_then(|args| {
            named_children(args)
                .into_iter()
                .find(|n| n.kind() == "argument")
        })
        .map(|arg| syntax.node_text(arg));

    Some(Tag::not_implemented(argument, syntax.node_region(throw)))
}
