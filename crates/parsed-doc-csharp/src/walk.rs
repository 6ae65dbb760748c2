//! Tree traversal helpers shared by the walkers.

use parsed_doc::DocumentError;
use tokio_util::sync::CancellationToken;
use tree_sitter::Node;

/// How often (in visited nodes) a walk polls its cancellation token.
const CANCEL_POLL_INTERVAL: usize = 256;

/// Whether a pre-order walk should enter a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visit {
    Descend,
    Skip,
}

pub(crate) fn check_cancelled(cancel: &CancellationToken) -> Result<(), DocumentError> {
    if cancel.is_cancelled() {
        tracing::debug!("walk cancelled");
        return Err(DocumentError::Cancelled);
    }
    Ok(())
}

/// Visit `root` and its descendants in document order.
pub(crate) fn preorder<'tree>(
    root: Node<'tree>,
    cancel: &CancellationToken,
    mut visit: impl FnMut(Node<'tree>) -> Visit,
) -> Result<(), DocumentError> {
    check_cancelled(cancel)?;

    let mut cursor = root.walk();
    let mut visited = 0usize;
    loop {
        visited += 1;
        if visited.is_multiple_of(CANCEL_POLL_INTERVAL) {
            check_cancelled(cancel)?;
        }

        if visit(cursor.node()) == Visit::Descend && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.node() == root {
                return Ok(());
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Ok(());
            }
        }
    }
}

/// Comments are extras: they can appear anywhere and never count as tokens.
pub(crate) fn is_trivia(node: Node<'_>) -> bool {
    node.kind() == "comment" || (node.is_missing() && node.byte_range().is_empty())
}

/// All children, anonymous tokens included, in order.
pub(crate) fn all_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn last_token(node: Node<'_>) -> Option<Node<'_>> {
    if node.child_count() == 0 {
        return (!is_trivia(node)).then_some(node);
    }
    all_children(node).into_iter().rev().find_map(last_token)
}

/// The token that precedes `node` in document order, skipping comments.
pub(crate) fn previous_token(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node;
    loop {
        let mut sibling = current.prev_sibling();
        while let Some(s) = sibling {
            if let Some(token) = last_token(s) {
                return Some(token);
            }
            sibling = s.prev_sibling();
        }
        current = current.parent()?;
    }
}

/// Named children that are not comments.
pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !is_trivia(*child))
        .collect()
}
