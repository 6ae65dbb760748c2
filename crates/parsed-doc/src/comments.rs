//! Comments collected from a parsed unit, and the adapters that derive tags and folds from them.

use crate::folding::{FoldKind, FoldRegion};
use crate::region::DocumentRegion;
use crate::tags::Tag;
use parsed_doc_lang::CommentTag;
use serde::{Deserialize, Serialize};

/// Comment flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentKind {
    /// `// ...`
    SingleLine,
    /// `/* ... */`
    Block,
    /// `/// ...` or `/** ... */`
    Documentation,
}

/// A single source comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment flavor.
    pub kind: CommentKind,
    /// Opening delimiter as written (`//`, `///`, `/*`, `/**`).
    pub open_tag: String,
    /// Closing delimiter (`*/` for block comments, empty for line comments).
    pub closing_tag: String,
    /// Comment body without delimiters.
    pub text: String,
    /// Full comment region including delimiters.
    pub region: DocumentRegion,
    /// Whether the comment is the first non-whitespace token on its line.
    pub starts_line: bool,
}

impl Comment {
    /// Returns `true` if the comment uses block delimiters.
    pub fn is_block_delimited(&self) -> bool {
        !self.closing_tag.is_empty()
    }

    /// Returns `true` if the comment is a documentation comment.
    pub fn is_documentation(&self) -> bool {
        self.kind == CommentKind::Documentation
    }
}

/// Derive task tags from comments using the special tag table.
///
/// Only the first line of a comment is inspected and only the first matching tag wins.
/// Documentation comments are skipped.
pub fn comment_tags(comments: &[Comment], special: &[CommentTag]) -> Vec<Tag> {
    let mut out = Vec::new();
    for comment in comments {
        if comment.is_documentation() {
            continue;
        }
        let first_line = comment.text.lines().next().unwrap_or_default();
        let first_line = first_line.trim_start_matches(|c: char| c == '*' || c.is_whitespace());
        if let Some((tag, rest)) = special
            .iter()
            .find_map(|tag| tag.match_text(first_line).map(|rest| (tag, rest)))
        {
            out.push(Tag::new(tag.name.clone(), rest, comment.region));
        }
    }
    out
}

fn placeholder_for(comment: &Comment) -> String {
    if comment.is_block_delimited() {
        format!("{} ... {}", comment.open_tag, comment.closing_tag)
    } else {
        format!("{} ...", comment.open_tag)
    }
}

/// The comment-to-fold adapter.
///
/// - block comments spanning more than one line fold on their own
/// - runs of two or more line comments of the same kind, each starting its line, on consecutive
///   lines fold together
///
/// `comments` must be in source order.
pub fn comment_folds(comments: &[Comment], collapse_documentation: bool) -> Vec<FoldRegion> {
    let mut folds = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    let flush = |run: &mut Option<(usize, usize)>, folds: &mut Vec<FoldRegion>| {
        if let Some((first, last)) = run.take()
            && last > first
        {
            let head = &comments[first];
            let region = head.region.cover(&comments[last].region);
            folds.push(
                FoldRegion::new(region, FoldKind::Comment)
                    .with_name(placeholder_for(head))
                    .collapsed(collapse_documentation && head.is_documentation()),
            );
        }
    };

    for (idx, comment) in comments.iter().enumerate() {
        if comment.is_block_delimited() {
            flush(&mut run, &mut folds);
            if comment.region.is_multi_line() {
                folds.push(
                    FoldRegion::new(comment.region, FoldKind::Comment)
                        .with_name(placeholder_for(comment))
                        .collapsed(collapse_documentation && comment.is_documentation()),
                );
            }
            continue;
        }

        let continues = match run {
            Some((_, last)) => {
                let prev = &comments[last];
                comment.starts_line
                    && prev.kind == comment.kind
                    && comment.region.begin.line == prev.region.end.line + 1
            }
            None => false,
        };

        if continues {
            if let Some((_, last)) = run.as_mut() {
                *last = idx;
            }
        } else {
            flush(&mut run, &mut folds);
            if comment.starts_line {
                run = Some((idx, idx));
            }
        }
    }
    flush(&mut run, &mut folds);

    folds
}
