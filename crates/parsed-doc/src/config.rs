//! Annotation configuration.

use crate::error::DocumentError;
use parsed_doc_lang::{CommentConfig, CommentTag};
use serde::{Deserialize, Serialize};

/// Configuration for the annotation walkers.
///
/// Every field has a default, so a JSON document only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Comment tokens of the language.
    pub comment: CommentConfig,
    /// Special words that turn a comment into a tag.
    pub comment_tags: Vec<CommentTag>,
    /// Type names (whitespace-free source text) whose construction in a `throw` becomes a tag.
    pub not_implemented_type_names: Vec<String>,
    /// Also scan `throw` expressions (`=> throw new ...`), not only statements. Off by default.
    pub tag_throw_expressions: bool,
    /// Fold multi-line comments and comment runs.
    pub fold_comments: bool,
    /// Fold `#region` / `#endregion` pairs.
    pub fold_user_regions: bool,
    /// Mark documentation comment folds as collapsed by default.
    pub collapse_doc_comments: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            comment: CommentConfig::csharp(),
            comment_tags: CommentTag::defaults(),
            not_implemented_type_names: vec![
                "NotImplementedException".to_string(),
                "System.NotImplementedException".to_string(),
                "global::System.NotImplementedException".to_string(),
            ],
            tag_throw_expressions: false,
            fold_comments: true,
            fold_user_regions: true,
            collapse_doc_comments: false,
        }
    }
}

impl AnnotationConfig {
    /// Decode a config from JSON; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Control whether comments are folded.
    pub fn set_fold_comments(&mut self, fold: bool) {
        self.fold_comments = fold;
    }

    /// Control whether `#region` blocks are folded.
    pub fn set_fold_user_regions(&mut self, fold: bool) {
        self.fold_user_regions = fold;
    }

    /// Control whether `throw` expressions are scanned for tags.
    pub fn set_tag_throw_expressions(&mut self, scan: bool) {
        self.tag_throw_expressions = scan;
    }

    /// Returns `true` if `type_text` names the not-implemented exception.
    ///
    /// Whitespace inside the source text is ignored (`System . NotImplementedException`).
    pub fn is_not_implemented_type(&self, type_text: &str) -> bool {
        let compact: String = type_text.chars().filter(|c| !c.is_whitespace()).collect();
        self.not_implemented_type_names
            .iter()
            .any(|name| *name == compact)
    }
}
