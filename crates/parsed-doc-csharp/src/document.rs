//! The per-file annotation adapter.

use crate::comments::collect_comments;
use crate::folding::collect_foldings;
use crate::syntax::SyntaxTree;
use crate::tags::scan_not_implemented;
use arc_swap::ArcSwap;
use parsed_doc::{
    AnnotationConfig, AnnotationResult, Comment, DocumentAnnotations, FoldRegion, PublishSlot,
    ReportedError, SemanticModel, Tag, comment_tags, map_diagnostics,
};
use std::fmt;
use std::future::{Future, ready};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Everything derived from one (syntax tree, semantic model) pair.
///
/// States are immutable once installed; replacing the tree or the model installs a new state.
struct DocumentState {
    syntax: Arc<SyntaxTree>,
    semantic: Option<Arc<dyn SemanticModel>>,
    comments: Arc<PublishSlot<Vec<Comment>>>,
    tags: Arc<PublishSlot<Vec<Tag>>>,
    comment_tags: Arc<PublishSlot<Vec<Tag>>>,
    foldings: Arc<PublishSlot<Vec<FoldRegion>>>,
    errors: Arc<PublishSlot<Vec<ReportedError>>>,
}

impl DocumentState {
    fn new(syntax: Arc<SyntaxTree>, semantic: Option<Arc<dyn SemanticModel>>) -> Self {
        Self {
            syntax,
            semantic,
            comments: Arc::new(PublishSlot::new("comments")),
            tags: Arc::new(PublishSlot::new("tags")),
            comment_tags: Arc::new(PublishSlot::new("comment_tags")),
            foldings: Arc::new(PublishSlot::new("foldings")),
            errors: Arc::new(PublishSlot::new("errors")),
        }
    }

    /// Same syntax (and syntax-derived caches), different semantic model.
    fn with_semantic(&self, semantic: Option<Arc<dyn SemanticModel>>) -> Self {
        Self {
            syntax: Arc::clone(&self.syntax),
            semantic,
            comments: Arc::clone(&self.comments),
            tags: Arc::clone(&self.tags),
            comment_tags: Arc::clone(&self.comment_tags),
            foldings: Arc::clone(&self.foldings),
            errors: Arc::new(PublishSlot::new("errors")),
        }
    }
}

/// IDE-facing annotations for one parsed C# file.
///
/// Each accessor computes its list on first use and caches it for the current document state.
/// Accessors may be called concurrently from any thread; racing callers may compute the same list
/// twice, but all of them get the single instance that was published.
pub struct ParsedDocument {
    file_name: String,
    config: Arc<AnnotationConfig>,
    state: ArcSwap<DocumentState>,
}

impl ParsedDocument {
    /// Create a document for `file_name` backed by `syntax`, without a semantic model.
    pub fn new(file_name: impl Into<String>, syntax: Arc<SyntaxTree>) -> Self {
        Self {
            file_name: file_name.into(),
            config: Arc::new(AnnotationConfig::default()),
            state: ArcSwap::from_pointee(DocumentState::new(syntax, None)),
        }
    }

    /// Attach a semantic model.
    pub fn with_semantic_model(self, model: Arc<dyn SemanticModel>) -> Self {
        self.set_semantic_model(model);
        self
    }

    /// Use a custom configuration. Cached results are discarded.
    pub fn with_config(mut self, config: AnnotationConfig) -> Self {
        self.config = Arc::new(config);
        let current = self.state.load_full();
        self.state.store(Arc::new(DocumentState::new(
            Arc::clone(&current.syntax),
            current.semantic.clone(),
        )));
        self
    }

    /// File name given at construction.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Active configuration.
    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    /// The current syntax tree.
    pub fn syntax_tree(&self) -> Arc<SyntaxTree> {
        Arc::clone(&self.state.load().syntax)
    }

    /// Returns `true` if a semantic model is attached.
    pub fn has_semantic_model(&self) -> bool {
        self.state.load().semantic.is_some()
    }

    /// Install a newly parsed tree. All caches are invalidated and the semantic model, which was
    /// bound to the old tree, is dropped.
    pub fn set_syntax_tree(&self, syntax: Arc<SyntaxTree>) {
        tracing::debug!(file = %self.file_name, "syntax tree replaced");
        self.state
            .store(Arc::new(DocumentState::new(syntax, None)));
    }

    /// Attach or replace the semantic model. Only the error cache is invalidated.
    pub fn set_semantic_model(&self, model: Arc<dyn SemanticModel>) {
        tracing::debug!(file = %self.file_name, "semantic model attached");
        self.state
            .rcu(|current| current.with_semantic(Some(Arc::clone(&model))));
    }

    /// Detach the semantic model.
    pub fn clear_semantic_model(&self) {
        tracing::debug!(file = %self.file_name, "semantic model cleared");
        self.state.rcu(|current| current.with_semantic(None));
    }

    fn comments_for(
        &self,
        state: &DocumentState,
        cancel: &CancellationToken,
    ) -> AnnotationResult<Comment> {
        state
            .comments
            .get_or_try_publish(|| collect_comments(&state.syntax, &self.config, cancel))
    }

    /// All comments in source order.
    pub fn comments(&self, cancel: &CancellationToken) -> AnnotationResult<Comment> {
        let state = self.state.load_full();
        self.comments_for(&state, cancel)
    }

    /// Tags for thrown `NotImplementedException`s, ordered by region.
    ///
    /// Comment tags are not included; see [`ParsedDocument::comment_tags`].
    pub fn tags(&self, cancel: &CancellationToken) -> AnnotationResult<Tag> {
        let state = self.state.load_full();
        state
            .tags
            .get_or_try_publish(|| scan_not_implemented(&state.syntax, &self.config, cancel))
    }

    /// Tags from comments that start with a special tag word, ordered by region.
    pub fn comment_tags(&self, cancel: &CancellationToken) -> AnnotationResult<Tag> {
        let state = self.state.load_full();
        state.comment_tags.get_or_try_publish(|| {
            let comments = self.comments_for(&state, cancel)?;
            Ok(comment_tags(&comments, &self.config.comment_tags))
        })
    }

    /// Folding regions ordered by region.
    pub fn foldings(&self, cancel: &CancellationToken) -> AnnotationResult<FoldRegion> {
        let state = self.state.load_full();
        state.foldings.get_or_try_publish(|| {
            let comments = self.comments_for(&state, cancel)?;
            collect_foldings(&state.syntax, &comments, &self.config, cancel)
        })
    }

    /// Errors and warnings from the semantic model.
    ///
    /// Without a semantic model this is an empty list (and nothing is cached).
    pub fn errors(&self, cancel: &CancellationToken) -> AnnotationResult<ReportedError> {
        let state = self.state.load_full();
        let Some(model) = state.semantic.as_ref() else {
            return Ok(Arc::new(Vec::new()));
        };
        state.errors.get_or_try_publish(|| {
            let diagnostics = model.diagnostics(cancel)?;
            Ok(map_diagnostics(&diagnostics))
        })
    }
}

impl fmt::Debug for ParsedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.load();
        f.debug_struct("ParsedDocument")
            .field("file_name", &self.file_name)
            .field("syntax", &state.syntax)
            .field("has_semantic_model", &state.semantic.is_some())
            .finish()
    }
}

impl DocumentAnnotations for ParsedDocument {
    fn get_comments(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = AnnotationResult<Comment>> + Send {
        ready(self.comments(cancel))
    }

    fn get_tags(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = AnnotationResult<Tag>> + Send {
        ready(self.tags(cancel))
    }

    fn get_comment_tags(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = AnnotationResult<Tag>> + Send {
        ready(self.comment_tags(cancel))
    }

    fn get_foldings(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = AnnotationResult<FoldRegion>> + Send {
        ready(self.foldings(cancel))
    }

    fn get_errors(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = AnnotationResult<ReportedError>> + Send {
        ready(self.errors(cancel))
    }
}
