//! Seams between the annotation layer, the front end and the host.

use crate::comments::Comment;
use crate::diagnostics::{Diagnostic, ReportedError};
use crate::error::DocumentError;
use crate::folding::FoldRegion;
use crate::tags::Tag;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The front end's resolved view of a parsed unit.
///
/// Only diagnostics are consumed here. Implementations should poll `cancel` in long loops and
/// return [`DocumentError::Cancelled`] when it fires.
pub trait SemanticModel: Send + Sync {
    /// All diagnostics for the unit, at every severity.
    fn diagnostics(&self, cancel: &CancellationToken) -> Result<Vec<Diagnostic>, DocumentError>;
}

/// Result type shared by the annotation accessors.
pub type AnnotationResult<T> = Result<Arc<Vec<T>>, DocumentError>;

/// Asynchronous annotation accessors, for hosts whose document abstraction is future-based.
///
/// The computation itself is synchronous: implementations return futures that are already
/// complete.
pub trait DocumentAnnotations {
    /// All comments in source order.
    fn get_comments(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = AnnotationResult<Comment>> + Send;

    /// Tags for thrown `NotImplementedException`s, ordered by region.
    fn get_tags(&self, cancel: &CancellationToken)
    -> impl Future<Output = AnnotationResult<Tag>> + Send;

    /// Tags derived from special comment words (`TODO`, `FIXME`, ...), ordered by region.
    fn get_comment_tags(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = AnnotationResult<Tag>> + Send;

    /// Folding regions ordered by region.
    fn get_foldings(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = AnnotationResult<FoldRegion>> + Send;

    /// Errors and warnings; empty when no semantic model is available.
    fn get_errors(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = AnnotationResult<ReportedError>> + Send;
}
