#![warn(missing_docs)]
//! `parsed-doc` - host-facing annotations for a single parsed source file.
//!
//! # Overview
//!
//! An IDE asks a parsed document for comments, tags, folding regions and errors. Tags for
//! unimplemented code and tags written in comments (`TODO`, ...) are separate lists. This crate defines those data models, the adapters that derive tags and folds from
//! comments, the diagnostic-to-error mapper, and the lock-free [`PublishSlot`] cache used to
//! compute each list at most once per document state.
//!
//! It does not parse anything. Front-end bindings (e.g. `parsed-doc-csharp`) walk their syntax
//! trees to fill these models and implement [`DocumentAnnotations`].
//!
//! # Module Description
//!
//! - [`region`] - locations and regions
//! - [`line_index`] - byte/char/line conversions
//! - [`tags`] - task tags
//! - [`comments`] - comments, comment tags, comment folds
//! - [`folding`] - folding regions
//! - [`diagnostics`] - front-end diagnostics and host errors
//! - [`publish`] - single-slot publish cache
//! - [`model`] - semantic model and async accessor traits
//! - [`config`] - walker configuration

pub mod comments;
pub mod config;
pub mod diagnostics;
mod error;
pub mod folding;
pub mod line_index;
pub mod model;
pub mod publish;
pub mod region;
pub mod tags;

pub use comments::{Comment, CommentKind, comment_folds, comment_tags};
pub use config::AnnotationConfig;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, ErrorKind, ReportedError, map_diagnostics};
pub use error::DocumentError;
pub use folding::{FoldKind, FoldRegion, normalize_folds};
pub use line_index::LineIndex;
pub use model::{AnnotationResult, DocumentAnnotations, SemanticModel};
pub use parsed_doc_lang::{CommentConfig, CommentTag};
pub use publish::PublishSlot;
pub use region::{DocumentLocation, DocumentRegion};
pub use tags::{NOT_IMPLEMENTED_TAG, Tag};
pub use tokio_util::sync::CancellationToken;
