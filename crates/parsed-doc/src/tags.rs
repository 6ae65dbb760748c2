//! Task tags surfaced to the host (distinct from compiler diagnostics).

use crate::region::DocumentRegion;
use serde::{Deserialize, Serialize};

/// Label used for tags produced by `throw new NotImplementedException(...)`.
pub const NOT_IMPLEMENTED_TAG: &str = "High";

/// A single task tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag label (e.g. `"High"`, `"TODO"`).
    pub tag: String,
    /// Human-readable message.
    pub message: String,
    /// Source region the tag is anchored to.
    pub region: DocumentRegion,
}

impl Tag {
    /// Create a new tag.
    pub fn new(tag: impl Into<String>, message: impl Into<String>, region: DocumentRegion) -> Self {
        Self {
            tag: tag.into(),
            message: message.into(),
            region,
        }
    }

    /// Tag for a thrown `NotImplementedException`.
    ///
    /// `argument` is the source text of the first constructor argument, if any.
    pub fn not_implemented(argument: Option<&str>, region: DocumentRegion) -> Self {
        let message = match argument {
            Some(arg) => format!("NotImplementedException({arg}) thrown."),
            None => "NotImplementedException thrown.".to_string(),
        };
        Self::new(NOT_IMPLEMENTED_TAG, message, region)
    }
}
