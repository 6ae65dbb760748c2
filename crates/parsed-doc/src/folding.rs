//! Folding regions.

use crate::region::DocumentRegion;
use serde::{Deserialize, Serialize};

/// What produced a folding region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoldKind {
    /// Unclassified fold.
    Undefined,
    /// A group of `using` directives.
    Imports,
    /// A namespace body.
    Namespace,
    /// A type body (class, struct, record, interface, enum).
    Type,
    /// A code block (method bodies, accessors, statements).
    Member,
    /// A comment or comment run.
    Comment,
    /// A `#region` / `#endregion` pair.
    UserRegion,
}

/// Fold region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldRegion {
    /// Folded span.
    pub region: DocumentRegion,
    /// Fold classification.
    pub kind: FoldKind,
    /// Placeholder text shown when folded (e.g., "...")
    pub name: String,
    /// Whether the host should start with this region collapsed.
    pub is_collapsed_by_default: bool,
}

impl FoldRegion {
    /// Create a fold region with the default placeholder.
    pub fn new(region: DocumentRegion, kind: FoldKind) -> Self {
        Self {
            region,
            kind,
            name: String::from("..."),
            is_collapsed_by_default: false,
        }
    }

    /// Set the placeholder text.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether the region starts collapsed.
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.is_collapsed_by_default = collapsed;
        self
    }

    /// First line of the region.
    pub fn start_line(&self) -> usize {
        self.region.begin.line
    }

    /// Last line of the region (inclusive).
    pub fn end_line(&self) -> usize {
        self.region.end.line
    }
}

/// Sort by region and drop duplicate spans (the first producer wins) and single-line regions.
pub fn normalize_folds(regions: &mut Vec<FoldRegion>) {
    regions.sort_by(|a, b| a.region.cmp(&b.region));
    regions.dedup_by(|a, b| a.region == b.region);
    regions.retain(|r| r.region.is_multi_line());
}
