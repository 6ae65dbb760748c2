//! Diagnostics coming from the front end, and the errors reported to the host.
//!
//! The front end reports [`Diagnostic`]s at every severity. The host only surfaces errors and
//! warnings, so [`map_diagnostics`] filters and converts them one-to-one into [`ReportedError`]s.

use crate::region::DocumentRegion;
use serde::{Deserialize, Serialize};

/// Front-end diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    /// Hidden diagnostics (never shown to the user).
    Hidden,
    /// Informational diagnostics.
    Info,
    /// Warning diagnostics.
    Warning,
    /// Error diagnostics.
    Error,
}

/// A single diagnostic produced by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic id (e.g. `"CS0168"`).
    pub id: String,
    /// Diagnostic severity.
    pub severity: DiagnosticSeverity,
    /// Diagnostic message.
    pub message: String,
    /// Source region.
    pub region: DocumentRegion,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        id: impl Into<String>,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
        region: DocumentRegion,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            region,
        }
    }
}

/// Host-facing error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A compile error.
    Error,
    /// A warning.
    Warning,
    /// Anything else.
    Unknown,
}

impl From<DiagnosticSeverity> for ErrorKind {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => ErrorKind::Error,
            DiagnosticSeverity::Warning => ErrorKind::Warning,
            DiagnosticSeverity::Hidden | DiagnosticSeverity::Info => ErrorKind::Unknown,
        }
    }
}

/// An error or warning as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedError {
    /// Classification.
    pub kind: ErrorKind,
    /// Diagnostic id.
    pub id: String,
    /// Message.
    pub message: String,
    /// Source region.
    pub region: DocumentRegion,
}

impl From<&Diagnostic> for ReportedError {
    fn from(diag: &Diagnostic) -> Self {
        Self {
            kind: diag.severity.into(),
            id: diag.id.clone(),
            message: diag.message.clone(),
            region: diag.region,
        }
    }
}

/// Keep error and warning diagnostics, in their original order, as host errors.
///
/// Hidden and informational diagnostics are dropped.
pub fn map_diagnostics(diagnostics: &[Diagnostic]) -> Vec<ReportedError> {
    diagnostics
        .iter()
        .filter(|d| {
            matches!(
                d.severity,
                DiagnosticSeverity::Error | DiagnosticSeverity::Warning
            )
        })
        .map(ReportedError::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::DocumentLocation;
    use pretty_assertions::assert_eq;

    fn at(line: usize) -> DocumentRegion {
        DocumentRegion::new(
            DocumentLocation::new(line, 0),
            DocumentLocation::new(line, 3),
            0,
            3,
        )
    }

    #[test]
    fn only_errors_and_warnings_survive() {
        let diags = vec![
            Diagnostic::new("CS0168", DiagnosticSeverity::Warning, "unused", at(0)),
            Diagnostic::new("IDE0001", DiagnosticSeverity::Hidden, "simplify", at(1)),
            Diagnostic::new("CS1002", DiagnosticSeverity::Error, "; expected", at(2)),
            Diagnostic::new("CA1822", DiagnosticSeverity::Info, "static", at(3)),
        ];

        let errors = map_diagnostics(&diags);
        assert_eq!(
            errors,
            vec![
                ReportedError {
                    kind: ErrorKind::Warning,
                    id: "CS0168".to_string(),
                    message: "unused".to_string(),
                    region: at(0),
                },
                ReportedError {
                    kind: ErrorKind::Error,
                    id: "CS1002".to_string(),
                    message: "; expected".to_string(),
                    region: at(2),
                },
            ]
        );
    }

    #[test]
    fn unclassified_severities_map_to_unknown() {
        assert_eq!(ErrorKind::from(DiagnosticSeverity::Info), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from(DiagnosticSeverity::Hidden), ErrorKind::Unknown);
    }
}
