//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// The default parse path never produces errors; the severity is kept
/// open so strict callers can promote warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal issue. Unused by the default pipeline, available to
    /// strict callers that reject charts with warnings.
    Error,

    /// A non-fatal notice about input the parser discarded.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
