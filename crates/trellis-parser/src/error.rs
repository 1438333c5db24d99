//! Diagnostics for the trellis parser.
//!
//! The DSL degrades gracefully inside documentation prose, so nothing
//! the parser meets is fatal: unmatched lines are dropped and the
//! chart still renders. Each drop is recorded as a warning
//! [`Diagnostic`] so a stricter caller (a test suite, a lint pass)
//! can surface authoring mistakes that the default pipeline swallows.
//!
//! # Example
//!
//! ```
//! # use trellis_parser::error::Diagnostic;
//! let diag = Diagnostic::warning("unrecognized line").with_line(7);
//! assert_eq!(diag.to_string(), "warning: unrecognized line (line 7)");
//! ```

mod diagnostic;
mod severity;

pub use diagnostic::Diagnostic;
pub use severity::Severity;
