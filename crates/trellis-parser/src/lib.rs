//! Parser for the trellis structure-chart DSL.
//!
//! The DSL is line-oriented: each line declares one chart element
//! (module, library, storage, conditional, loop, or connection) and
//! lines that match nothing are dropped. Parsing is total: it never
//! fails, it only accumulates warning [`Diagnostic`]s for input it had
//! to discard. The public entry point is [`parse`].

pub mod error;

mod parser;

#[cfg(test)]
mod parser_tests;

pub use error::{Diagnostic, Severity};
pub use parser::parse;
