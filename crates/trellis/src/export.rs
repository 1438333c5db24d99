//! Export stage for solved charts.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Chart
//!     ↓ structure
//! Hierarchy
//!     ↓ layout
//! Layout
//!     ↓ export (this module)
//! SVG markup
//! ```
//!
//! Rendering is total: any chart and layout pair produces markup, and
//! a layout with nothing placed produces the fixed placeholder
//! document instead of failing.

/// SVG export backend.
pub mod svg;
