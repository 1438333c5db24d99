//! Visual definitions for structure-chart elements.
//!
//! Everything here produces nodes from the [`svg`] crate; the export
//! layer in the `trellis` crate assembles them into a document.

mod marker;
mod shape;
mod text;

pub use marker::marker_definitions;
pub use shape::{diamond_polygons, module_group, storage_group};
pub use text::{LABEL_LINE_HEIGHT, LABEL_WRAP_CHARS, LabelBlock, wrap_label};
