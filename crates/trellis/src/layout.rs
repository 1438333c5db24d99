//! Tree layout for structure charts.
//!
//! A single depth-first pass over the hierarchy assigns every
//! reachable module a top-left coordinate. Children are packed
//! left-to-right first; the parent then lands at the midpoint of the
//! span its children occupied, minus half its own width. Roots are
//! laid out as one sibling row sharing the cursor, so independent
//! trees pack side by side without overlap by construction.

use indexmap::IndexMap;
use log::debug;

use trellis_core::chart::{Chart, metrics};
use trellis_core::geometry::Point;

use crate::structure::Hierarchy;

/// Solved coordinates for one chart.
///
/// Positions are box top-left corners. Modules stuck in a call cycle
/// are unreachable from any root and get no position; everything that
/// consumes a layout must treat a missing position as "not drawn".
#[derive(Debug, Default)]
pub struct Layout {
    positions: IndexMap<String, Point>,
    depths: IndexMap<String, usize>,
    storage_positions: Vec<Point>,
}

impl Layout {
    /// Top-left corner of the module's box, if it was reachable.
    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Tree depth the layout assigned, if the module was reachable.
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.depths.get(id).copied()
    }

    /// All placed modules in placement order.
    pub fn positions(&self) -> &IndexMap<String, Point> {
        &self.positions
    }

    /// Top-left corners of the storage row, parallel to the chart's
    /// storage list.
    pub fn storage_positions(&self) -> &[Point] {
        &self.storage_positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Runs the layout pass over every root and places the storage row.
pub fn solve(chart: &Chart, hierarchy: &Hierarchy) -> Layout {
    let mut layout = Layout::default();

    place_row(hierarchy.roots(), hierarchy, 0.0, 0, &mut layout);

    // Storages live in one row below the deepest declared module
    // level, anchored so the first box is centered under x = 0.
    let row_y = (chart.max_declared_level() as f32 + 1.0)
        * (metrics::MODULE_HEIGHT + metrics::SPACING_Y);
    for index in 0..chart.storages().len() {
        let x = -metrics::MODULE_WIDTH / 2.0
            + index as f32 * (metrics::MODULE_WIDTH + metrics::SPACING_X);
        layout.storage_positions.push(Point::new(x, row_y));
    }

    debug!(
        placed = layout.positions.len(),
        storages = layout.storage_positions.len();
        "Layout solved"
    );

    layout
}

/// Places one sibling row at `depth`, returning the advanced cursor.
///
/// The returned cursor includes the trailing gap after the last leaf,
/// which is exactly the span the parent centers itself over.
fn place_row(
    ids: &[String],
    hierarchy: &Hierarchy,
    x_offset: f32,
    depth: usize,
    layout: &mut Layout,
) -> f32 {
    let mut cursor = x_offset;

    for id in ids {
        let child_ids = hierarchy.children(id);

        let x = if child_ids.is_empty() {
            let x = cursor;
            cursor += metrics::MODULE_WIDTH + metrics::SPACING_X;
            x
        } else {
            let span_start = cursor;
            let span_end = place_row(child_ids, hierarchy, span_start, depth + 1, layout);
            cursor = span_end;
            (span_start + span_end - metrics::MODULE_WIDTH) / 2.0
        };

        let y = depth as f32 * (metrics::MODULE_HEIGHT + metrics::SPACING_Y);
        layout.positions.insert(id.clone(), Point::new(x, y));
        layout.depths.insert(id.clone(), depth);
    }

    cursor
}
