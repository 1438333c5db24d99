//! SVG rendering for solved charts.

use std::f32::consts::{FRAC_PI_2, PI};

use indexmap::IndexMap;
use log::debug;
use svg::Document;
use svg::node::element::{self as svg_element, path::Data};

use trellis_core::chart::{
    Chart, Conditional, Connection, Direction, FlowKind, Loop, Module, ModuleKind, metrics,
};
use trellis_core::draw;
use trellis_core::geometry::{Bounds, Point, Size};

use crate::config::StyleConfig;
use crate::layout::Layout;

/// Fractional positions along a call edge where flow indicators land.
///
/// Parallel edges between the same pair take slots in rank order and
/// saturate at the last slot.
const INDICATOR_SLOTS: [f32; 4] = [0.3, 0.5, 0.7, 0.85];

/// Perpendicular offset of an indicator from its call edge.
const INDICATOR_SIDE_OFFSET: f32 = 12.0;

/// Total length of the short indicator arrow.
const INDICATOR_ARROW_LENGTH: f32 = 20.0;

/// Radius of the data/control indicator circle.
const INDICATOR_RADIUS: f32 = 5.0;

/// Half-diagonal of a conditional-gate diamond.
const DIAMOND_HALF: f32 = 20.0;

/// Vertical drop from a module's bottom edge to its diamond's center.
const DIAMOND_DROP: f32 = 30.0;

/// Radius of the dashed loop arc.
const LOOP_RADIUS: f32 = 25.0;

/// Estimated glyph width used to push edge labels clear of the line.
const LABEL_CHAR_WIDTH: f32 = 6.0;

/// Horizontal margin around the content bounds.
const MARGIN_X: f32 = 50.0;

/// Top margin, oversized for loop-arc headroom.
const MARGIN_TOP: f32 = 80.0;

/// Bottom margin below the deepest box row.
const MARGIN_BOTTOM: f32 = 50.0;

/// Fixed document emitted when nothing could be placed.
pub const PLACEHOLDER_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">"#,
    r#"<text x="10" y="50">No modules defined</text></svg>"#,
);

/// Renders a chart and its solved layout into an SVG document string.
///
/// Rendering never fails; entities whose endpoints were never placed
/// are skipped, and a layout with nothing placed yields
/// [`PLACEHOLDER_SVG`].
pub struct SvgRenderer<'a> {
    chart: &'a Chart,
    layout: &'a Layout,
    style: &'a StyleConfig,
}

impl<'a> SvgRenderer<'a> {
    pub fn new(chart: &'a Chart, layout: &'a Layout, style: &'a StyleConfig) -> Self {
        Self {
            chart,
            layout,
            style,
        }
    }

    /// Renders the full document.
    ///
    /// Z-order, back to front: loops, conditionals, connections,
    /// modules, storages.
    pub fn render(&self) -> String {
        if self.layout.is_empty() {
            debug!("No modules placed, emitting placeholder");
            return PLACEHOLDER_SVG.to_string();
        }

        let bounds = self.content_bounds();
        let view_box = format!(
            "{} {} {} {}",
            bounds.min_x() - MARGIN_X,
            bounds.min_y() - MARGIN_TOP,
            bounds.width() + 2.0 * MARGIN_X,
            bounds.height() + MARGIN_TOP + MARGIN_BOTTOM,
        );

        let mut document = Document::new()
            .set("class", "structure-chart")
            .set("style", "max-width: 100%; height: auto;")
            .set("viewBox", view_box)
            .add(draw::marker_definitions(self.style.stroke()));

        for lp in self.chart.loops() {
            if let Some(group) = self.loop_group(lp) {
                document = document.add(group);
            }
        }

        for conditional in self.chart.conditionals() {
            if let Some(group) = self.conditional_group(conditional) {
                document = document.add(group);
            }
        }

        for (connection, slot) in self.fan_out() {
            if let Some(group) = self.connection_group(connection, slot) {
                document = document.add(group);
            }
        }

        for (id, module) in self.chart.modules() {
            let Some(origin) = self.layout.position(id) else {
                continue;
            };
            let fill = match module.kind() {
                ModuleKind::Plain => self.style.module_fill(),
                ModuleKind::Library => self.style.library_fill(),
            };
            document = document.add(draw::module_group(module, origin, fill, self.style.stroke()));
        }

        for (storage, origin) in self
            .chart
            .storages()
            .iter()
            .zip(self.layout.storage_positions())
        {
            document = document.add(draw::storage_group(
                storage,
                *origin,
                self.style.storage_fill(),
                self.style.stroke(),
            ));
        }

        document.to_string()
    }

    /// Bounding box over every placed module and storage box.
    fn content_bounds(&self) -> Bounds {
        let box_size = Size::new(metrics::MODULE_WIDTH, metrics::MODULE_HEIGHT);
        self.layout
            .positions()
            .values()
            .chain(self.layout.storage_positions())
            .map(|origin| Bounds::new_from_top_left(*origin, box_size))
            .reduce(|acc, next| acc.merge(&next))
            .unwrap_or_default()
    }

    /// Assigns each connection its indicator slot: rank among edges
    /// sharing the same (from, to) pair, clamped to the last slot.
    fn fan_out(&self) -> Vec<(&'a Connection, usize)> {
        let mut ranks: IndexMap<(&str, &str), usize> = IndexMap::new();

        self.chart
            .connections()
            .iter()
            .map(|connection| {
                let rank = ranks
                    .entry((connection.from(), connection.to()))
                    .or_insert(0);
                let slot = (*rank).min(INDICATOR_SLOTS.len() - 1);
                *rank += 1;
                (connection, slot)
            })
            .collect()
    }

    /// One call edge: main line, optional flow indicator, optional label.
    fn connection_group(
        &self,
        connection: &Connection,
        slot: usize,
    ) -> Option<svg_element::Group> {
        let from = self.layout.position(connection.from())?;
        let to = self.layout.position(connection.to())?;

        // Tree edges always run bottom-center to top-center.
        let start = Point::new(
            from.x() + metrics::MODULE_WIDTH / 2.0,
            from.y() + metrics::MODULE_HEIGHT,
        );
        let end = Point::new(to.x() + metrics::MODULE_WIDTH / 2.0, to.y());

        let angle = (end.y() - start.y()).atan2(end.x() - start.x());
        let perp = angle + FRAC_PI_2;

        let mut group = svg_element::Group::new().set("class", "connection");

        let has_indicator = matches!(connection.kind(), FlowKind::Data | FlowKind::Control);
        if has_indicator {
            let center = offset_along(start, end, INDICATOR_SLOTS[slot], perp, INDICATOR_SIDE_OFFSET);

            // Backward flips the indicator only, never the tree edge.
            let arrow_angle = match connection.direction() {
                Direction::Forward => angle,
                Direction::Backward => angle + PI,
            };
            let half = INDICATOR_ARROW_LENGTH / 2.0;
            let tail = Point::new(
                center.x() - arrow_angle.cos() * half,
                center.y() - arrow_angle.sin() * half,
            );
            let tip = Point::new(
                center.x() + arrow_angle.cos() * half,
                center.y() + arrow_angle.sin() * half,
            );

            // Arrow first so the circle covers its tail.
            group = group.add(
                svg_element::Line::new()
                    .set("x1", tail.x())
                    .set("y1", tail.y())
                    .set("x2", tip.x())
                    .set("y2", tip.y())
                    .set("stroke", self.style.stroke())
                    .set("stroke-width", 1.5)
                    .set("marker-end", "url(#small-arrowhead)"),
            );

            let circle_fill = match connection.kind() {
                FlowKind::Data => "white",
                _ => self.style.stroke(),
            };
            group = group.add(
                svg_element::Circle::new()
                    .set("cx", tail.x())
                    .set("cy", tail.y())
                    .set("r", INDICATOR_RADIUS)
                    .set("fill", circle_fill)
                    .set("stroke", self.style.stroke())
                    .set("stroke-width", 1.5),
            );
        }

        group = group.add(
            svg_element::Line::new()
                .set("x1", start.x())
                .set("y1", start.y())
                .set("x2", end.x())
                .set("y2", end.y())
                .set("stroke", self.style.stroke())
                .set("stroke-width", 2)
                .set("marker-end", "url(#arrowhead)"),
        );

        if !connection.label().is_empty() {
            let position = if has_indicator {
                // Past the indicator: side offset, arrow length, a gap,
                // then half the estimated text width.
                let text_width = connection.label().chars().count() as f32 * LABEL_CHAR_WIDTH;
                let offset = INDICATOR_SIDE_OFFSET
                    + INDICATOR_ARROW_LENGTH
                    + 8.0
                    + text_width / 2.0;
                offset_along(start, end, INDICATOR_SLOTS[slot], perp, offset)
            } else {
                offset_along(start, end, 0.5, perp, 15.0)
            };

            group = group.add(
                svg_element::Text::new(connection.label())
                    .set("x", position.x())
                    .set("y", position.y())
                    .set("font-family", "Arial, sans-serif")
                    .set("font-size", 10)
                    .set("fill", self.style.stroke())
                    .set("font-style", "italic"),
            );
        }

        Some(group)
    }

    /// One conditional gate: diamond below the source, one inbound
    /// line, one arrowed line per placed branch target.
    fn conditional_group(&self, conditional: &Conditional) -> Option<svg_element::Group> {
        let from = self.layout.position(conditional.from())?;
        let top = Point::new(
            from.x() + metrics::MODULE_WIDTH / 2.0,
            from.y() + metrics::MODULE_HEIGHT,
        );
        let center = Point::new(top.x(), top.y() + DIAMOND_DROP);

        let (shadow, body) = draw::diamond_polygons(
            center,
            DIAMOND_HALF,
            self.style.conditional_fill(),
            self.style.stroke(),
        );

        let mut group = svg_element::Group::new()
            .set("class", "conditional")
            .add(shadow)
            .add(body)
            .add(
                svg_element::Line::new()
                    .set("x1", top.x())
                    .set("y1", top.y())
                    .set("x2", center.x())
                    .set("y2", center.y() - DIAMOND_HALF)
                    .set("stroke", self.style.stroke())
                    .set("stroke-width", 2),
            );

        for target in conditional.targets() {
            let Some(position) = self.layout.position(target) else {
                continue;
            };
            group = group.add(
                svg_element::Line::new()
                    .set("x1", center.x())
                    .set("y1", center.y() + DIAMOND_HALF)
                    .set("x2", position.x() + metrics::MODULE_WIDTH / 2.0)
                    .set("y2", position.y())
                    .set("stroke", self.style.stroke())
                    .set("stroke-width", 2)
                    .set("marker-end", "url(#arrowhead)"),
            );
        }

        Some(group)
    }

    /// One loop marker: a dashed near-circle arc under the inferred
    /// parent of the covered modules.
    fn loop_group(&self, lp: &Loop) -> Option<svg_element::Group> {
        let anchor = self.loop_anchor(lp.over())?;
        let origin = self.layout.position(anchor)?;

        let center_x = origin.x() + metrics::MODULE_WIDTH / 2.0;
        let bottom = origin.y() + metrics::MODULE_HEIGHT;

        // Endpoints pulled in 5 units so the arc sweeps ~300 degrees.
        let start = Point::new(center_x - LOOP_RADIUS + 5.0, bottom + 8.0);
        let end = Point::new(center_x + LOOP_RADIUS - 5.0, bottom + 8.0);

        let arc = Data::new()
            .move_to((start.x(), start.y()))
            .elliptical_arc_to((LOOP_RADIUS, LOOP_RADIUS, 0.0, 1.0, 1.0, end.x(), end.y()));

        let path = svg_element::Path::new()
            .set("d", arc)
            .set("fill", "none")
            .set("stroke", self.style.stroke())
            .set("stroke-width", 2)
            .set("stroke-dasharray", "5,5")
            .set("marker-end", "url(#arrowhead)");

        Some(svg_element::Group::new().set("class", "loop").add(path))
    }

    /// Finds the module a loop arc hangs under.
    ///
    /// Preference order: the source of a connection entering the
    /// covered set from outside it, then any placed module one level
    /// shallower than the shallowest covered module, then the first
    /// placed covered module. Every candidate must be placed, and a
    /// loop covering no placed module marks nothing.
    fn loop_anchor<'s>(&'s self, over: &'s [String]) -> Option<&'s str> {
        let covered = |id: &str| over.iter().any(|m| m == id);

        if !over.iter().any(|id| self.layout.position(id).is_some()) {
            return None;
        }

        for connection in self.chart.connections() {
            if covered(connection.to())
                && !covered(connection.from())
                && self.layout.position(connection.from()).is_some()
            {
                return Some(connection.from());
            }
        }

        let min_level = over
            .iter()
            .filter_map(|id| self.chart.module(id))
            .map(|module| self.effective_level(module))
            .min()?;
        if min_level > 0 {
            let shallower = self.chart.modules().iter().find(|(id, module)| {
                self.effective_level(module) == min_level - 1
                    && self.layout.position(id).is_some()
            });
            if let Some((id, _)) = shallower {
                return Some(id.as_str());
            }
        }

        over.iter()
            .map(String::as_str)
            .find(|id| self.layout.position(id).is_some())
    }

    /// The layout's tree depth when the module was placed, otherwise
    /// its indentation-declared level.
    fn effective_level(&self, module: &Module) -> usize {
        self.layout.depth(module.id()).unwrap_or(module.level())
    }
}

/// The point a fraction `t` along `start..end`, pushed `offset` units
/// along the `direction` angle.
fn offset_along(start: Point, end: Point, t: f32, direction: f32, offset: f32) -> Point {
    let base = start.lerp(end, t);
    Point::new(
        base.x() + direction.cos() * offset,
        base.y() + direction.sin() * offset,
    )
}
