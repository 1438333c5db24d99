//! Box shapes: module rectangles, storage cylinders, conditional diamonds.

use svg::node::element as svg_element;

use crate::{
    chart::{Module, ModuleKind, Storage, metrics},
    draw::text::LabelBlock,
    geometry::Point,
};

/// Fill color of drop shadows, a translucent black.
const SHADOW_FILL: &str = "#00000020";

/// Offset of drop shadows from the shape they sit under.
const SHADOW_OFFSET: f32 = 2.0;

/// Renders a module as a group: shadow, rectangle, wrapped label, and
/// an underline when the module is a library.
///
/// The group carries `class="module"` and `data-module-id`, the hooks
/// the external viewer script keys on.
pub fn module_group(module: &Module, origin: Point, fill: &str, stroke: &str) -> svg_element::Group {
    let mut group = svg_element::Group::new()
        .set("class", "module")
        .set("data-module-id", module.id());

    let shadow = svg_element::Rectangle::new()
        .set("x", origin.x() + SHADOW_OFFSET)
        .set("y", origin.y() + SHADOW_OFFSET)
        .set("width", metrics::MODULE_WIDTH)
        .set("height", metrics::MODULE_HEIGHT)
        .set("fill", SHADOW_FILL)
        .set("stroke", "none")
        .set("rx", 3);
    group = group.add(shadow);

    let body = svg_element::Rectangle::new()
        .set("x", origin.x())
        .set("y", origin.y())
        .set("width", metrics::MODULE_WIDTH)
        .set("height", metrics::MODULE_HEIGHT)
        .set("fill", fill)
        .set("stroke", stroke)
        .set("stroke-width", 2)
        .set("rx", 3);
    group = group.add(body);

    let label = LabelBlock::new(
        module.label(),
        origin,
        metrics::MODULE_WIDTH,
        metrics::MODULE_HEIGHT,
    );
    for text in label.render(stroke) {
        group = group.add(text);
    }

    if module.kind() == ModuleKind::Library {
        let underline = svg_element::Line::new()
            .set("x1", origin.x() + 15.0)
            .set("y1", label.underline_y())
            .set("x2", origin.x() + metrics::MODULE_WIDTH - 15.0)
            .set("y2", label.underline_y())
            .set("stroke", stroke)
            .set("stroke-width", 1.5);
        group = group.add(underline);
    }

    group
}

/// Renders a storage node as a rounded "cylinder": shadow, rounded
/// rectangle, and a top cap ellipse. The label is not wrapped.
pub fn storage_group(
    storage: &Storage,
    origin: Point,
    fill: &str,
    stroke: &str,
) -> svg_element::Group {
    let shadow = svg_element::Rectangle::new()
        .set("x", origin.x() + SHADOW_OFFSET)
        .set("y", origin.y() + SHADOW_OFFSET)
        .set("width", metrics::MODULE_WIDTH)
        .set("height", metrics::MODULE_HEIGHT)
        .set("fill", SHADOW_FILL)
        .set("stroke", "none")
        .set("rx", 15);

    let body = svg_element::Rectangle::new()
        .set("x", origin.x())
        .set("y", origin.y())
        .set("width", metrics::MODULE_WIDTH)
        .set("height", metrics::MODULE_HEIGHT)
        .set("fill", fill)
        .set("stroke", stroke)
        .set("stroke-width", 2)
        .set("rx", 15);

    let cap_height = 8.0;
    let cap = svg_element::Ellipse::new()
        .set("cx", origin.x() + metrics::MODULE_WIDTH / 2.0)
        .set("cy", origin.y() + cap_height)
        .set("rx", metrics::MODULE_WIDTH / 2.0 - 4.0)
        .set("ry", cap_height)
        .set("fill", "none")
        .set("stroke", stroke)
        .set("stroke-width", 1.5);

    let text = svg_element::Text::new(storage.label())
        .set("x", origin.x() + metrics::MODULE_WIDTH / 2.0)
        .set("y", origin.y() + metrics::MODULE_HEIGHT / 2.0 + 3.0)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("font-family", "Arial, sans-serif")
        .set("font-size", 12)
        .set("fill", stroke)
        .set("font-weight", 500);

    svg_element::Group::new()
        .set("class", "storage")
        .add(shadow)
        .add(body)
        .add(cap)
        .add(text)
}

/// Builds the shadow and body polygons of a conditional-gate diamond
/// centered at `center` with half-diagonal `half`.
pub fn diamond_polygons(
    center: Point,
    half: f32,
    fill: &str,
    stroke: &str,
) -> (svg_element::Polygon, svg_element::Polygon) {
    let points = |dx: f32, dy: f32| {
        format!(
            "{},{} {},{} {},{} {},{}",
            center.x() + dx,
            center.y() - half + dy,
            center.x() + half + dx,
            center.y() + dy,
            center.x() + dx,
            center.y() + half + dy,
            center.x() - half + dx,
            center.y() + dy,
        )
    };

    let shadow = svg_element::Polygon::new()
        .set("points", points(SHADOW_OFFSET, SHADOW_OFFSET))
        .set("fill", SHADOW_FILL)
        .set("stroke", "none");

    let body = svg_element::Polygon::new()
        .set("points", points(0.0, 0.0))
        .set("fill", fill)
        .set("stroke", stroke)
        .set("stroke-width", 2);

    (shadow, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_group_carries_viewer_hooks() {
        let module = Module::new("calc", "Calculate Grade", ModuleKind::Plain, 0);
        let rendered = module_group(&module, Point::new(0.0, 0.0), "#ffffff", "#333333").to_string();

        assert!(rendered.contains(r#"class="module""#));
        assert!(rendered.contains(r#"data-module-id="calc""#));
        assert!(rendered.contains("Calculate Grade"));
    }

    #[test]
    fn test_library_module_is_underlined() {
        let plain = Module::new("a", "Log", ModuleKind::Plain, 0);
        let library = Module::new("a", "Log", ModuleKind::Library, 0);
        let origin = Point::new(0.0, 0.0);

        let plain_svg = module_group(&plain, origin, "#ffffff", "#333333").to_string();
        let library_svg = module_group(&library, origin, "#e3f2fd", "#333333").to_string();

        assert!(!plain_svg.contains("<line"));
        assert!(library_svg.contains("<line"));
        // Underline is inset 15 units from both box edges.
        assert!(library_svg.contains(r#"x1="15""#));
        assert!(library_svg.contains(r#"x2="105""#));
    }

    #[test]
    fn test_storage_group_has_cylinder_cap() {
        let storage = Storage::new("db", "Grade Store", 1);
        let rendered = storage_group(&storage, Point::new(0.0, 0.0), "#fff9c4", "#333333").to_string();

        assert!(rendered.contains(r#"class="storage""#));
        assert!(rendered.contains("<ellipse"));
        assert!(rendered.contains(r#"rx="56""#)); // 120 / 2 - 4
    }

    #[test]
    fn test_diamond_points_are_symmetric() {
        let (_, body) = diamond_polygons(Point::new(100.0, 80.0), 20.0, "#ffffcc", "#333333");
        let rendered = body.to_string();
        assert!(rendered.contains("100,60 120,80 100,100 80,80"));
    }
}
