//! Arrowhead marker definitions.
//!
//! The two marker ids (`arrowhead`, `small-arrowhead`) are part of the
//! rendered-output contract: connection lines and flow indicators
//! reference them by `url(#...)`.

use svg::node::element::{Definitions, Marker, Polygon};

/// Builds the `<defs>` block with the standard and small arrowheads.
///
/// `fill` is the stroke color shared by all connectors.
pub fn marker_definitions(fill: &str) -> Definitions {
    let arrowhead = Marker::new()
        .set("id", "arrowhead")
        .set("markerWidth", 10)
        .set("markerHeight", 10)
        .set("refX", 9)
        .set("refY", 3)
        .set("orient", "auto")
        .add(
            Polygon::new()
                .set("points", "0 0, 10 3, 0 6")
                .set("fill", fill),
        );

    let small_arrowhead = Marker::new()
        .set("id", "small-arrowhead")
        .set("markerWidth", 8)
        .set("markerHeight", 8)
        .set("refX", 7)
        .set("refY", 2.5)
        .set("orient", "auto")
        .add(
            Polygon::new()
                .set("points", "0 0, 8 2.5, 0 5")
                .set("fill", fill),
        );

    Definitions::new().add(arrowhead).add(small_arrowhead)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_ids_are_stable() {
        let rendered = marker_definitions("#333333").to_string();
        assert!(rendered.contains(r#"id="arrowhead""#));
        assert!(rendered.contains(r#"id="small-arrowhead""#));
        assert!(rendered.contains(r#"points="0 0, 10 3, 0 6""#));
        assert!(rendered.contains(r#"points="0 0, 8 2.5, 0 5""#));
    }
}
