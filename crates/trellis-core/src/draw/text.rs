//! Label wrapping and positioned text rendering.

use svg::node::element as svg_element;

use crate::geometry::Point;

/// Maximum characters per wrapped label line.
pub const LABEL_WRAP_CHARS: usize = 16;

/// Vertical distance between wrapped label lines, in SVG user units.
pub const LABEL_LINE_HEIGHT: f32 = 14.0;

/// Greedily wraps a label at a character budget, breaking on words.
///
/// A word longer than the budget gets a line of its own rather than
/// being split mid-word.
pub fn wrap_label(label: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in label.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// A wrapped label positioned inside a box, ready to render.
///
/// Lines are centered horizontally on the box and the block is
/// centered vertically within the box height.
#[derive(Debug, Clone)]
pub struct LabelBlock {
    lines: Vec<String>,
    center_x: f32,
    start_y: f32,
}

impl LabelBlock {
    /// Wraps `label` and positions it inside a box whose top-left
    /// corner is `origin` and whose height is `box_height`, assuming
    /// the box is `box_width` wide.
    pub fn new(label: &str, origin: Point, box_width: f32, box_height: f32) -> Self {
        let lines = wrap_label(label, LABEL_WRAP_CHARS);
        let total_height = lines.len() as f32 * LABEL_LINE_HEIGHT;
        let start_y = origin.y() + (box_height - total_height) / 2.0 + LABEL_LINE_HEIGHT / 2.0;

        Self {
            lines,
            center_x: origin.x() + box_width / 2.0,
            start_y,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Baseline for the library-module underline, 8 units below the
    /// last text line.
    pub fn underline_y(&self) -> f32 {
        self.start_y + (self.lines.len().saturating_sub(1)) as f32 * LABEL_LINE_HEIGHT + 8.0
    }

    /// Renders one `<text>` element per wrapped line.
    pub fn render(&self, fill: &str) -> Vec<svg_element::Text> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                svg_element::Text::new(line.clone())
                    .set("x", self.center_x)
                    .set("y", self.start_y + i as f32 * LABEL_LINE_HEIGHT)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("font-family", "Arial, sans-serif")
                    .set("font-size", 12)
                    .set("fill", fill)
                    .set("font-weight", 500)
            })
            .collect()
    }
}
