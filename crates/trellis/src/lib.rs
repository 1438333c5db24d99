//! Trellis - structure charts from a text-based DSL.
//!
//! Parsing, hierarchy inference, tree layout, and SVG rendering for
//! structure-chart definitions. The whole pipeline is total: any
//! input string compiles to markup, degrading to a placeholder
//! document when nothing could be drawn.

pub mod config;

mod export;
mod layout;
mod structure;

pub use trellis_core::{chart, draw, geometry};
pub use trellis_parser::{Diagnostic, Severity};

use log::{debug, info, warn};
use sha2::{Digest, Sha256};

use chart::Chart;
use config::AppConfig;
use export::svg::SvgRenderer;
use structure::Hierarchy;

/// Builder for parsing and rendering structure charts.
///
/// # Examples
///
/// ```rust
/// use trellis::{ChartBuilder, config::AppConfig};
///
/// let source = "module main \"Main\"\nmodule sub \"Sub\"\nmain -> sub\n";
///
/// let builder = ChartBuilder::new(AppConfig::default());
/// let chart = builder.parse(source);
/// let svg = builder.render_svg(&chart);
/// assert!(svg.contains("data-module-id=\"main\""));
///
/// // Or go straight to embeddable markup
/// let markup = builder.compile(source);
/// assert!(markup.starts_with("<div class=\"diagram-container\""));
/// ```
#[derive(Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse source text into a chart, discarding diagnostics.
    ///
    /// Parsing never fails; dropped lines are logged as warnings.
    pub fn parse(&self, source: &str) -> Chart {
        self.parse_with_diagnostics(source).0
    }

    /// Parse source text, returning the chart together with a
    /// diagnostic per line the parser had to drop.
    pub fn parse_with_diagnostics(&self, source: &str) -> (Chart, Vec<Diagnostic>) {
        info!("Parsing chart definition");

        let (chart, diagnostics) = trellis_parser::parse(source);
        for diagnostic in &diagnostics {
            warn!("{diagnostic}");
        }

        debug!(modules = chart.modules().len(); "Chart parsed");
        (chart, diagnostics)
    }

    /// Render a chart to an SVG document string.
    ///
    /// A chart in which no module could be placed renders as a fixed
    /// placeholder document rather than failing.
    pub fn render_svg(&self, chart: &Chart) -> String {
        info!(modules = chart.modules().len(); "Building chart hierarchy");
        let hierarchy = Hierarchy::from_chart(chart);

        info!("Calculating layout");
        let layout = layout::solve(chart, &hierarchy);
        debug!(placed = layout.positions().len(); "Layout calculated");

        let svg = SvgRenderer::new(chart, &layout, self.config.style()).render();
        info!("SVG rendered");
        svg
    }

    /// Compile source text to the full embeddable markup: a container
    /// `div` addressed by the content hash of the source, the SVG, and
    /// the expand button the external viewer script binds to.
    pub fn compile(&self, source: &str) -> String {
        let chart = self.parse(source);
        let svg = self.render_svg(&chart);
        let id = diagram_id(source);

        format!(
            "<div class=\"diagram-container\" id=\"diagram-{id}\">\n\
             {svg}\n\
             <button class=\"diagram-expand-btn\" onclick=\"openDiagramModal('diagram-{id}')\">\u{1F50D} View Larger</button>\n\
             </div>"
        )
    }
}

/// Content-addressed diagram id: the first eight hex characters of
/// the SHA-256 digest of the raw source text.
pub fn diagram_id(source: &str) -> String {
    let digest = Sha256::digest(source.as_bytes());
    digest[..4].iter().map(|byte| format!("{byte:02x}")).collect()
}
