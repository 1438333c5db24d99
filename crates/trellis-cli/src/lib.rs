//! CLI logic for the trellis structure-chart tool.

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::CliError;

use std::fs;

use log::info;

use trellis::ChartBuilder;

/// Run the trellis CLI application
///
/// Reads the input chart definition, compiles it, and writes either
/// the bare SVG document or the full embeddable markup to the output
/// file.
///
/// # Errors
///
/// Returns [`CliError`] for file I/O errors and configuration loading
/// errors. Compilation itself never fails.
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing chart"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ChartBuilder::new(app_config);
    let output = if args.wrap {
        builder.compile(&source)
    } else {
        let chart = builder.parse(&source);
        builder.render_svg(&chart)
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Chart exported successfully");

    Ok(())
}
