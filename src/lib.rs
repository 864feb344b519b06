//! # BoxMaker
//!
//! Generates laser-cuttable flat patterns for six-sided boxes joined by
//! straight finger joints.
//!
//! ## Architecture
//!
//! BoxMaker is organized as a workspace with multiple crates:
//!
//! 1. **boxmaker-core** - Geometry primitives, units, output format selection
//! 2. **boxmaker-camtools** - Dimension normalization, panel layout, edge generation, sinks
//! 3. **boxmaker-settings** - TOML/JSON configuration
//! 4. **boxmaker** - Command-line binary that ties the crates together
//!
//! ## Features
//!
//! - **Odd notch counts**: every edge starts and ends with the same tab parity
//! - **Kerf compensation**: tabs grow and slots shrink by half the beam width
//! - **Output formats**: SVG, DXF and laser G-code

pub mod cli;

pub use boxmaker_camtools::{
    render_box, BoxLayout, BoxRequest, CamToolError, LayoutOptions, SinkOptions, VectorSink,
};
pub use boxmaker_core::{MeasurementSystem, OutputFormat};
pub use boxmaker_settings::Config;
pub use cli::{run, Cli};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so stdout stays free for the program
/// - RUST_LOG environment variable support, INFO otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.as_str()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
