//! Command-line interface

use std::path::PathBuf;

use anyhow::{Context, Result};
use boxmaker_camtools::notched_box::{BoxRequest, LayoutOptions};
use boxmaker_camtools::render::render_descriptor;
use boxmaker_camtools::sink::{open_sink, LaserOptions, SinkOptions};
use boxmaker_core::{parse_length, MeasurementSystem, OutputFormat};
use boxmaker_settings::Config;
use clap::Parser;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Debug, Parser)]
#[command(
    name = "boxmaker",
    about = "Generate a laser-cuttable notched box as SVG, DXF or G-code",
    version,
    long_version = LONG_VERSION
)]
pub struct Cli {
    /// Box width (fractions such as 3/8 are accepted in imperial units)
    #[arg(short = 'W', long)]
    pub width: String,

    /// Box height
    #[arg(short = 'H', long)]
    pub height: String,

    /// Box depth
    #[arg(short = 'D', long)]
    pub depth: String,

    /// Material thickness
    #[arg(short = 'T', long)]
    pub thickness: String,

    /// Cut width of the laser beam
    #[arg(short = 'k', long)]
    pub kerf: Option<String>,

    /// Nominal notch length (defaults to 2.5 x thickness)
    #[arg(short = 'n', long = "notch-length")]
    pub notch_length: Option<String>,

    /// Dimensions are internal; material thickness is added on every side
    #[arg(short = 'i', long)]
    pub internal: bool,

    /// Draw a bounding box around the panels
    #[arg(short = 'b', long = "bounding-box")]
    pub bounding_box: bool,

    /// Measurement system for all lengths: metric or imperial
    #[arg(short = 'u', long)]
    pub units: Option<MeasurementSystem>,

    /// Output file
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// Output format: svg, dxf or gcode (default: from the file extension)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Configuration file (.toml or .json)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Build the box request in working millimetres
    fn request(&self, config: &Config, units: MeasurementSystem) -> Result<BoxRequest> {
        let length = |name: &str, value: &str| {
            parse_length(value, units).with_context(|| format!("Invalid {}", name))
        };

        let kerf = match &self.kerf {
            Some(k) => length("kerf", k)?,
            None => units.to_mm(config.defaults.kerf),
        };
        let notch_length = match &self.notch_length {
            Some(n) => Some(length("notch length", n)?),
            None => config.defaults.notch_length.map(|n| units.to_mm(n)),
        };

        Ok(BoxRequest {
            width: length("width", &self.width)?,
            height: length("height", &self.height)?,
            depth: length("depth", &self.depth)?,
            thickness: length("thickness", &self.thickness)?,
            kerf,
            notch_length,
            internal: self.internal,
            units: MeasurementSystem::Metric,
        })
    }

    fn output_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or_else(|| OutputFormat::from_path(&self.file))
            .unwrap_or(config.output.format)
    }
}

fn layout_options(cli: &Cli, config: &Config, units: MeasurementSystem) -> LayoutOptions {
    LayoutOptions {
        margin: config.layout.margin_mm,
        draw_bounding_box: cli.bounding_box || config.defaults.draw_bounding_box,
        annotate: config.layout.annotate,
        display_units: units,
        font_size: config.layout.font_size_mm,
    }
}

fn sink_options(config: &Config) -> SinkOptions {
    SinkOptions {
        dpi: config.output.dpi,
        stroke_width: config.output.stroke_width_mm,
        font_size: config.layout.font_size_mm,
        laser: LaserOptions {
            passes: config.laser.passes,
            power: config.laser.power,
            feed_rate: config.laser.feed_rate,
            z_step_down: config.laser.z_step_down,
        },
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let units = cli.units.unwrap_or(config.defaults.units);
    let request = cli.request(&config, units)?;
    let format = cli.output_format(&config);
    tracing::info!(
        "Box {} x {} x {} mm, material {} mm, kerf {} mm",
        request.width,
        request.height,
        request.depth,
        request.thickness,
        request.kerf
    );

    // Reject impossible boxes before the output file is touched
    let descriptor = request.descriptor().context("Invalid box dimensions")?;
    tracing::debug!("Notch counts: {:?}", descriptor);

    let mut sink = open_sink(format, &cli.file, &sink_options(&config));
    render_descriptor(&descriptor, &layout_options(&cli, &config, units), sink.as_mut())
        .with_context(|| format!("Failed to write {}", cli.file.display()))?;

    tracing::info!("Saved {} box to {}", format, cli.file.display());
    Ok(())
}
