//! # BoxMaker CAM Tools
//!
//! Turns box dimensions into a cuttable flat pattern.
//!
//! ## Pipeline
//!
//! - **Notched Box**: dimension normalization, panel layout and edge generation
//! - **Render**: walks a layout and drives an output sink
//! - **Sinks**: SVG, DXF and G-code writers plus an in-memory recorder

pub mod error;
pub mod notched_box;
pub mod render;
pub mod sink;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult, DimensionError, DimensionResult, SinkError, SinkResult};
pub use notched_box::{
    generate_edge, normalize, plan_layout, BoxDescriptor, BoxLayout, BoxRequest, EdgeSpec,
    LayoutOptions, PanelKind,
};
pub use render::{emit, render_box, render_descriptor};
pub use sink::{
    open_sink, DrawCommand, DxfSink, GcodeSink, LaserOptions, MemorySink, SinkOptions, SvgSink,
    VectorSink,
};
