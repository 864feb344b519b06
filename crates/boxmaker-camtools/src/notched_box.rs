//! Notched Box Maker
//!
//! Generates the flat pattern of a six-panel box joined by straight finger
//! joints. The pipeline is:
//!
//! 1. [`BoxRequest::descriptor`] resolves user input and calls [`normalize`],
//!    which picks an odd notch count per axis.
//! 2. [`plan_layout`] places the six panels on the page and resolves each
//!    panel's four edges from [`PANEL_TABLE`].
//! 3. [`generate_edge`] turns every edge into kerf-compensated line segments.
//!
//! All geometry is in millimetres.

pub mod edge;
pub mod layout;
pub mod normalize;
pub mod request;
pub mod types;

pub use edge::{generate_edge, EdgeSegments, EdgeSpec};
pub use layout::{
    plan_layout, template, Annotation, BoxLayout, EdgeTemplate, LayoutOptions, PageSize,
    PanelEdge, PanelLayout, PanelTemplate, DEFAULT_MARGIN_MM, PANEL_TABLE,
};
pub use normalize::{closest_odd, normalize};
pub use request::{BoxRequest, ResolvedRequest, DEFAULT_NOTCH_FACTOR};
pub use types::{
    Axis, AxisNotches, BoxDescriptor, EdgeSide, KerfSign, Orientation, PanelKind, TabLevel,
};
