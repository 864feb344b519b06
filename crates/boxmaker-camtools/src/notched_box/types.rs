//! Type definitions for the Notched Box Maker

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three box axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Width,
    Height,
    Depth,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Width, Axis::Height, Axis::Depth];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
            Axis::Depth => "depth",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Notch layout of a single axis after normalization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisNotches {
    /// Final dimension, always `count * notch_length`
    pub length: f64,
    /// Odd number of notches along the axis
    pub count: usize,
    /// Exact length of each notch
    pub notch_length: f64,
}

/// Finalized box dimensions and notch layout.
///
/// Built by [`normalize`](super::normalize::normalize) and never mutated afterwards.
/// Serialize only; every instance comes out of normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxDescriptor {
    pub(crate) width: AxisNotches,
    pub(crate) height: AxisNotches,
    pub(crate) depth: AxisNotches,
    pub(crate) thickness: f64,
    pub(crate) kerf: f64,
    pub(crate) nominal_notch_length: f64,
}

impl BoxDescriptor {
    pub fn axis(&self, axis: Axis) -> &AxisNotches {
        match axis {
            Axis::Width => &self.width,
            Axis::Height => &self.height,
            Axis::Depth => &self.depth,
        }
    }

    pub fn width(&self) -> f64 {
        self.width.length
    }

    pub fn height(&self) -> f64 {
        self.height.length
    }

    pub fn depth(&self) -> f64 {
        self.depth.length
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn kerf(&self) -> f64 {
        self.kerf
    }

    pub fn half_kerf(&self) -> f64 {
        self.kerf / 2.0
    }

    /// The notch length that was requested before per-axis correction
    pub fn nominal_notch_length(&self) -> f64 {
        self.nominal_notch_length
    }
}

/// The six faces of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Back,
    Left,
    Bottom,
    Right,
    Front,
    Top,
}

impl PanelKind {
    /// Drawing order on the page
    pub const ALL: [PanelKind; 6] = [
        PanelKind::Back,
        PanelKind::Left,
        PanelKind::Bottom,
        PanelKind::Right,
        PanelKind::Front,
        PanelKind::Top,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PanelKind::Back => "back",
            PanelKind::Left => "left",
            PanelKind::Bottom => "bottom",
            PanelKind::Right => "right",
            PanelKind::Front => "front",
            PanelKind::Top => "top",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of a panel an edge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgeSide {
    pub fn orientation(self) -> Orientation {
        match self {
            EdgeSide::Top | EdgeSide::Bottom => Orientation::Horizontal,
            EdgeSide::Left | EdgeSide::Right => Orientation::Vertical,
        }
    }

    /// Whether the edge baseline is the panel's outer boundary.
    ///
    /// Top and left edges are drawn from the outer boundary inwards; bottom and
    /// right edges are drawn one thickness inside the boundary and recess outwards.
    pub fn baseline_is_outer(self) -> bool {
        matches!(self, EdgeSide::Top | EdgeSide::Left)
    }
}

/// Direction in which an edge's running coordinate advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Advances along +x, tabs recess along +y
    Horizontal,
    /// Advances along +y, tabs recess along +x
    Vertical,
}

/// Level of one notch step relative to the edge baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabLevel {
    /// Drawn on the baseline
    Out,
    /// Drawn one material thickness past the baseline
    In,
}

impl TabLevel {
    pub fn for_step(step: usize, flip: bool) -> Self {
        if (step % 2 == 0) ^ flip {
            TabLevel::Out
        } else {
            TabLevel::In
        }
    }
}

/// Sign applied to the half-kerf of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KerfSign {
    Positive,
    Negative,
}

impl KerfSign {
    pub fn apply(self, half_kerf: f64) -> f64 {
        match self {
            KerfSign::Positive => half_kerf,
            KerfSign::Negative => -half_kerf,
        }
    }
}
