//! Raw box requests as entered by the user.
//!
//! A request is expressed in the user's measurement system and may describe
//! internal dimensions. Resolving it converts everything into working
//! millimetres, applies the default notch length and turns internal dimensions
//! into external ones before the normalizer sees them.

use boxmaker_core::MeasurementSystem;
use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use super::types::BoxDescriptor;
use crate::error::DimensionResult;

/// Default notch length in multiples of material thickness
pub const DEFAULT_NOTCH_FACTOR: f64 = 2.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRequest {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub thickness: f64,
    #[serde(default)]
    pub kerf: f64,
    /// Nominal notch length; `DEFAULT_NOTCH_FACTOR * thickness` when absent
    #[serde(default)]
    pub notch_length: Option<f64>,
    /// The dimensions describe the inside of the box
    #[serde(default)]
    pub internal: bool,
    /// Unit the values above are expressed in
    #[serde(default)]
    pub units: MeasurementSystem,
}

impl Default for BoxRequest {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 60.0,
            depth: 40.0,
            thickness: 3.0,
            kerf: 0.1,
            notch_length: None,
            internal: false,
            units: MeasurementSystem::Metric,
        }
    }
}

/// A request converted to external dimensions in working millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRequest {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub thickness: f64,
    pub kerf: f64,
    pub notch_length: f64,
}

impl BoxRequest {
    pub fn resolve(&self) -> ResolvedRequest {
        let to_mm = |v: f64| self.units.to_mm(v);

        let thickness = to_mm(self.thickness);
        let notch_length = self
            .notch_length
            .map(to_mm)
            .unwrap_or(thickness * DEFAULT_NOTCH_FACTOR);

        let mut width = to_mm(self.width);
        let mut height = to_mm(self.height);
        let mut depth = to_mm(self.depth);
        if self.internal {
            tracing::info!("Converting from interior to exterior dimensions");
            width += 2.0 * thickness;
            height += 2.0 * thickness;
            depth += 2.0 * thickness;
        }

        ResolvedRequest {
            width,
            height,
            depth,
            thickness,
            kerf: to_mm(self.kerf),
            notch_length,
        }
    }

    /// Resolve and normalize in one step
    pub fn descriptor(&self) -> DimensionResult<BoxDescriptor> {
        let r = self.resolve();
        normalize(
            r.width,
            r.height,
            r.depth,
            r.thickness,
            r.kerf,
            r.notch_length,
        )
    }
}
