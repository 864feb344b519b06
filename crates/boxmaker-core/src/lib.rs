//! # BoxMaker Core
//!
//! Core types and utilities for BoxMaker.
//! Provides planar geometry primitives shared by the layout planner and the
//! output sinks, plus conversion between the user's measurement system and the
//! millimetre working unit, and the output format selector.

pub mod error;
pub mod geometry;
pub mod output;
pub mod units;

pub use error::{Result, UnitError};
pub use geometry::{Point, Rect, Segment, POINT_EPSILON};
pub use output::OutputFormat;
pub use units::{format_length, get_unit_label, parse_length, MeasurementSystem, MM_PER_INCH};
