//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for box normalization,
//! parameter validation, and output sink failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::notched_box::types::Axis;

/// Errors that can occur while generating a box.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The requested box cannot be realized.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(#[from] DimensionError),

    /// The output sink could not be opened, written or finalized.
    #[error("Output sink failure: {0}")]
    SinkFailure(#[from] SinkError),
}

/// Errors raised while validating and normalizing box dimensions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    /// A value is NaN or infinite.
    #[error("'{name}' must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    /// A value that must be strictly positive is zero or negative.
    #[error("'{name}' must be greater than zero, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// Kerf may be zero but never negative.
    #[error("'kerf' must not be negative, got {value}")]
    NegativeKerf { value: f64 },

    /// The axis is shorter than a single notch.
    #[error(
        "{axis} of {dimension} cannot hold a single notch of length {notch_length} \
         (needs at least {notch_length} after kerf)"
    )]
    TooSmall {
        axis: Axis,
        dimension: f64,
        notch_length: f64,
    },

    /// The axis would need more notches than can be drawn.
    #[error("{axis} needs {notches:.0} notches, at most {limit} are supported")]
    TooManyNotches {
        axis: Axis,
        notches: f64,
        limit: usize,
    },

    /// Notches no longer than the material thickness turn the corner teeth inside out.
    #[error(
        "{axis} notch length {notch_length} must exceed thickness {thickness} plus kerf {kerf}"
    )]
    NotchTooShort {
        axis: Axis,
        notch_length: f64,
        thickness: f64,
        kerf: f64,
    },

    /// A layout setting is unusable.
    #[error("Layout '{name}' must be a finite number greater than zero, got {value}")]
    InvalidLayout { name: &'static str, value: f64 },

    /// Panels would touch or overlap.
    #[error("Margin {margin} must be larger than the kerf {kerf}")]
    MarginTooSmall { margin: f64, kerf: f64 },
}

/// Errors raised by vector sinks.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Drawing was attempted before `begin_page`.
    #[error("Page has not been opened")]
    PageNotOpen,

    /// `begin_page` was called twice.
    #[error("Page is already open")]
    PageAlreadyOpen,

    /// The page size is unusable.
    #[error("Invalid page size {width} x {height}")]
    InvalidPage { width: f64, height: f64 },

    /// The output format could not be determined.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The output file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The DXF encoder failed.
    #[error("DXF error: {0}")]
    Dxf(String),

    /// I/O error during sink operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for dimension validation.
pub type DimensionResult<T> = Result<T, DimensionError>;

/// Result type alias for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;
