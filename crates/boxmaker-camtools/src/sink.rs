//! Vector output sinks
//!
//! A sink receives a page size, line segments, rectangles and text, and turns
//! them into a document. File-backed sinks buffer the whole document and only
//! write it in [`VectorSink::finish`], through a temporary file that is renamed
//! into place, so an aborted render never leaves a half-written output behind.

pub mod dxf;
pub mod gcode;
pub mod memory;
pub mod svg;

use std::fs;
use std::path::{Path, PathBuf};

use boxmaker_core::{OutputFormat, Point, Rect, Segment};
use serde::{Deserialize, Serialize};

use crate::error::{SinkError, SinkResult};

pub use self::dxf::DxfSink;
pub use self::gcode::{GcodeSink, LaserOptions};
pub use self::memory::{DrawCommand, MemorySink};
pub use self::svg::SvgSink;

/// Drawing surface consumed by the renderer
pub trait VectorSink {
    /// Open the document with the given page extents (working units)
    fn begin_page(&mut self, width: f64, height: f64) -> SinkResult<()>;

    /// Box settings the drawing was generated from, one line each
    fn describe(&mut self, _settings: &[String]) -> SinkResult<()> {
        Ok(())
    }

    /// Start a named group of drawing commands
    fn begin_panel(&mut self, _name: &str) -> SinkResult<()> {
        Ok(())
    }

    /// Close the group opened by [`begin_panel`](Self::begin_panel)
    fn end_panel(&mut self) -> SinkResult<()> {
        Ok(())
    }

    fn line(&mut self, segment: &Segment) -> SinkResult<()>;

    fn rectangle(&mut self, rect: &Rect) -> SinkResult<()>;

    fn text(&mut self, position: Point, text: &str) -> SinkResult<()>;

    /// Flush and close the document
    fn finish(&mut self) -> SinkResult<()>;
}

/// Presentation settings shared by the file sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkOptions {
    /// Page resolution used to express SVG page size in points
    pub dpi: f64,
    /// Stroke width (mm)
    pub stroke_width: f64,
    /// Text height (mm)
    pub font_size: f64,
    /// Laser settings for G-code output
    pub laser: LaserOptions,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            dpi: 72.0,
            stroke_width: 0.1,
            font_size: 3.0,
            laser: LaserOptions::default(),
        }
    }
}

/// Open a file sink for `format` writing to `path`
pub fn open_sink(
    format: OutputFormat,
    path: impl Into<PathBuf>,
    options: &SinkOptions,
) -> Box<dyn VectorSink> {
    let path = path.into();
    tracing::info!("Opening {} output at {}", format, path.display());
    match format {
        OutputFormat::Svg => Box::new(SvgSink::to_file(path, options.clone())),
        OutputFormat::Dxf => Box::new(DxfSink::to_file(path, options.clone())),
        OutputFormat::Gcode => Box::new(GcodeSink::to_file(path, options.laser.clone())),
    }
}

/// Write `contents` to `path` via a sibling temporary file
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> SinkResult<()> {
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".partial");
    let tmp = path.with_file_name(tmp_name);

    let result = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(SinkError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

pub(crate) fn check_page(width: f64, height: f64) -> SinkResult<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(SinkError::InvalidPage { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomically_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        write_atomically(&path, b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
        assert!(!dir.path().join("out.svg.partial").exists());
    }

    #[test]
    fn test_write_atomically_reports_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.svg");
        let err = write_atomically(&path, b"data").unwrap_err();
        assert!(matches!(err, SinkError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_check_page() {
        assert!(check_page(10.0, 20.0).is_ok());
        assert!(check_page(0.0, 20.0).is_err());
        assert!(check_page(f64::NAN, 20.0).is_err());
    }
}
