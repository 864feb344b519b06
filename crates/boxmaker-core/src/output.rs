//! Output file formats
//!
//! Shared between the settings crate (default format) and the CAM tools crate
//! (sink selection).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Vector output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Scalable Vector Graphics
    #[default]
    Svg,
    /// AutoCAD Drawing Exchange Format
    Dxf,
    /// Laser G-code
    Gcode,
}

impl OutputFormat {
    /// Infer the format from a file extension, if it is a known one
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Canonical file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Dxf => "dxf",
            Self::Gcode => "gcode",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "dxf" => Ok(Self::Dxf),
            "gcode" | "nc" | "ngc" | "gc" => Ok(Self::Gcode),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("box.SVG")),
            Some(OutputFormat::Svg)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/box.nc")),
            Some(OutputFormat::Gcode)
        );
        assert_eq!(OutputFormat::from_path(Path::new("box.pdf")), None);
        assert_eq!(OutputFormat::from_path(Path::new("box")), None);
    }

    #[test]
    fn test_display_round_trip() {
        for format in [OutputFormat::Svg, OutputFormat::Dxf, OutputFormat::Gcode] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }
}
