//! Configuration and settings management for BoxMaker
//!
//! Provides configuration file handling and validation. Supports JSON and TOML
//! file formats, with a default location in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Box defaults (display units, kerf, notch length, bounding box)
//! - Layout (margin, annotations, text size)
//! - Output (format, SVG resolution, stroke width)
//! - Laser (passes, power, feed rate for G-code output)

pub use boxmaker_core::{MeasurementSystem, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Name of the directory created under the platform config directory
pub const APP_DIR: &str = "boxmaker";

/// File name of the default configuration
pub const CONFIG_FILE: &str = "config.toml";

/// Values applied when the command line leaves them out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxDefaults {
    /// Unit used for input values and annotation text
    pub units: MeasurementSystem,
    /// Cut width, in `units`
    pub kerf: f64,
    /// Nominal notch length, in `units`; derived from thickness when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notch_length: Option<f64>,
    /// Draw a rectangle around all panels
    pub draw_bounding_box: bool,
}

impl Default for BoxDefaults {
    fn default() -> Self {
        Self {
            units: MeasurementSystem::Metric,
            kerf: 0.1,
            notch_length: None,
            draw_bounding_box: false,
        }
    }
}

/// Page layout preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Spacing between panels (mm)
    pub margin_mm: f64,
    /// Emit text lines listing the box settings
    pub annotate: bool,
    /// Annotation text height (mm)
    pub font_size_mm: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            margin_mm: 12.7,
            annotate: true,
            font_size_mm: 3.0,
        }
    }
}

/// Output file preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Format used when the output extension is not recognized
    pub format: OutputFormat,
    /// Resolution used to express the SVG page size in points
    pub dpi: f64,
    /// Stroke width (mm)
    pub stroke_width_mm: f64,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Svg,
            dpi: 72.0,
            stroke_width_mm: 0.1,
        }
    }
}

/// Laser settings for G-code output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    pub passes: u32,
    /// S word sent with M3
    pub power: u32,
    /// mm/min
    pub feed_rate: f64,
    /// Z lowered between passes (mm)
    pub z_step_down: f64,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            passes: 1,
            power: 1000,
            feed_rate: 500.0,
            z_step_down: 0.5,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: BoxDefaults,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub laser: LaserSettings,
}

#[derive(Clone, Copy)]
enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> SettingsResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(FileFormat::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(FileFormat::Toml),
        _ => Err(SettingsError::UnsupportedFormat(path.to_path_buf())),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/boxmaker/config.toml`, falling back to the home directory
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = file_format(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path`, or return defaults when it does not exist
    pub fn load_if_exists(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load an explicitly named file, or the default location when none is given.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> SettingsResult<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Ok(path) => Self::load_if_exists(&path),
                Err(e) => {
                    tracing::warn!("{}; using default settings", e);
                    Ok(Self::default())
                }
            },
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match file_format(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let d = &self.defaults;
        if !d.kerf.is_finite() || d.kerf < 0.0 {
            return Err(SettingsError::invalid("defaults.kerf", "must be >= 0"));
        }
        if let Some(n) = d.notch_length {
            if !n.is_finite() || n <= 0.0 {
                return Err(SettingsError::invalid("defaults.notch_length", "must be > 0"));
            }
        }

        let l = &self.layout;
        if !l.margin_mm.is_finite() || l.margin_mm <= 0.0 {
            return Err(SettingsError::invalid("layout.margin_mm", "must be > 0"));
        }
        // Panels grow by up to one kerf into the margin
        if l.margin_mm <= d.units.to_mm(d.kerf) {
            return Err(SettingsError::invalid(
                "layout.margin_mm",
                "must be larger than defaults.kerf",
            ));
        }
        if !l.font_size_mm.is_finite() || l.font_size_mm <= 0.0 {
            return Err(SettingsError::invalid("layout.font_size_mm", "must be > 0"));
        }

        let o = &self.output;
        if !o.dpi.is_finite() || o.dpi <= 0.0 {
            return Err(SettingsError::invalid("output.dpi", "must be > 0"));
        }
        if !o.stroke_width_mm.is_finite() || o.stroke_width_mm <= 0.0 {
            return Err(SettingsError::invalid("output.stroke_width_mm", "must be > 0"));
        }

        let laser = &self.laser;
        if laser.passes == 0 {
            return Err(SettingsError::invalid("laser.passes", "must be at least 1"));
        }
        if !laser.feed_rate.is_finite() || laser.feed_rate <= 0.0 {
            return Err(SettingsError::invalid("laser.feed_rate", "must be > 0"));
        }
        if !laser.z_step_down.is_finite() || laser.z_step_down < 0.0 {
            return Err(SettingsError::invalid("laser.z_step_down", "must be >= 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout.margin_mm, 12.7);
        assert_eq!(config.output.format, OutputFormat::Svg);
        assert_eq!(config.defaults.units, MeasurementSystem::Metric);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [defaults]
            units = "imperial"
            kerf = 0.004

            [laser]
            passes = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.defaults.units, MeasurementSystem::Imperial);
        assert_eq!(config.defaults.kerf, 0.004);
        assert!(!config.defaults.draw_bounding_box);
        assert_eq!(config.laser.passes, 3);
        assert_eq!(config.laser.power, 1000);
        assert_eq!(config.layout, LayoutSettings::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::new();
        config.defaults.kerf = -0.1;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.laser.passes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("laser.passes"));

        let mut config = Config::new();
        config.defaults.notch_length = Some(0.0);
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.output.dpi = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_margin_must_exceed_kerf() {
        let mut config = Config::new();
        config.layout.margin_mm = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("layout.margin_mm"));

        config.layout.margin_mm = -5.0;
        assert!(config.validate().is_err());

        config.layout.margin_mm = 0.2;
        config.defaults.kerf = 0.3;
        assert!(config.validate().is_err());

        config.defaults.kerf = 0.01;
        config.defaults.units = MeasurementSystem::Imperial;
        assert!(config.validate().is_err());

        config.layout.margin_mm = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_path_layout() {
        if let Ok(path) = Config::default_path() {
            assert!(path.ends_with("boxmaker/config.toml"));
        }
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = Config::load_from_file(Path::new("settings.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
    }
}
