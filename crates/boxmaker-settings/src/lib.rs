//! BoxMaker Settings Crate
//!
//! Handles application configuration: defaults for box parameters, page layout,
//! output format and laser settings, persisted as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{
    BoxDefaults, Config, LaserSettings, LayoutSettings, OutputSettings, APP_DIR, CONFIG_FILE,
};
pub use error::{SettingsError, SettingsResult};
