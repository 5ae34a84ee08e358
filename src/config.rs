//! Render and application configuration.
//!
//! Configuration is plain JSON. Every field has a default, so an empty object
//! `{}` is a valid config file.

use crate::draw::geometry::Flip;
use crate::error::{EagleError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "EAGLE_SVG_CONFIG";

/// Options controlling the document-level SVG transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output units per native unit
    pub scale: f64,
    /// Blank border around the drawing, in output units
    pub margin: f64,
    /// Per-axis multiplier, `[1, -1]` turns EAGLE's y-up into SVG's y-down
    pub flip: Flip,
    /// Draw a translucent red outline of the bounding box
    pub add_bounding_box: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            margin: 10.0,
            flip: Flip::default(),
            add_bounding_box: false,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(EagleError::Config(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(EagleError::Config(format!(
                "margin must be zero or positive, got {}",
                self.margin
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderOptions,
    #[serde(default = "AppConfig::default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            log_level: Self::default_log_level(),
        }
    }
}

impl AppConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }

    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| EagleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| EagleError::Config(format!("{}: {}", path.display(), e)))?;
        config.render.validate()?;
        Ok(config)
    }

    /// `$EAGLE_SVG_CONFIG` if set, otherwise the defaults
    pub fn discover() -> Result<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }
}
