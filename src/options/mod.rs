//! Options with TOML preset support.
//!
//! Options serialize to/from TOML. Every sub-struct uses `#[serde(default)]`
//! so partial files (e.g. only overriding `[render]`) work.

mod camera;
mod render;

use std::path::Path;

pub use camera::CameraOptions;
pub use render::{PrimitiveShape, RenderOptions};
use serde::{Deserialize, Serialize};

use crate::error::SplatterError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Target size, clear color and demo batch parameters.
    pub render: RenderOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SplatterError::Io`] if the file cannot be read and
    /// [`SplatterError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, SplatterError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SplatterError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, SplatterError> {
        toml::from_str(content)
            .map_err(|e| SplatterError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`SplatterError::OptionsParse`] if serialization fails and
    /// [`SplatterError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SplatterError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SplatterError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
