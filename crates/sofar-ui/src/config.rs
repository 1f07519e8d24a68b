//! Toolkit configuration.
//!
//! A [`UiConfig`] is read once, when the [`UiContext`](crate::UiContext) is
//! created, and is immutable afterwards. Every field is optional in the TOML
//! form and falls back to the compiled-in defaults:
//!
//! ```toml
//! event_capacity = 32
//!
//! [style]
//! font_face = "sans-serif"
//! font_size = 13.0
//! spacing = 8
//! palette = [
//!     0x608fbd, 0xaaccee, 0xbd608f, 0xeeaacc, 0x8fbd60,
//!     0xcceeaa, 0xbd8f60, 0xeeccaa, 0x60bd8f, 0xaaeecc,
//!     0x8f60bd, 0xccaaee, 0x202126, 0x28292f, 0x31333a,
//!     0x383a42, 0xaeb5cd, 0xc3cbe7, 0xc8d0ec, 0xd7e0fe,
//! ]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::style::{Palette, Style};

/// Environment variable naming an optional configuration file.
pub const CONFIG_ENV: &str = "SOFAR_UI_CONFIG";

/// Default capacity of a backend's raw event ring.
pub const DEFAULT_EVENT_CAPACITY: usize = 32;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The palette array has the wrong number of entries.
    #[error("palette must have {expected} colors, found {found}")]
    PaletteLength {
        /// Required number of colours.
        expected: usize,
        /// Number of colours supplied.
        found: usize,
    },

    /// The event ring cannot hold any events.
    #[error("event_capacity must be at least 1")]
    ZeroEventCapacity,
}

/// Process-wide toolkit configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Style table handed to every widget at draw time.
    pub style: Style,
    /// Number of raw native events a backend buffers between polls.
    pub event_capacity: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            style: Style::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// TOML form of [`UiConfig`]; absent keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    style: StyleFile,
    event_capacity: Option<usize>,
}

/// TOML form of [`Style`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StyleFile {
    font_face: Option<String>,
    font_size: Option<f32>,
    palette: Option<Vec<u32>>,
    spacing: Option<i32>,
}

impl StyleFile {
    fn resolve(self) -> Result<Style, ConfigError> {
        let defaults = Style::default();
        let palette = match self.palette {
            Some(hex) => Palette::try_from(hex)?,
            None => defaults.palette,
        };
        Ok(Style {
            font_face: self.font_face.unwrap_or(defaults.font_face),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            palette,
            spacing: self.spacing.unwrap_or(defaults.spacing),
        })
    }
}

impl UiConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        let event_capacity = file.event_capacity.unwrap_or(DEFAULT_EVENT_CAPACITY);
        if event_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }
        Ok(Self {
            style: file.style.resolve()?,
            event_capacity,
        })
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from the file named by [`CONFIG_ENV`], or return the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                tracing::debug!(path = ?path, "loading ui config");
                Self::load(PathBuf::from(path))
            }
            None => Ok(Self::default()),
        }
    }
}
