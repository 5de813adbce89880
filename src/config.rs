use std::fmt;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine::{Lighting, Projector, Surface};
use crate::shader::ShadingPolicy;
use crate::types::TerminalSize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub surface: Surface,
    pub lighting: Lighting,
    pub projector: Projector,
    pub policy: ShadingPolicy,
    /// Samples cover `[-domain, domain)` on both axes.
    pub domain: f32,
    /// Vertical stretch applied to field height before projection.
    pub height_scale: f32,
    pub rotation: RotationSpeed,
    pub frame_delay_ms: u64,
    /// Used when the terminal size cannot be read.
    pub default_size: TerminalSize,
}

/// Angle advance per frame, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSpeed {
    pub a: f32,
    pub b: f32,
}

impl Default for RotationSpeed {
    fn default() -> Self {
        RotationSpeed { a: 0.02, b: 0.03 }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            surface: Surface::default(),
            lighting: Lighting::default(),
            projector: Projector::default(),
            policy: ShadingPolicy::default(),
            domain: 14.0,
            height_scale: 4.0,
            rotation: RotationSpeed::default(),
            frame_delay_ms: 16,
            default_size: TerminalSize::default(),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    Invalid(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "loaded from {}", path.display()),
            ConfigSource::Missing(path) => write!(f, "defaults ({} not found)", path.display()),
            ConfigSource::Invalid(path) => write!(f, "defaults ({} is invalid)", path.display()),
        }
    }
}

impl RenderConfig {
    /// Load from the user config file, falling back to defaults when it is
    /// missing or invalid.
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> (Self, ConfigSource) {
        let path_buf = path.to_path_buf();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => (config, ConfigSource::File(path_buf)),
                Err(e) => {
                    warn!("invalid config {} ({e}), using defaults", path.display());
                    (Self::default(), ConfigSource::Invalid(path_buf))
                }
            },
            Err(_) => (Self::default(), ConfigSource::Missing(path_buf)),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("surface-spin");
        path.push("config.json");
        path
    }
}
