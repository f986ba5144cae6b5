use std::path::{Path, PathBuf};

use gait_camera::OrbitCameraConfig;
use gait_common::ConfigError;
use gait_locomotion::LocomotionConfig;
use gait_motor::PlaneMotorConfig;
use serde::{Deserialize, Serialize};

/// Errors from reading a [`SimulationConfig`] file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// On-disk encodings a config can be read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigLoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigLoadError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Everything needed to build a [`crate::Simulation`] over a plane motor.
///
/// Missing fields in a file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub locomotion: LocomotionConfig,
    pub camera: OrbitCameraConfig,
    pub motor: PlaneMotorConfig,
    /// Height above the body origin that the camera orbits.
    pub anchor_height: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            camera: OrbitCameraConfig::default(),
            motor: PlaneMotorConfig::default(),
            anchor_height: 1.5,
        }
    }
}

impl SimulationConfig {
    /// Validate every nested config and the anchor height.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locomotion.validate()?;
        self.camera.validate()?;
        self.motor.validate()?;
        if !self.anchor_height.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "anchor_height",
            });
        }
        Ok(())
    }

    /// Read and validate a config file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, format)?;
        tracing::debug!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    /// Parse and validate config text.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigLoadError> {
        let config: Self = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(text)?,
            ConfigFormat::Json => serde_json::from_str(text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config in `format`.
    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigLoadError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }
}
