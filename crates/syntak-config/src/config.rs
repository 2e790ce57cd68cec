//! Runtime configuration loaded from TOML.
//!
//! Every section and field has a default, so a partial file (or none at all)
//! is a valid configuration. Range checks run in [`SynthConfig::validate`],
//! which `load` and `from_toml` call before returning.

use crate::{ConfigError, paths};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Allowed generation block sizes in samples.
pub const BLOCK_SIZE_RANGE: RangeInclusive<usize> = 64..=16384;

/// Allowed oscilloscope snapshot lengths in samples.
pub const SCOPE_SAMPLES_RANGE: RangeInclusive<usize> = 16..=8192;

/// Allowed oscilloscope refresh rates in Hz.
pub const REFRESH_HZ_RANGE: RangeInclusive<u32> = 1..=240;

/// Output backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// System audio device through cpal.
    #[default]
    Cpal,
    /// Raw 16-bit PCM byte stream to stdout or a file.
    Raw,
}

/// Byte order of raw PCM output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleByteOrder {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

/// `[audio]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Output backend.
    pub backend: Backend,
    /// Samples per generation block.
    pub block_size: usize,
    /// Case-insensitive substring of the cpal output device name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Raw backend target, `"-"` for stdout.
    pub raw_path: String,
    /// Raw backend byte order.
    pub byte_order: SampleByteOrder,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Cpal,
            block_size: 2048,
            device: None,
            raw_path: "-".to_string(),
            byte_order: SampleByteOrder::Big,
        }
    }
}

/// `[scope]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Samples per visualization snapshot.
    pub samples: usize,
    /// Snapshot cadence in Hz.
    pub refresh_hz: u32,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            samples: 512,
            refresh_hz: 60,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete syntak configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Output settings.
    pub audio: AudioConfig,
    /// Oscilloscope settings.
    pub scope: ScopeConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl SynthConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SynthConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, or the user config file when `path` is `None`.
    ///
    /// A missing user config file yields defaults. An explicit path must
    /// exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let path = paths::user_config_file();
                if path.is_file() {
                    Self::load(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save to a TOML file, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every ranged field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !BLOCK_SIZE_RANGE.contains(&self.audio.block_size) {
            return Err(ConfigError::invalid(
                "audio.block_size",
                format!(
                    "must be in {}..={}, got {}",
                    BLOCK_SIZE_RANGE.start(),
                    BLOCK_SIZE_RANGE.end(),
                    self.audio.block_size
                ),
            ));
        }
        if self.audio.raw_path.trim().is_empty() {
            return Err(ConfigError::invalid("audio.raw_path", "must not be empty"));
        }
        if !SCOPE_SAMPLES_RANGE.contains(&self.scope.samples) {
            return Err(ConfigError::invalid(
                "scope.samples",
                format!(
                    "must be in {}..={}, got {}",
                    SCOPE_SAMPLES_RANGE.start(),
                    SCOPE_SAMPLES_RANGE.end(),
                    self.scope.samples
                ),
            ));
        }
        if !REFRESH_HZ_RANGE.contains(&self.scope.refresh_hz) {
            return Err(ConfigError::invalid(
                "scope.refresh_hz",
                format!(
                    "must be in {}..={}, got {}",
                    REFRESH_HZ_RANGE.start(),
                    REFRESH_HZ_RANGE.end(),
                    self.scope.refresh_hz
                ),
            ));
        }
        Ok(())
    }
}
