//! User configuration loaded from `config.toml`.
//!
//! Lookup order: an explicit `--config` path (or `YASSS_CONFIG`), then
//! `<config dir>/yasss/config.toml`. A missing default file falls back to
//! built-in values; a missing explicit file is an error.

use crate::constants;
use crate::core::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors produced while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where the active configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config` or `YASSS_CONFIG`.
    Explicit,
    /// Found at the default location.
    Default,
    /// No file; built-in values.
    BuiltIn,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "--config"),
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::BuiltIn => write!(f, "built-in"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Also verify that each solution is unique.
    pub check_unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level when neither `RUST_LOG` nor `-v`/`-q` is given.
    pub level: String,
    /// Log destination for the editor, which owns the terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
    pub show_conflicts: bool,
    pub toast_duration_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: constants::DEFAULT_TICK_RATE,
            show_conflicts: true,
            toast_duration_ms: constants::DEFAULT_TOAST_MS,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub solver: SolverConfig,
    pub log: LogConfig,
    pub tui: TuiConfig,
}

/// `<config dir>/yasss/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME)
    })
}

impl AppConfig {
    /// Resolves and loads the configuration.
    ///
    /// Returns the config, where it came from, and the path consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or any file found
    /// cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource, PathBuf), ConfigError> {
        Self::load_from(explicit, default_config_path())
    }

    /// Like [`AppConfig::load`], with the default location supplied by the caller.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::load`].
    pub fn load_from(
        explicit: Option<&Path>,
        default_path: Option<PathBuf>,
    ) -> Result<(Self, ConfigSource, PathBuf), ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            let config = Self::from_file(path)?;
            return Ok((config, ConfigSource::Explicit, path.to_path_buf()));
        }

        let Some(path) = default_path else {
            return Ok((Self::default(), ConfigSource::BuiltIn, PathBuf::new()));
        };
        if path.is_file() {
            let config = Self::from_file(&path)?;
            Ok((config, ConfigSource::Default, path))
        } else {
            tracing::debug!(path = %path.display(), "no config file, using built-in defaults");
            Ok((Self::default(), ConfigSource::BuiltIn, path))
        }
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid config TOML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The effective configuration as TOML.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
