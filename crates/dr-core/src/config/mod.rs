//! Configuration loading for the dynreport CLI.
//!
//! This module handles:
//! - Locating `dynreport.toml` (CLI > env > XDG > defaults)
//! - Parsing its `[export]` and `[log]` tables
//! - Recording where the configuration came from for diagnostics

use crate::logging::LogFileSettings;
use dr_report::ExportConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name looked up inside config directories.
pub const CONFIG_FILE_NAME: &str = "dynreport.toml";

/// Directory name under the XDG config home.
const CONFIG_DIR_NAME: &str = "dynreport";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid export settings in {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Contents of `dynreport.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub export: ExportConfig,
    pub log: LogFileSettings,
}

/// Where the active configuration was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config PATH`.
    Cli(PathBuf),
    /// `DYNREPORT_CONFIG` file path.
    EnvFile(PathBuf),
    /// `dynreport.toml` inside `DYNREPORT_CONFIG_DIR`.
    EnvDir(PathBuf),
    /// `dynreport.toml` inside the XDG config directory.
    Xdg(PathBuf),
    /// No file found; built-in defaults.
    Defaults,
}

impl ConfigSource {
    /// Path of the file that was loaded, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Cli(p)
            | ConfigSource::EnvFile(p)
            | ConfigSource::EnvDir(p)
            | ConfigSource::Xdg(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Cli(p) => write!(f, "--config {}", p.display()),
            ConfigSource::EnvFile(p) => write!(f, "DYNREPORT_CONFIG {}", p.display()),
            ConfigSource::EnvDir(p) => write!(f, "DYNREPORT_CONFIG_DIR {}", p.display()),
            ConfigSource::Xdg(p) => write!(f, "XDG {}", p.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub file: FileConfig,
    pub source: ConfigSource,
}

/// Configuration resolution inputs.
///
/// Built from the process environment by [`ConfigOptions::from_env`]; tests
/// construct it directly.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit `--config` file (highest priority, must exist).
    pub config_path: Option<PathBuf>,
    /// `DYNREPORT_CONFIG` file (must exist when set).
    pub env_config: Option<PathBuf>,
    /// `DYNREPORT_CONFIG_DIR` directory (file optional).
    pub env_config_dir: Option<PathBuf>,
    /// XDG config directory for dynreport (file optional).
    pub xdg_dir: Option<PathBuf>,
}

impl ConfigOptions {
    /// Read the environment, keeping an explicit CLI path on top.
    pub fn from_env(config_path: Option<PathBuf>) -> Self {
        let non_empty = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            config_path,
            env_config: non_empty("DYNREPORT_CONFIG"),
            env_config_dir: non_empty("DYNREPORT_CONFIG_DIR"),
            xdg_dir: dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME)),
        }
    }
}

/// Load configuration with the standard resolution order.
///
/// Resolution order (highest to lowest priority):
/// 1. `--config PATH`
/// 2. `DYNREPORT_CONFIG` (a file)
/// 3. `DYNREPORT_CONFIG_DIR` (a directory holding `dynreport.toml`)
/// 4. XDG config home (`~/.config/dynreport/dynreport.toml`)
/// 5. Built-in defaults
///
/// Only the first candidate that applies is consulted; files are never
/// merged.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let source = resolve_source(options)?;
    let file = match source.path() {
        Some(path) => load_file(path)?,
        None => FileConfig::default(),
    };
    debug!(source = %source, "configuration resolved");
    Ok(ResolvedConfig { file, source })
}

fn resolve_source(options: &ConfigOptions) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = &options.config_path {
        return require(path).map(|p| ConfigSource::Cli(p.to_path_buf()));
    }
    if let Some(path) = &options.env_config {
        return require(path).map(|p| ConfigSource::EnvFile(p.to_path_buf()));
    }
    if let Some(dir) = &options.env_config_dir {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            return Ok(ConfigSource::EnvDir(path));
        }
        // An explicit directory without a file means defaults, not XDG.
        return Ok(ConfigSource::Defaults);
    }
    if let Some(dir) = &options.xdg_dir {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            return Ok(ConfigSource::Xdg(path));
        }
    }
    Ok(ConfigSource::Defaults)
}

fn require(path: &Path) -> Result<&Path, ConfigError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Parse a configuration file.
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let file: FileConfig = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;
    file.export.validate().map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(file)
}
