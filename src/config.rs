//! TOML settings with defaults for STFT geometry and encoder precision.
//!
//! ```toml
//! [stft]
//! window_size = 1024
//! window_type = "hann"
//! hop = 512
//!
//! [encode]
//! bits_per_sample = 32
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{AppDirError, AppDirs};
use crate::codec::{CodecError, EncodeOptions};
use crate::stft::{StftError, StftParams};

/// File name of the settings file inside the app directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    /// Failed to read the settings file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the settings file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`Settings`].
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config for {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// The STFT section holds values the engine rejects.
    #[error("Invalid [stft] settings in {path}: {source}")]
    Stft { path: PathBuf, source: StftError },
    /// The encode section holds values the encoder rejects.
    #[error("Invalid [encode] settings in {path}: {source}")]
    Encode { path: PathBuf, source: CodecError },
}

/// User-tunable defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub stft: StftParams,
    pub encode: EncodeOptions,
}

/// Resolve the settings file inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(AppDirs::resolve()?.root().join(CONFIG_FILE_NAME))
}

/// Load settings from the app directory, falling back to defaults when absent.
pub fn load_or_default() -> Result<Settings, ConfigError> {
    load_from(&config_path()?)
}

/// Load settings from `path`; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    settings
        .stft
        .validate()
        .map_err(|source| ConfigError::Stft {
            path: path.to_path_buf(),
            source,
        })?;
    settings
        .encode
        .validate()
        .map_err(|source| ConfigError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(settings)
}

/// Write settings to `path`, creating parent directories.
pub fn save_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
