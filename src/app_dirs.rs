//! Where tensaudio keeps `config.toml` and its log files.
//!
//! Everything lives under `<base>/.tensaudio`. The base is the first of: an
//! in-process override (tests only), a non-empty `TENSAUDIO_CONFIG_HOME`, the
//! OS config directory reported by `directories`.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory under the base directory.
pub const APP_DIR_NAME: &str = ".tensaudio";
/// Environment variable that replaces the OS config directory as the base.
pub const CONFIG_HOME_ENV: &str = "TENSAUDIO_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

static BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

#[derive(Debug, Error)]
pub enum AppDirError {
    /// Neither the override, the environment nor the OS named a base directory.
    #[error("No base directory for tensaudio files (set {CONFIG_HOME_ENV})")]
    NoBaseDir,
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Which rule picked the base directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSource {
    Override,
    Environment,
    System,
}

/// The resolved, existing `.tensaudio` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
    source: BaseSource,
}

impl AppDirs {
    /// Pick the base directory and create the app root under it.
    pub fn resolve() -> Result<Self, AppDirError> {
        let override_base = BASE_OVERRIDE
            .lock()
            .ok()
            .and_then(|guard| guard.clone());
        let system = BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf());
        let (base, source) = pick_base(override_base, std::env::var_os(CONFIG_HOME_ENV), system)
            .ok_or(AppDirError::NoBaseDir)?;
        let root = create_dir(base.join(APP_DIR_NAME))?;
        tracing::debug!(root = %root.display(), ?source, "resolved app directory");
        Ok(Self { root, source })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source(&self) -> BaseSource {
        self.source
    }

    /// `<root>/logs`, created on demand.
    pub fn logs_dir(&self) -> Result<PathBuf, AppDirError> {
        create_dir(self.root.join(LOGS_DIR_NAME))
    }
}

fn pick_base(
    override_base: Option<PathBuf>,
    env_base: Option<OsString>,
    system_base: Option<PathBuf>,
) -> Option<(PathBuf, BaseSource)> {
    override_base
        .map(|path| (path, BaseSource::Override))
        .or_else(|| {
            env_base
                .filter(|value| !value.is_empty())
                .map(|value| (PathBuf::from(value), BaseSource::Environment))
        })
        .or_else(|| system_base.map(|path| (path, BaseSource::System)))
}

fn create_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Points the base directory at a temp dir until dropped.
///
/// Holds a process-wide lock so tests sharing the override run one at a time.
#[cfg(test)]
pub(crate) struct OverrideGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl OverrideGuard {
    pub(crate) fn set(path: PathBuf) -> Self {
        static TEST_LOCK: Mutex<()> = Mutex::new(());
        let lock = TEST_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        *BASE_OVERRIDE.lock().unwrap_or_else(|err| err.into_inner()) = Some(path);
        Self { _lock: lock }
    }
}

#[cfg(test)]
impl Drop for OverrideGuard {
    fn drop(&mut self) {
        *BASE_OVERRIDE.lock().unwrap_or_else(|err| err.into_inner()) = None;
    }
}
