mod device;
mod options;
mod settings;
mod value;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use device::{is_mobile_device, ScreenSize};
pub use options::{sort_by_position, OptionColors, OptionEntry, OptionError, OptionKind, UtilityAction};
pub use settings::{
    resolve, ResponsiveOffsets, Settings, DEFAULT_MAX_CHARACTER_LIMIT, DEFAULT_MIN_TEXT_LENGTH,
    DEFAULT_POSITION_OFFSET_X, DEFAULT_POSITION_OFFSET_Y,
};

const APP_DIR: &str = "selection-lookup";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("settings file {path} does not exist")]
    Missing { path: PathBuf },
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Settings the host left in `settings.json`, or defaults when there are none.
pub fn load_host_settings() -> Settings {
    let (xdg_config_home, home) = config_env_dirs();
    let path = match settings_path(xdg_config_home.as_deref(), home.as_deref()) {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(%err, "no settings directory; using defaults");
            return Settings::default();
        }
    };
    load_settings_or_default(&path)
}

pub fn load_settings_or_default(path: &Path) -> Settings {
    match load_settings_file(path) {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(err) => {
            tracing::warn!(%err, "failed to load settings; using defaults");
            Settings::default()
        }
    }
}

/// Settings from a file the user named explicitly; it must exist.
pub fn load_settings_override(path: &Path) -> ConfigResult<Settings> {
    load_settings_file(path)?.ok_or_else(|| ConfigError::Missing {
        path: path.to_path_buf(),
    })
}

/// `Ok(None)` when the file does not exist.
pub fn load_settings_file(path: &Path) -> ConfigResult<Option<Settings>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let raw: serde_json::Value =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(resolve(Some(&raw))))
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn settings_path(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<PathBuf> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(APP_DIR);
    path.push(SETTINGS_FILE);
    Ok(path)
}

fn config_root(xdg_config_home: Option<&Path>, home: Option<&Path>) -> ConfigResult<PathBuf> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
