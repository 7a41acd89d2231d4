use super::paths::{env_path, API_BASE_ENV};
use super::{default_global_config_path, ConfigError, Settings};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: PathBuf,
    pub file_present: bool,
}

pub fn load_global_settings() -> Result<LoadedSettings, ConfigError> {
    let path = default_global_config_path()?;
    load_settings_from(&path)
}

/// Reads the settings file if present, applies env overrides and validates.
pub fn load_settings_from(path: &Path) -> Result<LoadedSettings, ConfigError> {
    let file_present = path.exists();
    let mut settings = if file_present {
        Settings::from_path(path)?
    } else {
        Settings::default()
    };
    if let Some(api_base) = env_path(API_BASE_ENV) {
        settings.provider.api_base = api_base.to_string_lossy().into_owned();
    }
    settings.validate()?;
    Ok(LoadedSettings {
        settings,
        path: path.to_path_buf(),
        file_present,
    })
}
