use crate::config::ConfigError;
use std::path::PathBuf;

pub const GLOBAL_STATE_DIR: &str = ".sonicseq";
pub const GLOBAL_SETTINGS_FILE_NAME: &str = "config.yaml";
pub const GLOBAL_LOG_FILE_NAME: &str = "logs/sonicseq.log";

pub const CONFIG_PATH_ENV: &str = "SONICSEQ_CONFIG";
pub const LOG_PATH_ENV: &str = "SONICSEQ_LOG_PATH";
pub const API_BASE_ENV: &str = "SONICSEQ_API_BASE";

pub(crate) fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn global_state_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(GLOBAL_STATE_DIR))
}

pub fn default_global_config_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env_path(CONFIG_PATH_ENV) {
        return Ok(path);
    }
    Ok(global_state_dir()?.join(GLOBAL_SETTINGS_FILE_NAME))
}

pub fn default_log_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env_path(LOG_PATH_ENV) {
        return Ok(path);
    }
    Ok(global_state_dir()?.join(GLOBAL_LOG_FILE_NAME))
}
