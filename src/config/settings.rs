use super::paths::{default_log_path, env_path, LOG_PATH_ENV};
use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_THINKING_BUDGET: u32 = 32_768;
pub const DEFAULT_MAX_TRACK_COUNT: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    pub api_base: String,
    pub model: String,
    /// Token budget for the model's thinking phase; `0` omits the thinking config.
    pub thinking_budget: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            thinking_budget: DEFAULT_THINKING_BUDGET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub provider: ProviderSettings,
    /// Upper bound accepted for the requested track count on the details step.
    pub max_track_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderSettings::default(),
            max_track_count: DEFAULT_MAX_TRACK_COUNT,
            log_path: None,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`provider.model` must be non-empty".to_string(),
            ));
        }
        let api_base = self.provider.api_base.trim();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::Settings(format!(
                "`provider.api_base` must be an http(s) url, got `{api_base}`"
            )));
        }
        if self.max_track_count < 2 {
            return Err(ConfigError::Settings(
                "`max_track_count` must be at least 2".to_string(),
            ));
        }
        if let Some(path) = &self.log_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Settings(
                    "`log_path` must be non-empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Env override first, then the configured path, then the global default.
    pub fn resolve_log_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = env_path(LOG_PATH_ENV) {
            return Ok(path);
        }
        if let Some(path) = &self.log_path {
            return Ok(path.clone());
        }
        default_log_path()
    }
}
