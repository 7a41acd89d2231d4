use crate::config::{
    load_global_settings, resolve_api_key, ConfigError, LoadedSettings, Settings,
    API_KEY_ENV_VARS,
};
use crate::provider::GeminiClient;
use crate::shared::AppLog;

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn load_settings() -> Result<LoadedSettings, String> {
    load_global_settings().map_err(map_config_err)
}

/// Operator log for this run. An unresolvable path disables logging.
pub fn app_log(settings: &Settings) -> AppLog {
    match settings.resolve_log_path() {
        Ok(path) => AppLog::at(path),
        Err(_) => AppLog::disabled(),
    }
}

pub fn sequencing_client(settings: &Settings, log: AppLog) -> GeminiClient {
    GeminiClient::new(&settings.provider, resolve_api_key()).with_log(log)
}

pub fn missing_api_key_message() -> String {
    format!(
        "no API key found; set {} before sequencing",
        API_KEY_ENV_VARS.join(" or ")
    )
}
