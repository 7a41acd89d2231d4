pub mod credentials;
pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use credentials::{credential_status, resolve_api_key, CredentialStatus, API_KEY_ENV_VARS};
pub use error::ConfigError;
pub use load::{load_global_settings, load_settings_from, LoadedSettings};
pub use paths::{
    default_global_config_path, default_log_path, API_BASE_ENV, CONFIG_PATH_ENV,
    GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR, LOG_PATH_ENV,
};
pub use settings::{
    ProviderSettings, Settings, DEFAULT_API_BASE, DEFAULT_MAX_TRACK_COUNT, DEFAULT_MODEL,
    DEFAULT_THINKING_BUDGET,
};
