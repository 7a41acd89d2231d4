/// Environment variables consulted for the provider credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Present,
    Missing,
}

impl CredentialStatus {
    pub fn label(self) -> &'static str {
        match self {
            CredentialStatus::Present => "Ready",
            CredentialStatus::Missing => "No API Key",
        }
    }
}

pub fn resolve_api_key() -> Option<String> {
    resolve_api_key_with(|name| std::env::var(name).ok())
}

pub fn resolve_api_key_with<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

pub fn credential_status(api_key: Option<&str>) -> CredentialStatus {
    match api_key {
        Some(key) if !key.trim().is_empty() => CredentialStatus::Present,
        _ => CredentialStatus::Missing,
    }
}
