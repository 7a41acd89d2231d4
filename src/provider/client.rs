use crate::album::AlbumData;
use crate::config::{credential_status, CredentialStatus, ProviderSettings};
use crate::provider::output_parse::{extract_candidate_text, parse_sequence_result};
use crate::provider::prompt::build_sequencing_prompt;
use crate::provider::schema::sequence_result_schema;
use crate::provider::types::{
    GenerateContentRequest, GenerationConfig, RequestContent, SequenceResult, SequencingError,
    TextPart, ThinkingConfig,
};
use crate::shared::AppLog;
use serde_json::json;

const ERROR_BODY_PREVIEW_CHARS: usize = 512;

/// Anything that can turn an album into a track ordering.
pub trait Sequencer: Send + Sync {
    fn sequence(&self, album: &AlbumData) -> Result<SequenceResult, SequencingError>;
}

/// Blocking client for the `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_base: String,
    model: String,
    thinking_budget: u32,
    api_key: Option<String>,
    log: AppLog,
}

impl GeminiClient {
    pub fn new(settings: &ProviderSettings, api_key: Option<String>) -> Self {
        Self {
            api_base: settings.api_base.trim().to_string(),
            model: settings.model.trim().to_string(),
            thinking_budget: settings.thinking_budget,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            log: AppLog::disabled(),
        }
    }

    pub fn with_log(mut self, log: AppLog) -> Self {
        self.log = log;
        self
    }

    pub fn credential_status(&self) -> CredentialStatus {
        credential_status(self.api_key.as_deref())
    }

    pub fn has_credential(&self) -> bool {
        self.credential_status() == CredentialStatus::Present
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(&self.model)
        )
    }

    pub fn build_request(&self, album: &AlbumData) -> GenerateContentRequest {
        let thinking_config = (self.thinking_budget > 0).then_some(ThinkingConfig {
            thinking_budget: self.thinking_budget,
        });
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![TextPart {
                    text: Some(build_sequencing_prompt(album)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: sequence_result_schema(),
                thinking_config,
            },
        }
    }
}

impl Sequencer for GeminiClient {
    fn sequence(&self, album: &AlbumData) -> Result<SequenceResult, SequencingError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SequencingError::Configuration("API key is missing".to_string())
        })?;

        let url = self.endpoint();
        let request = self.build_request(album);
        self.log.info(
            "sequencing.request",
            "dispatching sequencing request",
            &[
                ("model", json!(self.model)),
                ("album_title", json!(album.title)),
                ("track_count", json!(album.tracks.len())),
            ],
        );

        let body = serde_json::to_value(&request)
            .map_err(|e| SequencingError::Provider(format!("failed to encode request: {e}")))?;
        let response = ureq::post(&url)
            .set("x-goog-api-key", api_key)
            .set(
                "user-agent",
                concat!("sonicseq/", env!("CARGO_PKG_VERSION")),
            )
            .send_json(body)
            .map_err(provider_error)?;

        let text = response
            .into_string()
            .map_err(|e| SequencingError::response(format!("failed to read response body: {e}")))?;
        let candidate = extract_candidate_text(&text)?;
        parse_sequence_result(&candidate)
    }
}

fn provider_error(err: ureq::Error) -> SequencingError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            let preview = body
                .trim()
                .chars()
                .take(ERROR_BODY_PREVIEW_CHARS)
                .collect::<String>();
            SequencingError::Provider(format!("unexpected status {status}: {preview}"))
        }
        ureq::Error::Transport(transport) => SequencingError::Provider(transport.to_string()),
    }
}
