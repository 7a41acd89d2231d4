pub mod audit;
pub mod client;
pub mod output_parse;
pub mod prompt;
pub mod schema;
pub mod types;

pub use audit::{audit_sequence, SequenceAudit};
pub use client::{GeminiClient, Sequencer};
pub use output_parse::{extract_candidate_text, parse_sequence_result};
pub use prompt::build_sequencing_prompt;
pub use schema::sequence_result_schema;
pub use types::{
    GenerateContentRequest, GenerationConfig, RequestContent, SequenceResult, SequencedTrack,
    SequencingError, TextPart, ThinkingConfig,
};
