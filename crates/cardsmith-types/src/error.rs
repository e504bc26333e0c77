use thiserror::Error;

use crate::interview::InterviewPhase;
use crate::llm::LlmError;

/// Errors raised while resolving runtime configuration.
///
/// All of these are fatal and reported before the interview starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{env_var} is required when provider is set to '{provider}'")]
    MissingApiKey { provider: String, env_var: String },

    #[error("PEXELS_API_KEY is required for background inspiration search (pass --no-inspiration to skip it)")]
    MissingImageSearchKey,

    #[error("{0}")]
    UnsupportedProvider(String),

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Errors from interview operations.
#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("interview is not ready (phase: {0})")]
    NotReady(InterviewPhase),

    #[error("blueprint request was already produced for this session")]
    AlreadyEmitted,
}

/// Errors from the image search backend.
#[derive(Debug, Error)]
pub enum ImageSearchError {
    #[error("image search request failed: {0}")]
    Request(String),

    #[error("image search authentication failed")]
    AuthenticationFailed,

    #[error("image search returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("image search response could not be parsed: {0}")]
    Deserialization(String),
}

/// Errors from a blueprint generation run.
///
/// Image search failures are not listed here: they are recorded on the
/// outcome and generation continues without inspirations.
#[derive(Debug, Error)]
pub enum DesignError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("could not serialize requirements: {0}")]
    Serialization(String),
}
