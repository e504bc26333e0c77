//! Configuration and per-provider defaults for OpenAI-compatible providers.
//!
//! OpenAI and SambaNova both speak the chat completions protocol; each gets a
//! factory returning an [`OpenAiCompatConfig`] with the right base URL.

use secrecy::SecretString;

use cardsmith_types::config::{DEFAULT_OPENAI_BASE_URL, DEFAULT_SAMBANOVA_BASE_URL};

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Provider name used in logs and spans (e.g., "openai", "sambanova").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    pub model: String,
    /// Sent as the `OpenAI-Organization` header when set.
    pub organization: Option<String>,
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(
    api_key: SecretString,
    model: &str,
    organization: Option<String>,
) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: DEFAULT_OPENAI_BASE_URL.into(),
        api_key,
        model: model.into(),
        organization: organization.filter(|org| !org.trim().is_empty()),
    }
}

/// SambaNova configuration.
///
/// Base URL defaults to `https://api.sambanova.ai/v1`; an empty override
/// falls back to it. Trailing slashes are dropped.
pub fn sambanova_defaults(api_key: SecretString, model: &str, base_url: &str) -> OpenAiCompatConfig {
    let base_url = base_url.trim().trim_end_matches('/');
    let base_url = if base_url.is_empty() {
        DEFAULT_SAMBANOVA_BASE_URL
    } else {
        base_url
    };
    OpenAiCompatConfig {
        provider_name: "sambanova".into(),
        base_url: base_url.into(),
        api_key,
        model: model.into(),
        organization: None,
    }
}
