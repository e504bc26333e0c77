//! Crew configuration types for Cardsmith.
//!
//! `CrewConfig` is the non-secret part of the runtime configuration: which
//! LLM provider to use, model, temperature, and endpoint overrides. It is
//! loaded from `~/.cardsmith/config.toml` and then overridden by environment
//! variables. API keys never live here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default SambaNova endpoint (OpenAI-compatible).
pub const DEFAULT_SAMBANOVA_BASE_URL: &str = "https://api.sambanova.ai/v1";

/// Default OpenAI endpoint.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// The generative backend provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    SambaNova,
}

impl ProviderKind {
    /// Environment variable holding the API key for this provider.
    pub fn api_key_env(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::SambaNova => "SAMBANOVA_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::SambaNova => write!(f, "sambanova"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "sambanova" => Ok(ProviderKind::SambaNova),
            other => Err(format!("Unsupported provider: {other}")),
        }
    }
}

/// Non-secret crew configuration.
///
/// All fields have defaults so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewConfig {
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Token ceiling for each crew LLM call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// OpenAI organization header.
    #[serde(default)]
    pub organization: Option<String>,

    #[serde(default = "default_sambanova_base_url")]
    pub sambanova_base_url: String,

    /// Number of background inspirations requested from image search.
    #[serde(default = "default_inspiration_count")]
    pub inspiration_count: u32,
}

fn default_provider() -> ProviderKind {
    ProviderKind::OpenAi
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    0.4
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_sambanova_base_url() -> String {
    DEFAULT_SAMBANOVA_BASE_URL.to_string()
}

fn default_inspiration_count() -> u32 {
    6
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            organization: None,
            sambanova_base_url: default_sambanova_base_url(),
            inspiration_count: default_inspiration_count(),
        }
    }
}

impl CrewConfig {
    /// Base URL of the selected provider.
    pub fn base_url(&self) -> &str {
        match self.provider {
            ProviderKind::OpenAi => DEFAULT_OPENAI_BASE_URL,
            ProviderKind::SambaNova => &self.sambanova_base_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crew_config_default_values() {
        let config = CrewConfig::default();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.model, "gpt-4o-mini");
        assert!((config.temperature - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.inspiration_count, 6);
        assert_eq!(config.base_url(), DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_crew_config_deserialize_with_defaults() {
        let config: CrewConfig = toml::from_str("").unwrap();
        assert_eq!(config, CrewConfig::default());
    }

    #[test]
    fn test_crew_config_deserialize_with_values() {
        let toml_str = r#"
provider = "sambanova"
model = "Meta-Llama-3.1-70B-Instruct"
temperature = 0.7
sambanova_base_url = "https://proxy.example/v1"
"#;
        let config: CrewConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider, ProviderKind::SambaNova);
        assert_eq!(config.model, "Meta-Llama-3.1-70B-Instruct");
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.base_url(), "https://proxy.example/v1");
    }

    #[test]
    fn test_provider_kind_roundtrip() {
        for kind in [ProviderKind::OpenAi, ProviderKind::SambaNova] {
            let parsed: ProviderKind = kind.to_string().parse().unwrap();
            assert_eq!(kind, parsed);
        }
        assert_eq!(" OpenAI ".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_provider_kind_unsupported() {
        let err = "bedrock".parse::<ProviderKind>().unwrap_err();
        assert_eq!(err, "Unsupported provider: bedrock");
    }

    #[test]
    fn test_api_key_env_names() {
        assert_eq!(ProviderKind::OpenAi.api_key_env(), "OPENAI_API_KEY");
        assert_eq!(ProviderKind::SambaNova.api_key_env(), "SAMBANOVA_API_KEY");
    }
}
