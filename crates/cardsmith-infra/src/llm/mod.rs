//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `cardsmith-core`, and a factory ([`create_provider`])
//! that picks the right endpoint from a [`CrewConfig`].
//!
//! [`LlmProvider`]: cardsmith_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use cardsmith_core::llm::box_provider::BoxLlmProvider;
use cardsmith_types::config::{CrewConfig, ProviderKind};

use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] for the configured provider.
///
/// `api_key` is the already-resolved secret for `config.provider`.
pub fn create_provider(config: &CrewConfig, api_key: SecretString) -> BoxLlmProvider {
    let provider = match config.provider {
        ProviderKind::OpenAi => {
            OpenAiCompatibleProvider::openai(api_key, &config.model, config.organization.clone())
        }
        ProviderKind::SambaNova => {
            OpenAiCompatibleProvider::sambanova(api_key, &config.model, &config.sambanova_base_url)
        }
    };
    tracing::debug!(
        provider = %config.provider,
        model = %config.model,
        base_url = config.base_url(),
        "created LLM provider"
    );
    BoxLlmProvider::new(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_openai() {
        let config = CrewConfig::default();
        let provider = create_provider(&config, SecretString::from("sk-test"));
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.default_model(), "gpt-4o-mini");
    }

    #[test]
    fn test_create_provider_sambanova() {
        let config = CrewConfig {
            provider: ProviderKind::SambaNova,
            model: "Meta-Llama-3.1-70B-Instruct".into(),
            ..CrewConfig::default()
        };
        let provider = create_provider(&config, SecretString::from("samba"));
        assert_eq!(provider.name(), "sambanova");
        assert_eq!(provider.default_model(), "Meta-Llama-3.1-70B-Instruct");
    }
}
