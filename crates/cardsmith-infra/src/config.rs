//! Runtime settings loader for Cardsmith.
//!
//! Reads `config.toml` from the data directory (`~/.cardsmith/` in
//! production) into a [`CrewConfig`], falling back to defaults when the file
//! is missing or malformed. Environment variables then override the file,
//! and API keys are read from the environment only.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use cardsmith_types::config::{CrewConfig, ProviderKind};
use cardsmith_types::error::ConfigError;

/// Resolve the data directory.
///
/// Priority:
/// 1. `CARDSMITH_DATA_DIR` environment variable
/// 2. `~/.cardsmith`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CARDSMITH_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".cardsmith");
    }

    PathBuf::from(".cardsmith")
}

/// Load crew configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`CrewConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_crew_config(data_dir: &Path) -> CrewConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return CrewConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return CrewConfig::default();
        }
    };

    match toml::from_str::<CrewConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            CrewConfig::default()
        }
    }
}

/// Apply `CARD_CREW_*`, `OPENAI_ORG` and `SAMBANOVA_BASE_URL` overrides.
///
/// `lookup` returns the value of an environment variable; blank values
/// count as unset.
pub fn apply_env_overrides(
    config: &mut CrewConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(provider) = get("CARD_CREW_PROVIDER") {
        config.provider = provider
            .parse::<ProviderKind>()
            .map_err(ConfigError::UnsupportedProvider)?;
    }
    if let Some(model) = get("CARD_CREW_MODEL") {
        config.model = model;
    }
    if let Some(raw) = get("CARD_CREW_TEMPERATURE") {
        config.temperature = raw.parse::<f64>().map_err(|_| ConfigError::InvalidValue {
            key: "CARD_CREW_TEMPERATURE".to_string(),
            value: raw.clone(),
        })?;
    }
    if let Some(org) = get("OPENAI_ORG") {
        config.organization = Some(org);
    }
    if let Some(base_url) = get("SAMBANOVA_BASE_URL") {
        config.sambanova_base_url = base_url;
    }
    Ok(())
}

/// Read an environment variable, treating non-Unicode values as unset.
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Fully resolved runtime settings: crew configuration plus API keys.
///
/// Keys are held as [`SecretString`] and never logged.
#[derive(Debug)]
pub struct Settings {
    pub crew: CrewConfig,
    pub openai_api_key: Option<SecretString>,
    pub sambanova_api_key: Option<SecretString>,
    pub pexels_api_key: Option<SecretString>,
}

impl Settings {
    /// Build settings for `crew`, reading API keys through `lookup`.
    pub fn with_keys(crew: CrewConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(SecretString::from)
        };
        Self {
            openai_api_key: secret(ProviderKind::OpenAi.api_key_env()),
            sambanova_api_key: secret(ProviderKind::SambaNova.api_key_env()),
            pexels_api_key: secret("PEXELS_API_KEY"),
            crew,
        }
    }

    /// API key for the selected LLM provider.
    pub fn llm_api_key(&self) -> Result<&SecretString, ConfigError> {
        let key = match self.crew.provider {
            ProviderKind::OpenAi => self.openai_api_key.as_ref(),
            ProviderKind::SambaNova => self.sambanova_api_key.as_ref(),
        };
        key.ok_or_else(|| ConfigError::MissingApiKey {
            provider: self.crew.provider.to_string(),
            env_var: self.crew.provider.api_key_env().to_string(),
        })
    }

    /// Check that every credential the run needs is present.
    ///
    /// The Pexels key is only required when `require_inspiration` is set.
    pub fn validate(&self, require_inspiration: bool) -> Result<(), ConfigError> {
        self.llm_api_key()?;
        if require_inspiration && self.pexels_api_key.is_none() {
            return Err(ConfigError::MissingImageSearchKey);
        }
        Ok(())
    }
}

/// Load settings: config file, then environment overrides, then API keys.
pub async fn load_settings(data_dir: &Path) -> Result<Settings, ConfigError> {
    let mut crew = load_crew_config(data_dir).await;
    apply_env_overrides(&mut crew, env_var)?;
    tracing::debug!(
        provider = %crew.provider,
        model = %crew.model,
        temperature = crew.temperature,
        "resolved crew configuration"
    );
    Ok(Settings::with_keys(crew, env_var))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_crew_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_crew_config(tmp.path()).await;
        assert_eq!(config, CrewConfig::default());
    }

    #[tokio::test]
    async fn load_crew_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
provider = "sambanova"
model = "Meta-Llama-3.1-70B-Instruct"
inspiration_count = 3
"#,
        )
        .await
        .unwrap();

        let config = load_crew_config(tmp.path()).await;
        assert_eq!(config.provider, ProviderKind::SambaNova);
        assert_eq!(config.model, "Meta-Llama-3.1-70B-Instruct");
        assert_eq!(config.inspiration_count, 3);
        assert!((config.temperature - 0.4).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn load_crew_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_crew_config(tmp.path()).await;
        assert_eq!(config, CrewConfig::default());
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = CrewConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("CARD_CREW_PROVIDER", "SambaNova"),
                ("CARD_CREW_MODEL", "Meta-Llama-3.1-8B-Instruct"),
                ("CARD_CREW_TEMPERATURE", "0.9"),
                ("OPENAI_ORG", "org-1"),
                ("SAMBANOVA_BASE_URL", "https://proxy.example/v1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.provider, ProviderKind::SambaNova);
        assert_eq!(config.model, "Meta-Llama-3.1-8B-Instruct");
        assert!((config.temperature - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.organization.as_deref(), Some("org-1"));
        assert_eq!(config.base_url(), "https://proxy.example/v1");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = CrewConfig::default();
        apply_env_overrides(&mut config, env(&[("CARD_CREW_MODEL", "  ")])).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn unsupported_provider_is_rejected() {
        let mut config = CrewConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("CARD_CREW_PROVIDER", "bedrock")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unsupported provider: bedrock");
    }

    #[test]
    fn invalid_temperature_is_rejected() {
        let mut config = CrewConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("CARD_CREW_TEMPERATURE", "warm")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "CARD_CREW_TEMPERATURE"));
    }

    #[test]
    fn validate_requires_key_for_selected_provider() {
        let settings = Settings::with_keys(CrewConfig::default(), env(&[("SAMBANOVA_API_KEY", "s")]));
        let err = settings.validate(false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "OPENAI_API_KEY is required when provider is set to 'openai'"
        );

        let crew = CrewConfig {
            provider: ProviderKind::SambaNova,
            ..CrewConfig::default()
        };
        let settings = Settings::with_keys(crew, env(&[("SAMBANOVA_API_KEY", "s")]));
        settings.validate(false).unwrap();
        assert_eq!(settings.llm_api_key().unwrap().expose_secret(), "s");
    }

    #[test]
    fn validate_requires_pexels_key_unless_disabled() {
        let settings = Settings::with_keys(CrewConfig::default(), env(&[("OPENAI_API_KEY", "sk")]));
        assert!(matches!(
            settings.validate(true),
            Err(ConfigError::MissingImageSearchKey)
        ));
        settings.validate(false).unwrap();

        let settings = Settings::with_keys(
            CrewConfig::default(),
            env(&[("OPENAI_API_KEY", "sk"), ("PEXELS_API_KEY", "px")]),
        );
        settings.validate(true).unwrap();
    }

    #[test]
    fn settings_debug_redacts_keys() {
        let settings = Settings::with_keys(CrewConfig::default(), env(&[("OPENAI_API_KEY", "sk-secret")]));
        let debug = format!("{settings:?}");
        assert!(!debug.contains("sk-secret"));
    }
}
