//! Provider selection: builds the completion client described by the configuration.

use std::sync::Arc;
use std::time::Duration;
use persona_config::AppConfig;
use persona_core::error::ProviderError;
use persona_core::provider::Provider;
use tracing::info;
use crate::openai_compat::OpenAiCompatProvider;

/// Build the provider from configuration.
///
/// OpenRouter is used when the key came from `OPENROUTER_API_KEY` (or the
/// config says so); otherwise the OpenAI endpoint. `api_url` overrides either.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config
        .require_api_key()
        .map_err(|e| ProviderError::NotConfigured(e.to_string()))?;

    let name = config.provider_name();
    let base_url = config.base_url();
    let timeout = config.request_timeout_secs.map(Duration::from_secs);

    info!(provider = name, base_url, model = %config.model, "Using completion provider");

    let provider = OpenAiCompatProvider::new(name, base_url, api_key, timeout)?;
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openrouter_key_builds_openrouter_provider() {
        let mut config = AppConfig::default();
        config
            .apply_env_with(|k| (k == "OPENROUTER_API_KEY").then(|| "sk-or".to_string()))
            .unwrap();

        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    fn openai_key_builds_openai_provider() {
        let mut config = AppConfig::default();
        config
            .apply_env_with(|k| (k == "OPENAI_API_KEY").then(|| "sk-oa".to_string()))
            .unwrap();

        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn missing_key_is_not_configured() {
        let config = AppConfig::default();
        let err = build_from_config(&config).err().unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));
    }
}
