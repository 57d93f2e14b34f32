//! Provider factory: builds the configured LLM backend.
//!
//! Every supported provider speaks the OpenAI chat-completions dialect, so
//! the factory only has to resolve a base URL and key.

use std::sync::Arc;
use std::time::Duration;
use reportsmith_config::AppConfig;
use reportsmith_core::error::ProviderError;
use reportsmith_core::provider::Provider;
use crate::openai_compat::{DEFAULT_TIMEOUT, OpenAiCompatProvider};

/// Providers that run locally and accept requests without a key.
const KEYLESS_PROVIDERS: [&str; 4] = ["ollama", "vllm", "llamacpp", "llama.cpp"];

/// Build the provider named in `config`.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    build_with_timeout(config, DEFAULT_TIMEOUT)
}

/// Same as [`build_from_config`] with an explicit request timeout.
pub fn build_with_timeout(
    config: &AppConfig,
    timeout: Duration,
) -> Result<Arc<dyn Provider>, ProviderError> {
    let name = config.provider.trim().to_lowercase();

    let base_url = match (&config.api_url, default_base_url(&name)) {
        (Some(url), _) => url.clone(),
        (None, Some(url)) => url.to_string(),
        (None, None) => {
            return Err(ProviderError::NotConfigured(format!(
                "unknown provider '{name}'; set api_url to use a custom endpoint"
            )));
        }
    };

    let api_key = match config.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => key.to_string(),
        _ if KEYLESS_PROVIDERS.contains(&name.as_str()) => String::new(),
        _ => {
            return Err(ProviderError::NotConfigured(format!(
                "no API key configured for provider '{name}'"
            )));
        }
    };

    tracing::debug!(provider = %name, base_url = %base_url, "Building provider");

    let provider = OpenAiCompatProvider::with_timeout(name, base_url, api_key, timeout)?;
    Ok(Arc::new(provider))
}

/// Whether `provider_name` needs an API key to serve requests.
pub fn requires_api_key(provider_name: &str) -> bool {
    !KEYLESS_PROVIDERS.contains(&provider_name.trim().to_lowercase().as_str())
}

/// Get the default base URL for well-known providers.
pub fn default_base_url(provider_name: &str) -> Option<&'static str> {
    let url = match provider_name {
        "groq" => "https://api.groq.com/openai/v1",
        "openai" => "https://api.openai.com/v1",
        "openrouter" => "https://openrouter.ai/api/v1",
        "deepseek" => "https://api.deepseek.com/v1",
        "together" => "https://api.together.xyz/v1",
        "fireworks" => "https://api.fireworks.ai/inference/v1",
        "ollama" => "http://localhost:11434/v1",
        "vllm" => "http://localhost:8000/v1",
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1",
        _ => return None,
    };
    Some(url)
}
