pub mod doctor;
pub mod generate;
pub mod serve;

use reportsmith_config::AppConfig;

/// Load configuration and make sure the provider can be reached with it.
///
/// Fails before any server starts or request is made when a hosted provider
/// has no key.
pub fn load_checked_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if reportsmith_providers::requires_api_key(&config.provider) {
        config.require_api_key()?;
    }
    Ok(config)
}
