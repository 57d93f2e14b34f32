//! `reportsmith doctor`: Check configuration and credentials.

use std::time::Duration;
use reportsmith_config::AppConfig;
use reportsmith_core::provider::Provider;

/// Short timeout for the connectivity check; a report request uses the full one.
const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("ReportSmith Doctor");
    println!("==================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  [ok]   Config file: {}", config_path.display());
    } else {
        println!("  [info] No config file at {}, using defaults", config_path.display());
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  [ok]   Configuration valid");
            config
        }
        Err(e) => {
            println!("  [fail] {e}");
            println!("\n  1 issue found.");
            return Err(e.into());
        }
    };

    println!("  [ok]   Provider: {}", config.provider);
    println!("  [ok]   Model: {} (temperature {})", config.model, config.temperature);

    let provider_name = config.provider.trim().to_lowercase();
    let endpoint = config
        .api_url
        .as_deref()
        .or_else(|| reportsmith_providers::factory::default_base_url(&provider_name));
    match endpoint {
        Some(url) => println!("  [ok]   Endpoint: {url}"),
        None => {
            println!("  [fail] Unknown provider '{}' and no api_url set", config.provider);
            issues += 1;
        }
    }

    if !reportsmith_providers::requires_api_key(&config.provider) {
        println!("  [ok]   API key not required for local provider");
    } else if let Err(e) = config.require_api_key() {
        println!("  [fail] {e}");
        issues += 1;
    } else {
        println!("  [ok]   API key configured");
    }

    if issues == 0 {
        match reportsmith_providers::build_with_timeout(&config, CHECK_TIMEOUT) {
            Ok(provider) => {
                for (ok, line) in check_endpoint(provider.as_ref(), &config.model).await {
                    if ok {
                        println!("  [ok]   {line}");
                    } else {
                        println!("  [fail] {line}");
                        issues += 1;
                    }
                }
            }
            Err(e) => {
                println!("  [fail] {e}");
                issues += 1;
            }
        }
    }

    if config.agent.enable_tools {
        println!(
            "  [ok]   Research tools enabled (timeout {}s, max {} results)",
            config.tools.timeout_secs, config.tools.max_results
        );
    } else {
        println!("  [info] Research tools disabled; reports use model knowledge only");
    }

    println!();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

/// Ask the provider whether it answers and whether it serves `model`.
///
/// An empty model list is not a failure: some gateways do not publish one.
async fn check_endpoint(provider: &dyn Provider, model: &str) -> Vec<(bool, String)> {
    match provider.health_check().await {
        Ok(true) => {}
        Ok(false) => return vec![(false, "Endpoint rejected the request (check the API key)".into())],
        Err(e) => return vec![(false, format!("Endpoint unreachable: {e}"))],
    }

    let mut lines = vec![(true, "Endpoint reachable".to_string())];
    match provider.list_models().await {
        Ok(models) if models.iter().any(|m| m == model) => {
            lines.push((true, format!("Model '{model}' is offered")));
        }
        Ok(models) if models.is_empty() => {}
        Ok(_) => lines.push((false, format!("Model '{model}' is not offered by this provider"))),
        Err(e) => lines.push((false, format!("Could not list models: {e}"))),
    }
    lines
}
