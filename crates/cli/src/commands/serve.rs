//! `reportsmith serve`: Start the web UI and HTTP API.

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_checked_config()?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("ReportSmith");
    println!("   Open:      http://{}:{}", config.gateway.host, config.gateway.port);
    println!("   Provider:  {} ({})", config.provider, config.model);
    println!("   Tools:     {}", if config.agent.enable_tools { "web_search, encyclopedia" } else { "disabled" });

    reportsmith_gateway::start(config).await?;

    Ok(())
}
