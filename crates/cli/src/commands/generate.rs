//! `reportsmith generate`: Research one topic and write the PDF.

use std::path::PathBuf;
use reportsmith_agent::ResearchAgent;
use reportsmith_core::depth::DepthLevel;
use reportsmith_pipeline::ReportPipeline;
use tracing::info;

pub async fn run(
    topic: &str,
    depth: DepthLevel,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_checked_config()?;

    let provider = reportsmith_providers::build_from_config(&config)?;
    let agent = ResearchAgent::from_config(provider, &config)?;
    let pipeline = ReportPipeline::new(agent);

    eprintln!("  Researching \"{}\" ({depth})...", topic.trim());

    let generated = match pipeline.run(topic, depth).await {
        Ok(generated) => generated,
        Err(e) => {
            eprintln!("  [Error] {}", e.user_message());
            return Err(e.into());
        }
    };

    let path = output.unwrap_or_else(|| PathBuf::from(&generated.document.filename));
    std::fs::write(&path, &generated.document.bytes)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;

    info!(path = %path.display(), pages = generated.document.pages, "Report written");
    println!("{}", generated.text);

    Ok(())
}
