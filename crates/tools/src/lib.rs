//! Research tools for ReportSmith.
//!
//! The agent gathers material with two tools and decides itself which one
//! to call:
//!
//! - `web_search`: DuckDuckGo Instant Answer API
//! - `encyclopedia`: Wikipedia article introductions

pub mod encyclopedia;
mod http;
pub mod web_search;

use reportsmith_config::ToolsConfig;
use reportsmith_core::error::ToolError;
use reportsmith_core::tool::ToolRegistry;

pub use encyclopedia::EncyclopediaTool;
pub use web_search::WebSearchTool;

/// Create the registry handed to the research agent.
pub fn research_registry(config: &ToolsConfig) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(WebSearchTool::new(config)?));
    registry.register(Box::new(EncyclopediaTool::new(config)?));
    Ok(registry)
}
