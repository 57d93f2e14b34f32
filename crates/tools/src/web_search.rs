//! Web search tool: DuckDuckGo Instant Answer API.
//!
//! Needs no API key. Returns abstracts, direct answers, definitions and
//! related topics rather than a ranked list of pages; that is enough
//! background for the model to write from.

use async_trait::async_trait;
use reportsmith_config::ToolsConfig;
use reportsmith_core::error::ToolError;
use reportsmith_core::tool::{Tool, ToolResult};
use crate::http::{build_client, get_json, require_str};

pub const WEB_SEARCH: &str = "web_search";

/// DuckDuckGo Instant Answer API endpoint.
pub const DDG_API_URL: &str = "https://api.duckduckgo.com/";

pub struct WebSearchTool {
    client: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
    max_results: usize,
}

impl WebSearchTool {
    pub fn new(config: &ToolsConfig) -> Result<Self, ToolError> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: DDG_API_URL.into(),
            timeout_secs: config.timeout_secs,
            max_results: config.max_results,
        })
    }

    /// Point the tool at a different endpoint (used by tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        WEB_SEARCH
    }

    fn description(&self) -> &str {
        "Search the web using DuckDuckGo. Returns instant answers, abstracts, definitions and related topics with source URLs."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = require_str(&arguments, "query")?;

        tracing::debug!(query, "Running web search");

        let body = get_json(
            &self.client,
            WEB_SEARCH,
            self.timeout_secs,
            &self.endpoint,
            &[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ],
        )
        .await?;

        let (output, found) = format_search_results(query, &body, self.max_results);

        Ok(ToolResult {
            call_id: String::new(),
            success: found,
            output,
            data: None,
        })
    }
}

/// Render a DuckDuckGo response as markdown for the model.
///
/// Returns the text and whether any section was populated.
pub fn format_search_results(
    query: &str,
    data: &serde_json::Value,
    max_related: usize,
) -> (String, bool) {
    let mut sections = vec![format!("## Search Results for: {query}")];

    if let Some(abstract_text) = non_empty(&data["AbstractText"]) {
        let source = data["AbstractSource"].as_str().unwrap_or("Unknown");
        let url = data["AbstractURL"].as_str().unwrap_or("");
        sections.push(format!("### Summary ({source})\n{abstract_text}\nSource: {url}"));
    }

    if let Some(answer) = non_empty(&data["Answer"]) {
        sections.push(format!("### Instant Answer\n{answer}"));
    }

    if let Some(definition) = non_empty(&data["Definition"]) {
        let source = data["DefinitionSource"].as_str().unwrap_or("Unknown");
        sections.push(format!("### Definition ({source})\n{definition}"));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        // Grouped topics nest their entries under "Topics".
        let related: Vec<String> = topics
            .iter()
            .flat_map(|t| match t["Topics"].as_array() {
                Some(group) => group.iter().collect::<Vec<_>>(),
                None => vec![t],
            })
            .filter_map(|t| {
                let text = non_empty(&t["Text"])?;
                let url = t["FirstURL"].as_str().unwrap_or("");
                Some(format!("- {text} ({url})"))
            })
            .take(max_related)
            .collect();

        if !related.is_empty() {
            sections.push(format!("### Related Topics\n{}", related.join("\n")));
        }
    }

    if sections.len() == 1 {
        sections.push(
            "No instant answer found. Try a shorter or more specific query, or use the encyclopedia tool."
                .into(),
        );
        return (sections.join("\n\n"), false);
    }

    (sections.join("\n\n"), true)
}

fn non_empty(value: &serde_json::Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}
