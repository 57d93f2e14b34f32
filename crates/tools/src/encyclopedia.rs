//! Encyclopedia tool: Wikipedia lookups through the MediaWiki action API.
//!
//! One request searches and fetches plain-text introductions for the top
//! hits, formatted as `Page:` / `Summary:` pairs.

use async_trait::async_trait;
use reportsmith_config::ToolsConfig;
use reportsmith_core::error::ToolError;
use reportsmith_core::tool::{Tool, ToolResult};
use crate::http::{build_client, get_json, require_str};

pub const ENCYCLOPEDIA: &str = "encyclopedia";

/// English Wikipedia action API endpoint.
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Pages fetched per lookup.
const TOP_K: usize = 3;

/// Summaries are cut at this many characters.
const MAX_SUMMARY_CHARS: usize = 4000;

pub struct EncyclopediaTool {
    client: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
    top_k: usize,
}

impl EncyclopediaTool {
    pub fn new(config: &ToolsConfig) -> Result<Self, ToolError> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: WIKIPEDIA_API_URL.into(),
            timeout_secs: config.timeout_secs,
            top_k: TOP_K.min(config.max_results.max(1)),
        })
    }

    /// Point the tool at a different endpoint (used by tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Tool for EncyclopediaTool {
    fn name(&self) -> &str {
        ENCYCLOPEDIA
    }

    fn description(&self) -> &str {
        "Look up a subject on Wikipedia. Returns the introductions of the best matching articles. \
         Use for definitions, history and well-established background facts."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Subject to look up, e.g. 'Transformer (machine learning)'"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = require_str(&arguments, "query")?;
        let limit = self.top_k.to_string();

        tracing::debug!(query, "Running encyclopedia lookup");

        let body = get_json(
            &self.client,
            ENCYCLOPEDIA,
            self.timeout_secs,
            &self.endpoint,
            &[
                ("action", "query"),
                ("format", "json"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", limit.as_str()),
                ("prop", "extracts|info"),
                ("inprop", "url"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exlimit", "max"),
                ("redirects", "1"),
            ],
        )
        .await?;

        let pages = parse_pages(&body);
        let found = !pages.is_empty();

        let output = if found {
            format_pages(&pages)
        } else {
            format!("No good Wikipedia search result was found for '{query}'.")
        };

        Ok(ToolResult {
            call_id: String::new(),
            success: found,
            output,
            data: Some(serde_json::json!({
                "titles": pages.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            })),
        })
    }
}

/// One article hit.
#[derive(Debug, Clone, PartialEq)]
pub struct EncyclopediaPage {
    pub title: String,
    pub summary: String,
    pub url: Option<String>,
    rank: u64,
}

/// Extract pages from a MediaWiki `query.pages` map, ordered by search rank.
pub fn parse_pages(data: &serde_json::Value) -> Vec<EncyclopediaPage> {
    let Some(pages) = data["query"]["pages"].as_object() else {
        return Vec::new();
    };

    let mut parsed: Vec<EncyclopediaPage> = pages
        .values()
        .filter_map(|page| {
            let title = page["title"].as_str()?.to_string();
            let summary = page["extract"].as_str().map(str::trim).unwrap_or("");
            if summary.is_empty() {
                return None;
            }
            Some(EncyclopediaPage {
                title,
                summary: truncate_chars(summary, MAX_SUMMARY_CHARS),
                url: page["fullurl"].as_str().map(String::from),
                rank: page["index"].as_u64().unwrap_or(u64::MAX),
            })
        })
        .collect();

    parsed.sort_by_key(|p| p.rank);
    parsed
}

fn format_pages(pages: &[EncyclopediaPage]) -> String {
    pages
        .iter()
        .map(|p| match &p.url {
            Some(url) => format!("Page: {}\nURL: {url}\nSummary: {}", p.title, p.summary),
            None => format!("Page: {}\nSummary: {}", p.title, p.summary),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
