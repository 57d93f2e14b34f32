//! Shared HTTP plumbing for the research tools.

use std::time::Duration;
use reportsmith_config::ToolsConfig;
use reportsmith_core::error::ToolError;

/// Build the client every research tool shares.
pub fn build_client(config: &ToolsConfig) -> Result<reqwest::Client, ToolError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| ToolError::ExecutionFailed {
            tool_name: "http".into(),
            reason: format!("failed to create HTTP client: {e}"),
        })
}

/// Issue a GET with query parameters and decode the JSON body.
///
/// Transport failures and non-2xx statuses become [`ToolError`]s so the
/// agent aborts instead of writing a report from nothing.
pub async fn get_json(
    client: &reqwest::Client,
    tool_name: &str,
    timeout_secs: u64,
    url: &str,
    query: &[(&str, &str)],
) -> Result<serde_json::Value, ToolError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| send_error(tool_name, timeout_secs, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ToolError::ExecutionFailed {
            tool_name: tool_name.into(),
            reason: format!("upstream returned {status}"),
        });
    }

    response
        .json()
        .await
        .map_err(|e| ToolError::ExecutionFailed {
            tool_name: tool_name.into(),
            reason: format!("failed to parse response: {e}"),
        })
}

fn send_error(tool_name: &str, timeout_secs: u64, e: reqwest::Error) -> ToolError {
    if e.is_timeout() {
        ToolError::Timeout {
            tool_name: tool_name.into(),
            timeout_secs,
        }
    } else {
        ToolError::ExecutionFailed {
            tool_name: tool_name.into(),
            reason: format!("request failed: {e}"),
        }
    }
}

/// Pull a required, non-blank string argument.
pub fn require_str<'a>(arguments: &'a serde_json::Value, key: &str) -> Result<&'a str, ToolError> {
    arguments[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' argument")))
}
