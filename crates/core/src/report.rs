//! Report request and report text value objects.

use serde::{Deserialize, Serialize};
use crate::depth::DepthLevel;
use crate::error::ValidationError;

/// One user submission: what to research and how deep to go.
///
/// The topic is always trimmed and non-empty; the only way to build a
/// request is [`ReportRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    topic: String,
    depth: DepthLevel,
}

impl ReportRequest {
    pub fn new(topic: &str, depth: DepthLevel) -> Result<Self, ValidationError> {
        let topic = validate_topic(topic)?;
        Ok(Self {
            topic: topic.to_string(),
            depth,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn depth(&self) -> DepthLevel {
        self.depth
    }
}

/// Trim a topic. Only a topic that is empty after trimming is refused.
pub fn validate_topic(topic: &str) -> Result<&str, ValidationError> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTopic);
    }
    Ok(trimmed)
}

/// Plain text returned by the agent. Untrusted: no structure is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportText(String);

impl ReportText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when there is nothing printable in the report.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ReportText {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ReportText {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ReportText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
