//! Error types for the ReportSmith domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each stage of the report pipeline has its own error enum. The agent seam
//! groups provider and tool failures in `InvokeError`; the pipeline adds
//! validation on top.

use thiserror::Error;

// --- Bounded context errors ---

/// A report request was rejected before any agent call was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("unknown depth level '{0}' (expected Beginner, Intermediate or Advanced)")]
    UnknownDepth(String),
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Tool timed out: {tool_name} after {timeout_secs}s")]
    Timeout { tool_name: String, timeout_secs: u64 },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Whether the model can recover from this error by issuing a
    /// different tool call. Upstream failures abort the invocation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidArguments(_))
    }
}

/// Problems found while turning report text into a document.
///
/// The renderer never returns these to the user; it records them and
/// degrades to a placeholder page instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("report text is empty")]
    EmptyReport,

    #[error("{count} character(s) outside the document encoding were replaced")]
    UnsupportedCharacters { count: usize },

    #[error("layout failed: {0}")]
    Layout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = ToolError::ExecutionFailed {
            tool_name: "web_search".into(),
            reason: "connection reset".into(),
        };
        assert!(err.to_string().contains("web_search"));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn validation_error_messages() {
        assert_eq!(ValidationError::EmptyTopic.to_string(), "topic must not be empty");
        assert!(ValidationError::UnknownDepth("Expert".into()).to_string().contains("'Expert'"));
    }

    #[test]
    fn recoverable_tool_errors() {
        assert!(ToolError::NotFound("calculator".into()).is_recoverable());
        assert!(ToolError::InvalidArguments("missing query".into()).is_recoverable());
        assert!(
            !ToolError::Timeout {
                tool_name: "encyclopedia".into(),
                timeout_secs: 20
            }
            .is_recoverable()
        );
    }
}
