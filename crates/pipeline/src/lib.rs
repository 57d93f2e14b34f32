//! The report pipeline: validate → build instruction → invoke agent → render.
//!
//! Each run is independent. The agent is called at most once per request
//! and never retried; a failed call yields no document.

use std::time::Instant;
use reportsmith_core::depth::DepthLevel;
use reportsmith_core::error::ValidationError;
use reportsmith_core::invoker::{AgentInvoker, InvokeError};
use reportsmith_core::prompt::Instruction;
use reportsmith_core::report::{ReportRequest, ReportText};
use reportsmith_render::{RenderedDocument, render_report};
use thiserror::Error;
use tracing::{error, info};

/// Why a request produced no document.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("report generation failed: {0}")]
    Invoke(#[from] InvokeError),
}

impl PipelineError {
    /// Message suitable for showing inline in the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::EmptyTopic) => "Please enter a topic first.".into(),
            Self::Validation(e) => format!("Please check your input: {e}."),
            Self::Invoke(InvokeError::Provider(e)) => {
                format!("The language model provider failed: {e}")
            }
            Self::Invoke(InvokeError::Tool(e)) => format!("A research tool failed: {e}"),
        }
    }

    /// Stable machine-readable category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Invoke(InvokeError::Provider(_)) => "provider",
            Self::Invoke(InvokeError::Tool(_)) => "tool",
        }
    }
}

/// Everything one successful run produces.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub request: ReportRequest,
    pub instruction: Instruction,
    pub text: ReportText,
    pub document: RenderedDocument,
}

pub struct ReportPipeline<I> {
    invoker: I,
}

impl<I: AgentInvoker> ReportPipeline<I> {
    pub fn new(invoker: I) -> Self {
        Self { invoker }
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Run one request end to end. Validation happens before the agent is
    /// touched.
    pub async fn run(&self, topic: &str, depth: DepthLevel) -> Result<GeneratedReport, PipelineError> {
        let request = ReportRequest::new(topic, depth)?;
        let instruction = Instruction::for_request(&request);

        info!(topic = request.topic(), depth = %depth, "Generating report");
        let started = Instant::now();

        let text = self.invoker.generate_report(&instruction).await.map_err(|e| {
            error!(topic = request.topic(), error = %e, "Agent invocation failed");
            PipelineError::from(e)
        })?;

        let document = render_report(request.topic(), &text);

        info!(
            topic = request.topic(),
            pages = document.pages,
            chars = text.as_str().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Report generated"
        );

        Ok(GeneratedReport {
            request,
            instruction,
            text,
            document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reportsmith_core::error::{ProviderError, ToolError};
    use std::sync::Mutex;

    /// Returns a fixed outcome and remembers the instructions it saw.
    struct ScriptedInvoker {
        outcome: Result<ReportText, InvokeError>,
        seen: Mutex<Vec<Instruction>>,
    }

    impl ScriptedInvoker {
        fn new(outcome: Result<ReportText, InvokeError>) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AgentInvoker for ScriptedInvoker {
        async fn generate_report(&self, instruction: &Instruction) -> Result<ReportText, InvokeError> {
            self.seen.lock().unwrap().push(instruction.clone());
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn successful_run() {
        let pipeline = ReportPipeline::new(ScriptedInvoker::new(Ok("Quantum computers use qubits.".into())));
        let report = pipeline.run("Quantum Computing", DepthLevel::Beginner).await.unwrap();

        assert_eq!(report.request.topic(), "Quantum Computing");
        assert!(report.instruction.as_str().contains(DepthLevel::Beginner.fragment()));
        assert_eq!(report.document.pages, 1);
        assert_eq!(report.document.filename, "report_Quantum_Computing.pdf");
        assert_eq!(pipeline.invoker().calls(), 1);
    }

    #[tokio::test]
    async fn empty_topic_never_reaches_agent() {
        let pipeline = ReportPipeline::new(ScriptedInvoker::new(Ok("unused".into())));
        let err = pipeline.run("  ", DepthLevel::Advanced).await.unwrap_err();

        assert!(matches!(err, PipelineError::Validation(ValidationError::EmptyTopic)));
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.user_message(), "Please enter a topic first.");
        assert_eq!(pipeline.invoker().calls(), 0);
    }

    #[tokio::test]
    async fn provider_failure_yields_no_document() {
        let pipeline = ReportPipeline::new(ScriptedInvoker::new(Err(InvokeError::Provider(
            ProviderError::RateLimited { retry_after_secs: 30 },
        ))));
        let err = pipeline.run("RAG", DepthLevel::Intermediate).await.unwrap_err();

        assert_eq!(err.kind(), "provider");
        assert!(err.user_message().starts_with("The language model provider failed"));
        assert_eq!(pipeline.invoker().calls(), 1);
    }

    #[tokio::test]
    async fn tool_failure_is_reported_as_tool() {
        let pipeline = ReportPipeline::new(ScriptedInvoker::new(Err(InvokeError::Tool(
            ToolError::Timeout {
                tool_name: "web_search".into(),
                timeout_secs: 20,
            },
        ))));
        let err = pipeline.run("RAG", DepthLevel::Intermediate).await.unwrap_err();

        assert_eq!(err.kind(), "tool");
        assert!(err.user_message().contains("web_search"));
    }

    #[tokio::test]
    async fn blank_agent_output_renders_placeholder() {
        let pipeline = ReportPipeline::new(ScriptedInvoker::new(Ok(ReportText::default())));
        let report = pipeline.run("Anything", DepthLevel::Beginner).await.unwrap();
        assert_eq!(report.document.pages, 1);
        assert!(report.text.is_blank());
    }

    #[test]
    fn unknown_depth_message() {
        let err = PipelineError::from(ValidationError::UnknownDepth("Expert".into()));
        assert_eq!(err.kind(), "validation");
        assert!(err.user_message().starts_with("Please check your input:"));
        assert!(err.user_message().contains("Expert"));
    }
}
