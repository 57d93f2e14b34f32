//! End-to-end tests for the ReportSmith pipeline.
//!
//! These run the real prompt builder, research agent, agent loop and PDF
//! renderer against a scripted provider and in-process tools, so no test
//! touches the network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reportsmith_agent::ResearchAgent;
use reportsmith_core::depth::DepthLevel;
use reportsmith_core::error::{ProviderError, ToolError, ValidationError};
use reportsmith_core::message::{Message, MessageToolCall, Role};
use reportsmith_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use reportsmith_core::tool::{Tool, ToolRegistry, ToolResult};
use reportsmith_pipeline::{PipelineError, ReportPipeline};
use reportsmith_render::PLACEHOLDER_TEXT;

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted responses in sequence and records
/// every request it receives.
struct ScriptedProvider {
    responses: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<Result<ProviderResponse, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().rev().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn text(answer: &str) -> Arc<Self> {
        Self::new(vec![Ok(text_response(answer))])
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request(&self, index: usize) -> ProviderRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| panic!("ScriptedProvider exhausted after {} calls", self.calls()))
    }
}

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock".into(),
    }
}

fn tool_response(tool_calls: Vec<MessageToolCall>) -> ProviderResponse {
    let mut msg = Message::assistant("");
    msg.tool_calls = tool_calls;
    ProviderResponse {
        message: msg,
        usage: None,
        model: "mock".into(),
    }
}

fn make_tool_call(name: &str, args: serde_json::Value) -> MessageToolCall {
    MessageToolCall {
        id: format!("call_{name}"),
        name: name.to_string(),
        arguments: serde_json::to_string(&args).unwrap(),
    }
}

// ── Mock Tools ───────────────────────────────────────────────────────────

/// Stands in for a research tool with a fixed answer.
struct FixedTool {
    name: &'static str,
    answer: &'static str,
}

#[async_trait]
impl Tool for FixedTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Returns a canned research snippet"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": { "query": { "type": "string" } },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"].as_str().unwrap_or_default();
        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: format!("{} (query: {query})", self.answer),
            data: None,
        })
    }
}

/// A tool whose upstream is down.
struct UnreachableTool;

#[async_trait]
impl Tool for UnreachableTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object"})
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        Err(ToolError::ExecutionFailed {
            tool_name: "web_search".into(),
            reason: "HTTP 503 from search backend".into(),
        })
    }
}

fn research_tools() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(FixedTool {
        name: "web_search",
        answer: "Qubits can be 0 and 1 at once",
    }));
    registry.register(Box::new(FixedTool {
        name: "encyclopedia",
        answer: "Page: Quantum computing",
    }));
    Arc::new(registry)
}

fn pipeline(provider: Arc<ScriptedProvider>, tools: Option<Arc<ToolRegistry>>) -> ReportPipeline<ResearchAgent> {
    let mut agent = ResearchAgent::new(provider, "mock-model");
    if let Some(tools) = tools {
        agent = agent.with_tools(tools);
    }
    ReportPipeline::new(agent)
}

fn pdf_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

// ── E2E: Pipeline scenarios ──────────────────────────────────────────────

#[tokio::test]
async fn e2e_quantum_computing_beginner() {
    let provider = ScriptedProvider::text("Quantum computers use qubits.");
    let generated = pipeline(provider.clone(), None)
        .run("Quantum Computing", DepthLevel::Beginner)
        .await
        .unwrap();

    // The agent saw one instruction carrying the topic and the Beginner fragment
    assert_eq!(provider.calls(), 1);
    let request = provider.request(0);
    assert_eq!(request.model, "mock-model");
    let user = request
        .messages
        .iter()
        .find(|m| m.role == Role::User)
        .unwrap();
    assert!(user.content.contains("Quantum Computing"));
    assert!(user.content.contains(DepthLevel::Beginner.fragment()));
    assert!(!user.content.contains(DepthLevel::Advanced.fragment()));
    assert_eq!(user.content, generated.instruction.as_str());

    assert_eq!(generated.text.as_str(), "Quantum computers use qubits.");
    assert_eq!(generated.document.pages, 1);
    assert_eq!(generated.document.title, "Quantum Computing");
    assert_eq!(generated.document.filename, "report_Quantum_Computing.pdf");

    let pdf = pdf_text(&generated.document.bytes);
    assert!(pdf.starts_with("%PDF-1.4"));
    assert!(pdf.contains("(Quantum Computing) Tj"));
    assert!(pdf.contains("(Quantum computers use qubits.) Tj"));
}

#[tokio::test]
async fn e2e_empty_topic_never_reaches_agent() {
    let provider = ScriptedProvider::new(vec![]);
    let err = pipeline(provider.clone(), None)
        .run("", DepthLevel::Advanced)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Validation(ValidationError::EmptyTopic)));
    assert_eq!(err.kind(), "validation");
    assert_eq!(err.user_message(), "Please enter a topic first.");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn e2e_provider_failure_produces_no_document() {
    let provider = ScriptedProvider::new(vec![Err(ProviderError::AuthenticationFailed(
        "invalid api key".into(),
    ))]);
    let err = pipeline(provider.clone(), Some(research_tools()))
        .run("Vision Transformers", DepthLevel::Intermediate)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "provider");
    assert!(err.user_message().starts_with("The language model provider failed"));
    assert!(err.user_message().contains("invalid api key"));
    assert_eq!(provider.calls(), 1, "no retries");
}

// ── E2E: Research tool loop ──────────────────────────────────────────────

#[tokio::test]
async fn e2e_tools_feed_the_final_report() {
    let provider = ScriptedProvider::new(vec![
        Ok(tool_response(vec![
            make_tool_call("web_search", serde_json::json!({"query": "quantum computing basics"})),
            make_tool_call("encyclopedia", serde_json::json!({"query": "Quantum computing"})),
        ])),
        Ok(text_response(
            "# Quantum Computing\n\n## Introduction\nQubits can be 0 and 1 at once.\n\n## References\n- Wikipedia: Quantum computing",
        )),
    ]);

    let generated = pipeline(provider.clone(), Some(research_tools()))
        .run("Quantum Computing", DepthLevel::Beginner)
        .await
        .unwrap();

    assert_eq!(provider.calls(), 2);

    // First request advertised both tools, sorted by name
    let first = provider.request(0);
    let names: Vec<&str> = first.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["encyclopedia", "web_search"]);

    // Second request carried both tool results back to the model
    let second = provider.request(1);
    let results: Vec<&Message> = second.messages.iter().filter(|m| m.role == Role::Tool).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].content.contains("quantum computing basics"));
    assert_eq!(results[1].tool_call_id.as_deref(), Some("call_encyclopedia"));

    assert!(generated.text.as_str().contains("## References"));
    let pdf = pdf_text(&generated.document.bytes);
    assert!(pdf.contains("(Introduction) Tj"));
    assert!(!pdf.contains("## Introduction"));
}

#[tokio::test]
async fn e2e_unknown_tool_is_reported_to_model() {
    let provider = ScriptedProvider::new(vec![
        Ok(tool_response(vec![make_tool_call(
            "calculator",
            serde_json::json!({"expression": "2+2"}),
        )])),
        Ok(text_response("Report without calculations.")),
    ]);

    let generated = pipeline(provider.clone(), Some(research_tools()))
        .run("Arithmetic", DepthLevel::Beginner)
        .await
        .unwrap();

    assert_eq!(generated.text.as_str(), "Report without calculations.");
    let feedback = provider
        .request(1)
        .messages
        .into_iter()
        .find(|m| m.role == Role::Tool)
        .unwrap();
    assert!(feedback.content.starts_with("Error:"));
    assert!(feedback.content.contains("calculator"));
}

#[tokio::test]
async fn e2e_tool_upstream_failure_aborts_run() {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(UnreachableTool));

    let provider = ScriptedProvider::new(vec![Ok(tool_response(vec![make_tool_call(
        "web_search",
        serde_json::json!({"query": "graph neural networks"}),
    )]))]);

    let err = pipeline(provider.clone(), Some(Arc::new(registry)))
        .run("Graph Neural Networks", DepthLevel::Advanced)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "tool");
    assert!(err.user_message().starts_with("A research tool failed"));
    assert_eq!(provider.calls(), 1);
}

// ── E2E: Renderer degradation ────────────────────────────────────────────

#[tokio::test]
async fn e2e_blank_answer_renders_placeholder() {
    let provider = ScriptedProvider::text("   ");
    let generated = pipeline(provider, None)
        .run("Empty Answers", DepthLevel::Intermediate)
        .await
        .unwrap();

    assert_eq!(generated.document.pages, 1);
    assert!(pdf_text(&generated.document.bytes).contains(&format!("({PLACEHOLDER_TEXT}) Tj")));
}

#[tokio::test]
async fn e2e_unicode_report_is_sanitised() {
    let provider = ScriptedProvider::text("Schrödinger’s cat — “alive” and dead. 量子 ✓");
    let generated = pipeline(provider, None)
        .run("Superposition", DepthLevel::Beginner)
        .await
        .unwrap();

    // Text is kept on screen as the model wrote it
    assert!(generated.text.as_str().contains("量子"));

    let pdf = pdf_text(&generated.document.bytes);
    assert!(pdf.contains("Schr\u{f6}dinger's cat -- \"alive\" and dead."));
    assert!(!pdf.contains('量'));
}

#[tokio::test]
async fn e2e_same_answer_same_bytes() {
    let a = pipeline(ScriptedProvider::text("Same text."), None)
        .run("Determinism", DepthLevel::Advanced)
        .await
        .unwrap();
    let b = pipeline(ScriptedProvider::text("Same text."), None)
        .run("Determinism", DepthLevel::Advanced)
        .await
        .unwrap();
    assert_eq!(a.document.bytes, b.document.bytes);
}
