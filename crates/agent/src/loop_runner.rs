//! The agent reasoning loop implementation.

use std::sync::Arc;
use reportsmith_core::error::ToolError;
use reportsmith_core::invoker::InvokeError;
use reportsmith_core::message::{Conversation, Message, MessageToolCall, Role};
use reportsmith_core::provider::{Provider, ProviderRequest};
use reportsmith_core::tool::{ToolCall, ToolRegistry};
use tracing::{debug, info, warn};

/// System prompt for research runs. The tool list is appended at runtime.
pub const RESEARCH_SYSTEM_PROMPT: &str = "\
You are a careful research assistant that writes structured reports.
Gather facts with the tools before writing. Call a tool by requesting it with \
JSON arguments; you will receive its output in the next message. \
When you have enough material, reply with the finished report only, without \
further tool calls.";

/// The core agent loop that orchestrates LLM calls and tool execution.
pub struct AgentLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// Tool registry
    tools: Arc<ToolRegistry>,

    /// Maximum LLM round-trips per run
    max_iterations: u32,
}

impl AgentLoop {
    /// Create a new agent loop.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            max_iterations: 8,
        }
    }

    /// Set the maximum number of LLM round-trips.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the default max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// [`RESEARCH_SYSTEM_PROMPT`] followed by the tool list.
    fn full_system_prompt(&self) -> String {
        let mut prompt = RESEARCH_SYSTEM_PROMPT.to_string();
        if self.tools.is_empty() {
            return prompt;
        }
        prompt.push_str("\n\nAvailable tools:\n");
        for def in self.tools.definitions() {
            prompt.push_str(&format!("- {}: {}\n", def.name, def.description));
        }
        prompt
    }

    /// Run the conversation until the model answers without tool calls.
    ///
    /// Recoverable tool failures (unknown tool, bad arguments) are fed back
    /// to the model. Upstream tool failures and provider errors abort the run.
    /// A blank final answer falls back to the last non-empty assistant text.
    pub async fn process(&self, conversation: &mut Conversation) -> Result<String, InvokeError> {
        info!(
            conversation_id = %conversation.id,
            messages = conversation.messages.len(),
            tools = self.tools.len(),
            "Processing conversation"
        );

        let system_prompt = self.full_system_prompt();
        if conversation
            .messages
            .first()
            .is_some_and(|m| m.role == Role::System)
        {
            conversation.messages[0] = Message::system(system_prompt);
        } else {
            conversation.messages.insert(0, Message::system(system_prompt));
        }

        let tool_definitions = self.tools.definitions();

        for iteration in 1..=self.max_iterations {
            debug!(
                conversation_id = %conversation.id,
                iteration,
                "Agent loop iteration"
            );

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: conversation.messages.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            let response = self.provider.complete(request).await?;

            if let Some(usage) = &response.usage {
                debug!(
                    model = %response.model,
                    tokens = usage.total_tokens,
                    "LLM response received"
                );
            }

            if response.message.tool_calls.is_empty() {
                conversation.push(response.message);
                return Ok(Self::final_text(conversation));
            }

            debug!(
                tool_count = response.message.tool_calls.len(),
                "Executing tool calls"
            );

            let tool_calls = response.message.tool_calls.clone();
            conversation.push(response.message);

            for tc in &tool_calls {
                let output = self.run_tool(tc).await?;
                conversation.push(Message::tool_result(&tc.id, output));
            }
        }

        warn!(
            conversation_id = %conversation.id,
            max_iterations = self.max_iterations,
            tool_calls = conversation.tool_call_count(),
            "Max iterations reached without a final answer"
        );
        Ok(Self::final_text(conversation))
    }

    /// Execute one requested call and return the text shown to the model.
    async fn run_tool(&self, tc: &MessageToolCall) -> Result<String, ToolError> {
        let result = match parse_arguments(tc) {
            Ok(call) => self.tools.execute(&call).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(tool_result) => {
                debug!(tool = %tc.name, success = tool_result.success, "Tool executed");
                Ok(tool_result.output)
            }
            Err(e) if e.is_recoverable() => {
                warn!(tool = %tc.name, error = %e, "Tool call rejected, reporting to model");
                Ok(format!("Error: {e}"))
            }
            Err(e) => {
                warn!(tool = %tc.name, error = %e, "Tool execution failed");
                Err(e)
            }
        }
    }

    fn final_text(conversation: &Conversation) -> String {
        conversation
            .last_assistant_text()
            .map(str::to_string)
            .unwrap_or_default()
    }
}

/// Decode the model's JSON argument string. Empty means no arguments.
fn parse_arguments(tc: &MessageToolCall) -> Result<ToolCall, ToolError> {
    let raw = tc.arguments.trim();
    let arguments = if raw.is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(raw).map_err(|e| {
            ToolError::InvalidArguments(format!("arguments for '{}' are not valid JSON: {e}", tc.name))
        })?
    };

    Ok(ToolCall {
        id: tc.id.clone(),
        name: tc.name.clone(),
        arguments,
    })
}
