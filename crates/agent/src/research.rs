//! `ResearchAgent`: the [`AgentInvoker`] the pipeline talks to.
//!
//! With tools enabled every instruction runs through a fresh [`AgentLoop`];
//! with tools disabled the model is asked directly.

use std::sync::Arc;
use async_trait::async_trait;
use reportsmith_config::AppConfig;
use reportsmith_core::error::ToolError;
use reportsmith_core::invoker::{AgentInvoker, InvokeError};
use reportsmith_core::message::{Conversation, Message};
use reportsmith_core::prompt::Instruction;
use reportsmith_core::provider::{Provider, ProviderRequest};
use reportsmith_core::report::ReportText;
use reportsmith_core::tool::ToolRegistry;
use tracing::debug;
use crate::loop_runner::AgentLoop;

pub struct ResearchAgent {
    provider: Arc<dyn Provider>,
    /// `None` runs without tools
    tools: Option<Arc<ToolRegistry>>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    max_iterations: u32,
}

impl ResearchAgent {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            tools: None,
            model: model.into(),
            temperature: 0.2,
            max_tokens: None,
            max_iterations: 8,
        }
    }

    /// Build the agent described by `config`, with the research tools
    /// unless `agent.enable_tools` is off.
    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Result<Self, ToolError> {
        let mut agent = Self::new(provider, config.model.clone())
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens)
            .with_max_iterations(config.agent.max_iterations);

        if config.agent.enable_tools {
            let registry = reportsmith_tools::research_registry(&config.tools)?;
            agent = agent.with_tools(Arc::new(registry));
        }

        Ok(agent)
    }

    pub fn with_tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn uses_tools(&self) -> bool {
        self.tools.is_some()
    }

    async fn run_with_tools(
        &self,
        tools: &Arc<ToolRegistry>,
        instruction: &Instruction,
    ) -> Result<String, InvokeError> {
        let mut agent_loop = AgentLoop::new(
            self.provider.clone(),
            self.model.clone(),
            self.temperature,
            tools.clone(),
        )
        .with_max_iterations(self.max_iterations);
        if let Some(max) = self.max_tokens {
            agent_loop = agent_loop.with_max_tokens(max);
        }

        let mut conversation = Conversation::new();
        conversation.push(Message::user(instruction.as_str()));
        agent_loop.process(&mut conversation).await
    }

    async fn run_direct(&self, instruction: &Instruction) -> Result<String, InvokeError> {
        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![Message::user(instruction.as_str())],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools: vec![],
        };
        let response = self.provider.complete(request).await?;
        Ok(response.message.content)
    }
}

#[async_trait]
impl AgentInvoker for ResearchAgent {
    async fn generate_report(&self, instruction: &Instruction) -> Result<ReportText, InvokeError> {
        debug!(
            provider = self.provider.name(),
            model = %self.model,
            tools = self.uses_tools(),
            "Invoking research agent"
        );

        let text = match &self.tools {
            Some(tools) => self.run_with_tools(tools, instruction).await?,
            None => self.run_direct(instruction).await?,
        };

        Ok(ReportText::from(text))
    }
}
