//! Agent invoker: the pipeline's only view of the research agent.

use async_trait::async_trait;
use thiserror::Error;
use crate::error::{ProviderError, ToolError};
use crate::prompt::Instruction;
use crate::report::ReportText;

/// Why an agent invocation produced no report.
#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Tool(#[from] ToolError),
}

/// Turns an instruction into report text.
///
/// Called at most once per instruction. Implementations must not retry.
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn generate_report(&self, instruction: &Instruction) -> Result<ReportText, InvokeError>;
}

#[async_trait]
impl<T: AgentInvoker + ?Sized> AgentInvoker for std::sync::Arc<T> {
    async fn generate_report(&self, instruction: &Instruction) -> Result<ReportText, InvokeError> {
        (**self).generate_report(instruction).await
    }
}
