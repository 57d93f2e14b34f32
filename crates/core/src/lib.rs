//! # ReportSmith Core
//!
//! Domain types, traits, and error definitions for the ReportSmith research
//! report generator. This crate has **no framework dependencies**: it defines
//! the domain model that the provider, tool, agent, renderer and gateway
//! crates implement against.
//!
//! ## Pipeline
//!
//! ```text
//! ReportRequest ──► Instruction ──► AgentInvoker ──► ReportText ──► renderer
//!   (topic+depth)    (prompt)        (LLM + tools)    (untrusted)
//! ```
//!
//! Every subsystem that talks to the outside world is a trait here
//! ([`Provider`], [`Tool`], [`AgentInvoker`]), so the pipeline can be tested
//! with scripted mocks and no network access.

pub mod depth;
pub mod error;
pub mod invoker;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod report;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use depth::DepthLevel;
pub use error::{ProviderError, RenderError, ToolError, ValidationError};
pub use invoker::{AgentInvoker, InvokeError};
pub use message::{Conversation, ConversationId, Message, Role};
pub use prompt::{Instruction, PromptBuilder};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
pub use report::{ReportRequest, ReportText};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
