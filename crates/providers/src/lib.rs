//! LLM Provider implementations for ReportSmith.
//!
//! All providers implement the `reportsmith_core::Provider` trait.
//! The factory selects the backend based on configuration.

pub mod factory;
pub mod openai_compat;

pub use factory::{build_from_config, build_with_timeout, requires_api_key};
pub use openai_compat::OpenAiCompatProvider;
