//! The research agent behind ReportSmith.
//!
//! The agent follows a **Plan → Act → Observe** cycle:
//!
//! 1. **Receive** the report instruction
//! 2. **Send to LLM** with the research tool definitions
//! 3. **If tool calls**: execute tools, append results, loop back to step 2
//! 4. **If text response**: that text is the report
//!
//! The loop continues until the LLM responds with text only (no tool calls)
//! or the max iteration limit is reached.

pub mod loop_runner;
pub mod research;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use loop_runner::AgentLoop;
pub use research::ResearchAgent;
