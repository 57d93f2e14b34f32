//! Prompt builder: turns (topic, depth) into the agent instruction.
//!
//! The instruction is assembled in a fixed order so identical inputs always
//! yield an identical string:
//!
//! 1. task preamble
//! 2. depth fragment
//! 3. report format requirements
//! 4. the topic

use serde::Serialize;
use crate::depth::DepthLevel;
use crate::error::ValidationError;
use crate::report::{ReportRequest, validate_topic};

const PREAMBLE: &str = "You are an expert research assistant.\n\nAdapt your explanation to this level:";

const TASK_AND_FORMAT: &str = "\
Your task:
1. Use the available tools (web search, encyclopedia) to gather information.
2. Then write a clear, well-structured report for the given topic.

Report format:
- Title
- Introduction (3-5 sentences)
- Main Sections with headings and bullet points
- If it's a comparison, include a comparison table (in markdown if needed)
- Conclusion (2-4 sentences)
- References (list the main sources or article titles you used)

Write in simple, professional English according to the chosen level.
Avoid hallucinating. If something is unclear or conflicting, say so.";

const TOPIC_LEAD: &str = "Now generate a detailed report for this topic:";

/// The single instruction string handed to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Instruction(String);

impl Instruction {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Build the instruction for an already validated request.
    pub fn for_request(request: &ReportRequest) -> Self {
        Self(compose(request.topic(), request.depth().fragment()))
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stateless builder for [`Instruction`]s.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Combine a raw topic with a depth fragment.
    ///
    /// Refuses blank topics with [`ValidationError::EmptyTopic`].
    pub fn build(topic: &str, depth_fragment: &str) -> Result<Instruction, ValidationError> {
        let topic = validate_topic(topic)?;
        Ok(Instruction(compose(topic, depth_fragment)))
    }

    /// Shorthand for `build(topic, depth.fragment())`.
    pub fn build_for(topic: &str, depth: DepthLevel) -> Result<Instruction, ValidationError> {
        Self::build(topic, depth.fragment())
    }
}

fn compose(topic: &str, depth_fragment: &str) -> String {
    format!("{PREAMBLE}\n{depth_fragment}\n\n{TASK_AND_FORMAT}\n\n{TOPIC_LEAD}\n\nTopic: {topic}")
}
