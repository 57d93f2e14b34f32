//! Depth policy: how long and how technical a report should be.
//!
//! Each [`DepthLevel`] maps to one fixed instruction fragment that is spliced
//! into the prompt. The lookup is total: there is no fallback branch because
//! the set of levels is closed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::ValidationError;

/// Requested report depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DepthLevel {
    /// Short report, simple language.
    Beginner,
    /// Balanced depth with practical examples.
    #[default]
    Intermediate,
    /// Detailed, technical, comprehensive.
    Advanced,
}

impl DepthLevel {
    /// All levels, shallowest first.
    pub const ALL: [DepthLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// The instruction fragment controlling length and reading level.
    pub fn fragment(self) -> &'static str {
        match self {
            Self::Beginner => {
                "Explain as if to a 1st-2nd year student. \
                 Use simple language, basic examples, and avoid heavy math or jargon. \
                 Keep the report short."
            }
            Self::Intermediate => {
                "Explain for a 3rd-4th year undergraduate student. \
                 Use technical terms where needed, include some depth, and practical examples."
            }
            Self::Advanced => {
                "Explain for someone preparing for research or interviews. \
                 Include deeper technical details, trade-offs, and where relevant, math/architecture. \
                 Make the report detailed and comprehensive."
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for DepthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepthLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownDepth(s.to_string()))
    }
}
