//! Generation request/response contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response-size bound for discussion turns
pub const TURN_MAX_TOKENS: u32 = 500;
/// Response-size bound for direct answers to user questions
pub const QUESTION_MAX_TOKENS: u32 = 300;
/// Response-size bound for meeting summaries
pub const SUMMARY_MAX_TOKENS: u32 = 1500;
/// Response-size bound for persona drafts
pub const PERSONA_MAX_TOKENS: u32 = 1000;

/// How a turn prompt is framed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnFraming {
    /// Answer a pending user question
    QuestionResponse,
    /// Rebut a specific statement from the other side
    Rebuttal,
    /// Take an independent position (debate mode, no rebuttal target)
    Assertion,
    /// Continue the discussion per the mode's instructions
    Continuation,
}

impl TurnFraming {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnFraming::QuestionResponse => "question_response",
            TurnFraming::Rebuttal => "rebuttal",
            TurnFraming::Assertion => "assertion",
            TurnFraming::Continuation => "continuation",
        }
    }
}

impl fmt::Display for TurnFraming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single free-text prompt plus a response-size bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    /// Set for discussion turns; `None` for other flows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framing: Option<TurnFraming>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            framing: None,
        }
    }

    pub fn with_framing(mut self, framing: TurnFraming) -> Self {
        self.framing = Some(framing);
        self
    }
}

/// Token accounting reported by the collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Generated text plus usage metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub text: String,
    pub model: String,
    #[serde(default)]
    pub usage: TokenUsage,
}

impl GenerationOutput {
    pub fn new(text: impl Into<String>, model: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            usage,
        }
    }
}
