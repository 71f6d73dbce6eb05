//! Summary parsing.
//!
//! The model is asked for a JSON object but may wrap it in a code fence,
//! omit fields or return prose. Missing fields default; anything that is not
//! a JSON object yields [`MeetingSummary::fallback`].

use crate::core::string::strip_code_fence;
use serde::{Deserialize, Serialize};

/// One director's standout contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantHighlight {
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub key_contribution: String,
}

/// Self-assessed quality scores (1-10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRating {
    pub depth: u8,
    pub controversy: u8,
    pub insight: u8,
}

impl Default for SummaryRating {
    fn default() -> Self {
        Self {
            depth: 7,
            controversy: 5,
            insight: 7,
        }
    }
}

/// Structured meeting summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingSummary {
    pub executive_summary: String,
    pub key_points: Vec<String>,
    pub agreements: Vec<String>,
    pub disagreements: Vec<String>,
    pub insights: Vec<String>,
    pub participant_highlights: Vec<ParticipantHighlight>,
    pub next_steps: Vec<String>,
    pub rating: SummaryRating,
}

impl MeetingSummary {
    /// Safe default when the generated summary cannot be parsed
    pub fn fallback(topic: &str) -> Self {
        Self {
            executive_summary: format!(
                "The meeting discussed {topic}; the directors shared in-depth views."
            ),
            key_points: vec![format!("Topic: {topic}")],
            ..Self::default()
        }
    }
}

/// Result of [`parse_summary`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryParse {
    Parsed(MeetingSummary),
    /// Output was malformed; carries the fallback and the parse error
    Fallback { summary: MeetingSummary, error: String },
}

impl SummaryParse {
    pub fn is_fallback(&self) -> bool {
        matches!(self, SummaryParse::Fallback { .. })
    }

    pub fn into_summary(self) -> MeetingSummary {
        match self {
            SummaryParse::Parsed(summary) | SummaryParse::Fallback { summary, .. } => summary,
        }
    }
}

/// Parse generated summary text, falling back to a default for `topic`.
pub fn parse_summary(text: &str, topic: &str) -> SummaryParse {
    let body = strip_code_fence(text);
    match serde_json::from_str::<MeetingSummary>(body) {
        Ok(mut summary) => {
            summary.rating.depth = summary.rating.depth.clamp(1, 10);
            summary.rating.controversy = summary.rating.controversy.clamp(1, 10);
            summary.rating.insight = summary.rating.insight.clamp(1, 10);
            SummaryParse::Parsed(summary)
        }
        Err(e) => SummaryParse::Fallback {
            summary: MeetingSummary::fallback(topic),
            error: e.to_string(),
        },
    }
}
