//! Statements, user questions and question responses.
//!
//! All three are immutable once written except for a question's status,
//! which flips from `pending` to `answered` exactly once.

use crate::core::ids::{DirectorId, MeetingId, QuestionId, StatementId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One turn of the discussion
///
/// `response_to` is a plain back-reference to an earlier statement (the
/// rebuttal target). It is only ever dereferenced, never used for ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: StatementId,
    pub meeting_id: MeetingId,
    pub director_id: DirectorId,
    pub round_number: u32,
    pub sequence_in_round: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_to: Option<StatementId>,
    pub content: String,
    #[serde(default)]
    pub tokens_used: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Statement {
    /// Whether this statement was framed as a rebuttal
    pub fn is_rebuttal(&self) -> bool {
        self.response_to.is_some()
    }
}

/// Answer status of a user question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    #[default]
    Pending,
    Answered,
}

/// A question raised by someone watching the meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuestion {
    pub id: QuestionId,
    pub meeting_id: MeetingId,
    pub question: String,
    pub asker_name: String,
    #[serde(default)]
    pub status: QuestionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<DateTime<Utc>>,
}

impl UserQuestion {
    /// Asker name used when none is given
    pub const DEFAULT_ASKER: &'static str = "User";

    pub fn new(
        meeting_id: MeetingId,
        question: impl Into<String>,
        asker_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let question = question.into();
        if question.trim().is_empty() {
            return None;
        }
        let asker_name = asker_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_ASKER.to_string());

        Some(Self {
            id: QuestionId::generate(),
            meeting_id,
            question,
            asker_name,
            status: QuestionStatus::Pending,
            created_at: now,
            answered_at: None,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == QuestionStatus::Pending
    }
}

/// A director's direct answer to a user question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: String,
    pub question_id: QuestionId,
    pub director_id: DirectorId,
    pub content: String,
    /// 1-based roster position of the responder
    pub response_order: u32,
    #[serde(default)]
    pub tokens_used: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_question_rejected() {
        assert!(UserQuestion::new(MeetingId::from("m"), "   ", None, Utc::now()).is_none());
    }

    #[test]
    fn test_default_asker_name() {
        let q = UserQuestion::new(MeetingId::from("m"), "Why?", None, Utc::now()).unwrap();
        assert_eq!(q.asker_name, "User");
        assert!(q.is_pending());

        let q = UserQuestion::new(MeetingId::from("m"), "Why?", Some(" ".into()), Utc::now())
            .unwrap();
        assert_eq!(q.asker_name, "User");
    }

    #[test]
    fn test_named_asker_kept() {
        let q = UserQuestion::new(MeetingId::from("m"), "Why?", Some("Ada".into()), Utc::now())
            .unwrap();
        assert_eq!(q.asker_name, "Ada");
    }
}
