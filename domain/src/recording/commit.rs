//! Turn commit construction and application.

use crate::core::ids::{MeetingId, QuestionId, StatementId};
use crate::meeting::{Meeting, Participant, QuestionStatus, Statement, UserQuestion};
use crate::prompt::GenerationOutput;
use crate::scheduling::TurnDecision;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a store refused a commit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitRejection {
    /// Another turn was committed after this one was scheduled
    #[error("meeting {meeting_id} changed concurrently (expected {expected} statements, found {actual})")]
    Stale {
        meeting_id: MeetingId,
        expected: u32,
        actual: u32,
    },

    #[error("meeting {0} is no longer active")]
    Inactive(MeetingId),

    #[error("speaker {0} is not a participant of the meeting")]
    UnknownSpeaker(String),
}

/// Everything one turn writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCommit {
    pub statement: Statement,
    /// `Meeting::total_statements` observed when the turn was scheduled
    pub expected_total_statements: u32,
    /// Question answered by this turn, if it was preempted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answered_question: Option<QuestionId>,
}

impl TurnCommit {
    pub fn meeting_id(&self) -> &MeetingId {
        &self.statement.meeting_id
    }

    /// Check the commit against the meeting as it is now.
    pub fn validate(&self, meeting: &Meeting) -> Result<(), CommitRejection> {
        if !meeting.status.is_active() {
            return Err(CommitRejection::Inactive(meeting.id.clone()));
        }
        if meeting.total_statements != self.expected_total_statements {
            return Err(CommitRejection::Stale {
                meeting_id: meeting.id.clone(),
                expected: self.expected_total_statements,
                actual: meeting.total_statements,
            });
        }
        Ok(())
    }

    /// Apply the aggregate updates. The caller appends `self.statement`.
    ///
    /// `current_round` never moves backwards.
    pub fn apply(
        &self,
        meeting: &mut Meeting,
        speaker: &mut Participant,
        question: Option<&mut UserQuestion>,
    ) {
        meeting.total_statements += 1;
        meeting.current_round = meeting.current_round.max(self.statement.round_number);

        speaker.statements_count += 1;
        speaker.last_statement_at = Some(self.statement.created_at);

        if let Some(question) = question {
            question.status = QuestionStatus::Answered;
            question.answered_at = Some(self.statement.created_at);
        }
    }
}

/// Builds turn commits from scheduling decisions and generated text
pub struct StatementRecorder;

impl StatementRecorder {
    pub fn prepare(
        meeting: &Meeting,
        decision: &TurnDecision,
        output: &GenerationOutput,
        answered_question: Option<QuestionId>,
        now: DateTime<Utc>,
    ) -> TurnCommit {
        TurnCommit {
            statement: Statement {
                id: StatementId::generate(),
                meeting_id: meeting.id.clone(),
                director_id: decision.director_id.clone(),
                round_number: decision.round,
                sequence_in_round: decision.sequence_in_round,
                response_to: decision
                    .responding_to
                    .clone()
                    .filter(|_| decision.is_rebuttal),
                content: output.text.trim().to_string(),
                tokens_used: output.usage.output_tokens,
                model: Some(output.model.clone()),
                created_at: now,
            },
            expected_total_statements: meeting.total_statements,
            answered_question,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::DirectorId;
    use crate::meeting::{DiscussionMode, MeetingStatus};
    use crate::prompt::TokenUsage;

    fn started_meeting() -> Meeting {
        let mut m = Meeting::new("Board", "Topic", DiscussionMode::Debate, 5, Utc::now()).unwrap();
        m.start(Utc::now()).unwrap();
        m
    }

    fn decision(round: u32, seq: u32, rebut: Option<&str>) -> TurnDecision {
        TurnDecision {
            speaker_index: 1,
            director_id: DirectorId::from("ben"),
            round,
            sequence_in_round: seq,
            is_rebuttal: rebut.is_some(),
            responding_to: rebut.map(StatementId::from),
        }
    }

    fn output() -> GenerationOutput {
        GenerationOutput::new(
            "  I disagree.  ",
            "claude-sonnet-4-20250514",
            TokenUsage {
                input_tokens: 120,
                output_tokens: 42,
            },
        )
    }

    #[test]
    fn test_prepare_copies_decision() {
        let meeting = started_meeting();
        let commit = StatementRecorder::prepare(
            &meeting,
            &decision(1, 2, Some("s1")),
            &output(),
            None,
            Utc::now(),
        );
        let s = &commit.statement;
        assert_eq!(s.round_number, 1);
        assert_eq!(s.sequence_in_round, 2);
        assert_eq!(s.response_to, Some(StatementId::from("s1")));
        assert_eq!(s.content, "I disagree.");
        assert_eq!(s.tokens_used, 42);
        assert_eq!(s.model.as_deref(), Some("claude-sonnet-4-20250514"));
        assert_eq!(commit.expected_total_statements, 0);
    }

    #[test]
    fn test_apply_updates_all_aggregates() {
        let mut meeting = started_meeting();
        let mut speaker = Participant::new(meeting.id.clone(), "ben".into(), 2, Utc::now());
        let mut question =
            UserQuestion::new(meeting.id.clone(), "Why?", None, Utc::now()).unwrap();
        let commit = StatementRecorder::prepare(
            &meeting,
            &decision(2, 1, None),
            &output(),
            Some(question.id.clone()),
            Utc::now(),
        );

        commit.validate(&meeting).unwrap();
        commit.apply(&mut meeting, &mut speaker, Some(&mut question));

        assert_eq!(meeting.total_statements, 1);
        assert_eq!(meeting.current_round, 2);
        assert_eq!(speaker.statements_count, 1);
        assert_eq!(speaker.last_statement_at, Some(commit.statement.created_at));
        assert_eq!(question.status, QuestionStatus::Answered);
    }

    #[test]
    fn test_current_round_never_decreases() {
        let mut meeting = started_meeting();
        meeting.current_round = 3;
        let mut speaker = Participant::new(meeting.id.clone(), "ben".into(), 2, Utc::now());
        let commit =
            StatementRecorder::prepare(&meeting, &decision(2, 4, None), &output(), None, Utc::now());
        commit.apply(&mut meeting, &mut speaker, None);
        assert_eq!(meeting.current_round, 3);
    }

    #[test]
    fn test_stale_commit_rejected() {
        let mut meeting = started_meeting();
        let commit =
            StatementRecorder::prepare(&meeting, &decision(1, 1, None), &output(), None, Utc::now());
        meeting.total_statements = 1;
        assert!(matches!(
            commit.validate(&meeting),
            Err(CommitRejection::Stale {
                expected: 0,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_inactive_meeting_rejected() {
        let mut meeting = started_meeting();
        let commit =
            StatementRecorder::prepare(&meeting, &decision(1, 1, None), &output(), None, Utc::now());
        meeting.status = MeetingStatus::Completed;
        assert_eq!(
            commit.validate(&meeting),
            Err(CommitRejection::Inactive(meeting.id.clone()))
        );
    }
}
