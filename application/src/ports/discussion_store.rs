//! Discussion store port
//!
//! Defines the persistence contract the use cases depend on. Adapters live
//! in the infrastructure layer.

use async_trait::async_trait;
use boardroom_domain::{
    CommitRejection, Director, DirectorId, Meeting, MeetingId, Participant, QuestionId,
    QuestionResponse, ReconcileReport, RosterEntry, Statement, TurnCommit, UserQuestion,
};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Commit rejected: {0}")]
    Rejected(#[from] CommitRejection),

    #[error("Duplicate {entity}: {id}")]
    Duplicate { entity: &'static str, id: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn meeting_not_found(id: &MeetingId) -> Self {
        StoreError::NotFound {
            entity: "meeting",
            id: id.to_string(),
        }
    }

    pub fn director_not_found(id: &DirectorId) -> Self {
        StoreError::NotFound {
            entity: "director",
            id: id.to_string(),
        }
    }

    pub fn question_not_found(id: &QuestionId) -> Self {
        StoreError::NotFound {
            entity: "question",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// A concurrent turn got there first
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Rejected(CommitRejection::Stale { .. }))
    }
}

/// Persistence for meetings and their history
///
/// Ordering contracts:
/// - [`roster`](Self::roster) is sorted by `join_order` and includes inactive seats
/// - [`statements`](Self::statements) is sorted by `(round_number desc, sequence_in_round desc)`
/// - [`questions`](Self::questions) is sorted newest first
#[async_trait]
pub trait DiscussionStore: Send + Sync {
    /// Insert or replace director profiles
    async fn upsert_directors(&self, directors: &[Director]) -> Result<(), StoreError>;

    /// All known directors, sorted by id
    async fn list_directors(&self) -> Result<Vec<Director>, StoreError>;

    async fn get_director(&self, id: &DirectorId) -> Result<Director, StoreError>;

    /// Persist a new meeting together with its seats
    async fn insert_meeting(
        &self,
        meeting: &Meeting,
        participants: &[Participant],
    ) -> Result<(), StoreError>;

    async fn get_meeting(&self, id: &MeetingId) -> Result<Meeting, StoreError>;

    /// All meetings, newest first
    async fn list_meetings(&self) -> Result<Vec<Meeting>, StoreError>;

    /// Overwrite lifecycle fields (status, timestamps, summary).
    ///
    /// Implementations must not touch `total_statements` or `current_round`;
    /// those only move through [`commit_turn`](Self::commit_turn).
    async fn update_meeting(&self, meeting: &Meeting) -> Result<(), StoreError>;

    async fn roster(&self, meeting_id: &MeetingId) -> Result<Vec<RosterEntry>, StoreError>;

    async fn statements(&self, meeting_id: &MeetingId) -> Result<Vec<Statement>, StoreError>;

    async fn insert_question(&self, question: &UserQuestion) -> Result<(), StoreError>;

    async fn get_question(
        &self,
        meeting_id: &MeetingId,
        question_id: &QuestionId,
    ) -> Result<UserQuestion, StoreError>;

    async fn questions(&self, meeting_id: &MeetingId) -> Result<Vec<UserQuestion>, StoreError>;

    /// Store direct answers and mark the question answered, as one unit
    async fn record_question_responses(
        &self,
        meeting_id: &MeetingId,
        question_id: &QuestionId,
        responses: &[QuestionResponse],
        answered_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Direct answers to a question, in `response_order`
    async fn question_responses(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<QuestionResponse>, StoreError>;

    /// Apply a turn atomically: append the statement and update the meeting,
    /// the speaker and (when set) the answered question.
    ///
    /// Rejects with [`StoreError::Rejected`] when [`TurnCommit::validate`]
    /// fails against the stored meeting; nothing is written in that case.
    async fn commit_turn(&self, commit: &TurnCommit) -> Result<(), StoreError>;

    /// Recompute meeting and participant aggregates from the statements
    async fn reconcile(&self, meeting_id: &MeetingId) -> Result<ReconcileReport, StoreError>;
}
