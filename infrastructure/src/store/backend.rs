//! [`DiscussionStore`] implementation over a locked [`StoreState`].
//!
//! The persistence policy decides where the authoritative state lives. The
//! in-memory store works on the cached state directly. The JSON-file store
//! reloads the file before every call and applies mutations to that fresh
//! copy, so writers in other processes are seen and validated against.

use super::state::StoreState;
use async_trait::async_trait;
use boardroom_application::{DiscussionStore, StoreError};
use boardroom_domain::{
    Director, DirectorId, Meeting, MeetingId, Participant, QuestionId, QuestionResponse,
    ReconcileReport, RosterEntry, Statement, TurnCommit, UserQuestion,
};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

/// Where the state lives between calls
pub trait Persistence: Send + Sync {
    /// Bring `cached` up to date before a read
    fn refresh(&self, cached: &mut StoreState) -> Result<(), StoreError>;

    /// Run `op` against the latest state and persist the result.
    ///
    /// `cached` only changes when both `op` and the write succeed.
    fn transact<T>(
        &self,
        cached: &mut StoreState,
        op: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError>;
}

/// Store guarded by a single mutex; every call is atomic within the process
pub struct StateStore<P: Persistence> {
    state: Mutex<StoreState>,
    persistence: P,
}

impl<P: Persistence> StateStore<P> {
    pub(crate) fn with_state(state: StoreState, persistence: P) -> Self {
        Self {
            state: Mutex::new(state),
            persistence,
        }
    }

    pub(crate) fn persistence(&self) -> &P {
        &self.persistence
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read<T>(
        &self,
        op: impl FnOnce(&StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.lock();
        self.persistence.refresh(&mut state)?;
        op(&state)
    }

    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.lock();
        self.persistence.transact(&mut state, op)
    }
}

#[async_trait]
impl<P: Persistence> DiscussionStore for StateStore<P> {
    async fn upsert_directors(&self, directors: &[Director]) -> Result<(), StoreError> {
        self.mutate(|s| {
            s.upsert_directors(directors);
            Ok(())
        })
    }

    async fn list_directors(&self) -> Result<Vec<Director>, StoreError> {
        self.read(|s| Ok(s.list_directors()))
    }

    async fn get_director(&self, id: &DirectorId) -> Result<Director, StoreError> {
        self.read(|s| s.get_director(id))
    }

    async fn insert_meeting(
        &self,
        meeting: &Meeting,
        participants: &[Participant],
    ) -> Result<(), StoreError> {
        self.mutate(|s| s.insert_meeting(meeting, participants))
    }

    async fn get_meeting(&self, id: &MeetingId) -> Result<Meeting, StoreError> {
        self.read(|s| s.get_meeting(id))
    }

    async fn list_meetings(&self) -> Result<Vec<Meeting>, StoreError> {
        self.read(|s| Ok(s.list_meetings()))
    }

    async fn update_meeting(&self, meeting: &Meeting) -> Result<(), StoreError> {
        self.mutate(|s| s.update_meeting(meeting))
    }

    async fn roster(&self, meeting_id: &MeetingId) -> Result<Vec<RosterEntry>, StoreError> {
        self.read(|s| s.roster(meeting_id))
    }

    async fn statements(&self, meeting_id: &MeetingId) -> Result<Vec<Statement>, StoreError> {
        self.read(|s| s.statements(meeting_id))
    }

    async fn insert_question(&self, question: &UserQuestion) -> Result<(), StoreError> {
        self.mutate(|s| s.insert_question(question))
    }

    async fn get_question(
        &self,
        meeting_id: &MeetingId,
        question_id: &QuestionId,
    ) -> Result<UserQuestion, StoreError> {
        self.read(|s| s.get_question(meeting_id, question_id))
    }

    async fn questions(&self, meeting_id: &MeetingId) -> Result<Vec<UserQuestion>, StoreError> {
        self.read(|s| s.questions(meeting_id))
    }

    async fn record_question_responses(
        &self,
        meeting_id: &MeetingId,
        question_id: &QuestionId,
        responses: &[QuestionResponse],
        answered_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.mutate(|s| {
            s.record_question_responses(meeting_id, question_id, responses, answered_at)
        })
    }

    async fn question_responses(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<QuestionResponse>, StoreError> {
        self.read(|s| Ok(s.question_responses(question_id)))
    }

    async fn commit_turn(&self, commit: &TurnCommit) -> Result<(), StoreError> {
        self.mutate(|s| s.commit_turn(commit))
    }

    async fn reconcile(&self, meeting_id: &MeetingId) -> Result<ReconcileReport, StoreError> {
        self.mutate(|s| s.reconcile(meeting_id))
    }
}
