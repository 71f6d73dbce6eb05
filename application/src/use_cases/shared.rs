//! Shared utilities for use cases.
//!
//! Contains per-meeting serialization, cancellation checks and the bounded
//! generation call used by every flow that talks to the generator.

use crate::ports::text_generator::{GenerationError, TextGenerator};
use boardroom_domain::{GenerationOutput, GenerationRequest, MeetingId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tokio_util::sync::CancellationToken;

type LockMap = Arc<Mutex<HashMap<MeetingId, Arc<AsyncMutex<()>>>>>;

/// One async mutex per meeting.
///
/// Turn advancement holds the meeting's lock from the first read to the
/// commit, so two turns of the same meeting never interleave within this
/// process. Different meetings proceed in parallel. An entry is dropped
/// once nobody holds or waits for it.
#[derive(Default, Clone)]
pub struct MeetingLocks {
    locks: LockMap,
}

impl MeetingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(locks: &LockMap) -> MutexGuard<'_, HashMap<MeetingId, Arc<AsyncMutex<()>>>> {
        locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Wait for exclusive access to `meeting_id`
    pub async fn acquire(&self, meeting_id: &MeetingId) -> MeetingGuard {
        let lock = Arc::clone(Self::map(&self.locks).entry(meeting_id.clone()).or_default());
        MeetingGuard {
            guard: Some(lock.lock_owned().await),
            meeting_id: meeting_id.clone(),
            locks: Arc::clone(&self.locks),
        }
    }
}

/// Exclusive access to one meeting, released on drop
pub struct MeetingGuard {
    guard: Option<OwnedMutexGuard<()>>,
    meeting_id: MeetingId,
    locks: LockMap,
}

impl Drop for MeetingGuard {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = MeetingLocks::map(&self.locks);
        // Waiters and new acquirers hold their own clone
        if locks
            .get(&self.meeting_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.meeting_id);
        }
    }
}

/// Why a bounded generation call produced no output
#[derive(Debug)]
pub(crate) enum CallError {
    Failed(GenerationError),
    Cancelled,
}

/// Check if cancellation has been requested.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(CancellationToken::is_cancelled)
}

/// Call the generator under an optional timeout and cancellation token.
///
/// Blank output is reported as [`GenerationError::MalformedOutput`].
pub(crate) async fn generate_bounded<G: TextGenerator + ?Sized>(
    generator: &G,
    request: &GenerationRequest,
    timeout: Option<Duration>,
    cancellation_token: &Option<CancellationToken>,
) -> Result<GenerationOutput, CallError> {
    if is_cancelled(cancellation_token) {
        return Err(CallError::Cancelled);
    }

    let call = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, generator.generate(request))
                .await
                .unwrap_or(Err(GenerationError::Timeout(limit))),
            None => generator.generate(request).await,
        }
    };

    let result = match cancellation_token {
        Some(token) => {
            tokio::select! {
                result = call => result,
                _ = token.cancelled() => return Err(CallError::Cancelled),
            }
        }
        None => call.await,
    };

    let output = result.map_err(CallError::Failed)?;
    if output.text.trim().is_empty() {
        return Err(CallError::Failed(GenerationError::MalformedOutput(
            "empty response".to_string(),
        )));
    }
    Ok(output)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory store and scripted generator shared by use case tests.

    use crate::ports::discussion_store::{DiscussionStore, StoreError};
    use crate::ports::text_generator::{GenerationError, TextGenerator};
    use async_trait::async_trait;
    use boardroom_domain::{
        Director, DirectorId, GenerationOutput, GenerationRequest, Meeting, MeetingId,
        Participant, QuestionId, QuestionResponse, QuestionStatus, ReconcileReport, RosterEntry,
        Statement, TokenUsage, TurnCommit, UserQuestion, reconcile,
    };
    use chrono::{DateTime, Utc};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct State {
        directors: Vec<Director>,
        meetings: Vec<Meeting>,
        participants: Vec<Participant>,
        statements: Vec<Statement>,
        questions: Vec<UserQuestion>,
        responses: Vec<QuestionResponse>,
    }

    /// Minimal store used by application tests
    #[derive(Default)]
    pub(crate) struct TestStore {
        state: Mutex<State>,
        pub(crate) fail_commits: Mutex<bool>,
    }

    impl TestStore {
        pub(crate) fn with_directors(names: &[&str]) -> Self {
            let store = Self::default();
            store.state.lock().unwrap().directors = names
                .iter()
                .map(|n| Director::new(n.to_lowercase(), *n, format!("{n} title"), ""))
                .collect();
            store
        }

        pub(crate) fn statement_count(&self) -> usize {
            self.state.lock().unwrap().statements.len()
        }

        pub(crate) fn deactivate(&self, director: &str) {
            let mut state = self.state.lock().unwrap();
            for p in state
                .participants
                .iter_mut()
                .filter(|p| p.director_id.as_str() == director)
            {
                p.is_active = false;
            }
        }

        /// Overwrite a meeting's statement counter without touching history
        pub(crate) fn set_total_statements(&self, meeting_id: &MeetingId, total: u32) {
            let mut state = self.state.lock().unwrap();
            for m in state.meetings.iter_mut().filter(|m| &m.id == meeting_id) {
                m.total_statements = total;
            }
        }

        pub(crate) fn participant(&self, director: &str) -> Participant {
            self.state
                .lock()
                .unwrap()
                .participants
                .iter()
                .find(|p| p.director_id.as_str() == director)
                .cloned()
                .unwrap()
        }
    }

    #[async_trait]
    impl DiscussionStore for TestStore {
        async fn upsert_directors(&self, directors: &[Director]) -> Result<(), StoreError> {
            let mut state = self.state.lock().unwrap();
            for d in directors {
                state.directors.retain(|x| x.id != d.id);
                state.directors.push(d.clone());
            }
            Ok(())
        }

        async fn list_directors(&self) -> Result<Vec<Director>, StoreError> {
            Ok(self.state.lock().unwrap().directors.clone())
        }

        async fn get_director(&self, id: &DirectorId) -> Result<Director, StoreError> {
            let state = self.state.lock().unwrap();
            state
                .directors
                .iter()
                .find(|d| &d.id == id)
                .cloned()
                .ok_or_else(|| StoreError::director_not_found(id))
        }

        async fn insert_meeting(
            &self,
            meeting: &Meeting,
            participants: &[Participant],
        ) -> Result<(), StoreError> {
            let mut state = self.state.lock().unwrap();
            state.meetings.push(meeting.clone());
            state.participants.extend_from_slice(participants);
            Ok(())
        }

        async fn get_meeting(&self, id: &MeetingId) -> Result<Meeting, StoreError> {
            let state = self.state.lock().unwrap();
            state
                .meetings
                .iter()
                .find(|m| &m.id == id)
                .cloned()
                .ok_or_else(|| StoreError::meeting_not_found(id))
        }

        async fn list_meetings(&self) -> Result<Vec<Meeting>, StoreError> {
            Ok(self.state.lock().unwrap().meetings.clone())
        }

        async fn update_meeting(&self, meeting: &Meeting) -> Result<(), StoreError> {
            let mut state = self.state.lock().unwrap();
            let stored = state
                .meetings
                .iter_mut()
                .find(|m| m.id == meeting.id)
                .ok_or_else(|| StoreError::meeting_not_found(&meeting.id))?;
            let (total, round) = (stored.total_statements, stored.current_round);
            *stored = meeting.clone();
            stored.total_statements = total;
            stored.current_round = round.max(meeting.current_round);
            Ok(())
        }

        async fn roster(&self, meeting_id: &MeetingId) -> Result<Vec<RosterEntry>, StoreError> {
            let state = self.state.lock().unwrap();
            let mut entries: Vec<RosterEntry> = state
                .participants
                .iter()
                .filter(|p| &p.meeting_id == meeting_id)
                .filter_map(|p| {
                    state
                        .directors
                        .iter()
                        .find(|d| d.id == p.director_id)
                        .map(|d| RosterEntry::new(p.clone(), d.clone()))
                })
                .collect();
            entries.sort_by_key(|e| e.participant.join_order);
            Ok(entries)
        }

        async fn statements(&self, meeting_id: &MeetingId) -> Result<Vec<Statement>, StoreError> {
            let state = self.state.lock().unwrap();
            let mut statements: Vec<Statement> = state
                .statements
                .iter()
                .filter(|s| &s.meeting_id == meeting_id)
                .cloned()
                .collect();
            statements.sort_by(|a, b| {
                (b.round_number, b.sequence_in_round).cmp(&(a.round_number, a.sequence_in_round))
            });
            Ok(statements)
        }

        async fn insert_question(&self, question: &UserQuestion) -> Result<(), StoreError> {
            self.state.lock().unwrap().questions.push(question.clone());
            Ok(())
        }

        async fn get_question(
            &self,
            meeting_id: &MeetingId,
            question_id: &QuestionId,
        ) -> Result<UserQuestion, StoreError> {
            let state = self.state.lock().unwrap();
            state
                .questions
                .iter()
                .find(|q| &q.id == question_id && &q.meeting_id == meeting_id)
                .cloned()
                .ok_or_else(|| StoreError::question_not_found(question_id))
        }

        async fn questions(&self, meeting_id: &MeetingId) -> Result<Vec<UserQuestion>, StoreError> {
            let state = self.state.lock().unwrap();
            Ok(state
                .questions
                .iter()
                .rev()
                .filter(|q| &q.meeting_id == meeting_id)
                .cloned()
                .collect())
        }

        async fn record_question_responses(
            &self,
            _meeting_id: &MeetingId,
            question_id: &QuestionId,
            responses: &[QuestionResponse],
            answered_at: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            let mut state = self.state.lock().unwrap();
            state.responses.extend_from_slice(responses);
            if let Some(q) = state.questions.iter_mut().find(|q| &q.id == question_id) {
                q.status = QuestionStatus::Answered;
                q.answered_at = Some(answered_at);
            }
            Ok(())
        }

        async fn question_responses(
            &self,
            question_id: &QuestionId,
        ) -> Result<Vec<QuestionResponse>, StoreError> {
            let state = self.state.lock().unwrap();
            Ok(state
                .responses
                .iter()
                .filter(|r| &r.question_id == question_id)
                .cloned()
                .collect())
        }

        async fn commit_turn(&self, commit: &TurnCommit) -> Result<(), StoreError> {
            if *self.fail_commits.lock().unwrap() {
                return Err(StoreError::Backend("disk full".into()));
            }
            let mut guard = self.state.lock().unwrap();
            let state = &mut *guard;
            let meeting = state
                .meetings
                .iter_mut()
                .find(|m| &m.id == commit.meeting_id())
                .ok_or_else(|| StoreError::meeting_not_found(commit.meeting_id()))?;
            commit.validate(meeting)?;
            let speaker = state
                .participants
                .iter_mut()
                .find(|p| {
                    &p.meeting_id == commit.meeting_id()
                        && p.director_id == commit.statement.director_id
                })
                .ok_or_else(|| StoreError::director_not_found(&commit.statement.director_id))?;
            let question = commit
                .answered_question
                .as_ref()
                .and_then(|id| state.questions.iter_mut().find(|q| &q.id == id));
            commit.apply(meeting, speaker, question);
            state.statements.push(commit.statement.clone());
            Ok(())
        }

        async fn reconcile(&self, meeting_id: &MeetingId) -> Result<ReconcileReport, StoreError> {
            let mut guard = self.state.lock().unwrap();
            let state = &mut *guard;
            let meeting = state
                .meetings
                .iter_mut()
                .find(|m| &m.id == meeting_id)
                .ok_or_else(|| StoreError::meeting_not_found(meeting_id))?;
            let statements: Vec<Statement> = state
                .statements
                .iter()
                .filter(|s| &s.meeting_id == meeting_id)
                .cloned()
                .collect();
            let mut seats: Vec<Participant> = state
                .participants
                .iter()
                .filter(|p| &p.meeting_id == meeting_id)
                .cloned()
                .collect();
            let report = reconcile(meeting, &mut seats, &statements);
            state.participants.retain(|p| &p.meeting_id != meeting_id);
            state.participants.extend(seats);
            Ok(report)
        }
    }

    /// Scripted reply for one generation call
    pub(crate) enum Reply {
        Text(String),
        Fail(GenerationError),
        Hang,
    }

    /// Generator that replays a queue of replies and records prompts
    #[derive(Default)]
    pub(crate) struct ScriptedGenerator {
        replies: Mutex<VecDeque<Reply>>,
        pub(crate) prompts: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedGenerator {
        pub(crate) fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::default(),
            }
        }

        pub(crate) fn texts(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Reply::Text(t.to_string())).collect())
        }

        pub(crate) fn last_prompt(&self) -> GenerationRequest {
            self.prompts.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn model(&self) -> &str {
            "scripted-model"
        }

        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerationOutput, GenerationError> {
            self.prompts.lock().unwrap().push(request.clone());
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Reply::Text(text)) => Ok(GenerationOutput::new(
                    text,
                    "scripted-model",
                    TokenUsage {
                        input_tokens: 100,
                        output_tokens: 42,
                    },
                )),
                Some(Reply::Fail(e)) => Err(e),
                Some(Reply::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(GenerationError::Network("unreachable".into()))
                }
                None => Ok(GenerationOutput::new(
                    "(default response)",
                    "scripted-model",
                    TokenUsage::default(),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{Reply, ScriptedGenerator};
    use super::*;

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let generator = ScriptedGenerator::new(vec![Reply::Hang]);
        let request = GenerationRequest::new("hi", 10);
        let err = generate_bounded(&generator, &request, Some(Duration::from_millis(20)), &None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CallError::Failed(GenerationError::Timeout(d)) if d == Duration::from_millis(20)
        ));
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_call() {
        let generator = ScriptedGenerator::new(vec![Reply::Hang]);
        let request = GenerationRequest::new("hi", 10);
        let token = CancellationToken::new();
        let cancel = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            cancel.cancel();
        });
        let err = generate_bounded(&generator, &request, None, &Some(token))
            .await
            .unwrap_err();
        assert!(matches!(err, CallError::Cancelled));
    }

    #[tokio::test]
    async fn test_blank_output_is_malformed() {
        let generator = ScriptedGenerator::texts(&["   "]);
        let request = GenerationRequest::new("hi", 10);
        let err = generate_bounded(&generator, &request, None, &None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CallError::Failed(GenerationError::MalformedOutput(_))
        ));
    }

    #[tokio::test]
    async fn test_locks_serialize_same_meeting() {
        let locks = MeetingLocks::new();
        let id = MeetingId::from("m");
        let guard = locks.acquire(&id).await;
        let other = MeetingId::from("n");
        // A different meeting is not blocked
        let _other_guard = locks.acquire(&other).await;

        let locks2 = locks.clone();
        let id2 = id.clone();
        let waiter = tokio::spawn(async move {
            let _g = locks2.acquire(&id2).await;
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());
        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_released_locks_are_forgotten() {
        let locks = MeetingLocks::new();
        let id = MeetingId::from("m");
        let guard = locks.acquire(&id).await;

        let locks2 = locks.clone();
        let id2 = id.clone();
        let waiter = tokio::spawn(async move {
            let _g = locks2.acquire(&id2).await;
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(guard);
        // The waiter still needs the entry
        waiter.await.unwrap();
        assert!(MeetingLocks::map(&locks.locks).is_empty());

        drop(locks.acquire(&id).await);
        assert!(MeetingLocks::map(&locks.locks).is_empty());
    }
}
