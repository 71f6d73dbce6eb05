//! Meeting lifecycle use case
//!
//! Creates meetings with their roster, moves them through
//! `preparing -> discussing/debating -> completed`, records user questions,
//! and reads everything back.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, events,
};
use crate::ports::discussion_store::{DiscussionStore, StoreError};
use boardroom_domain::{
    Director, DirectorId, DiscussionMode, DomainError, Meeting, MeetingId, MeetingStatus,
    Participant, QuestionResponse, RosterEntry, Statement, UserQuestion,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors for meeting lifecycle and question flows
#[derive(Error, Debug)]
pub enum MeetingError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation not allowed while meeting is {0}")]
    InvalidState(MeetingStatus),

    #[error("Meeting has no active participants")]
    NoParticipants,

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for MeetingError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { entity, id } => MeetingError::NotFound { entity, id },
            other => MeetingError::Store(other),
        }
    }
}

impl From<DomainError> for MeetingError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidState(status) => MeetingError::InvalidState(status),
            DomainError::InvalidTransition { from, .. } => MeetingError::InvalidState(from),
            DomainError::NoParticipants => MeetingError::NoParticipants,
            DomainError::InvalidInput(message) => MeetingError::InvalidInput(message),
        }
    }
}

/// Input for creating a meeting
#[derive(Debug, Clone)]
pub struct CreateMeetingInput {
    pub title: String,
    pub topic: String,
    pub description: String,
    pub mode: DiscussionMode,
    /// 0 selects the default budget
    pub max_rounds: u32,
    /// Seat order follows this list
    pub director_ids: Vec<DirectorId>,
}

impl CreateMeetingInput {
    pub fn new(
        title: impl Into<String>,
        topic: impl Into<String>,
        director_ids: Vec<DirectorId>,
    ) -> Self {
        Self {
            title: title.into(),
            topic: topic.into(),
            description: String::new(),
            mode: DiscussionMode::default(),
            max_rounds: 0,
            director_ids,
        }
    }

    pub fn with_mode(mut self, mode: DiscussionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A user question with its direct answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuestion {
    pub question: UserQuestion,
    pub responses: Vec<QuestionResponse>,
}

/// Full read model of a meeting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingView {
    pub meeting: Meeting,
    pub roster: Vec<RosterEntry>,
    /// Oldest first
    pub statements: Vec<Statement>,
    /// Oldest first
    pub questions: Vec<AnsweredQuestion>,
}

impl MeetingView {
    pub fn director(&self, id: &DirectorId) -> Option<&Director> {
        self.roster
            .iter()
            .find(|e| e.director_id() == id)
            .map(|e| &e.director)
    }
}

/// Use case for the meeting lifecycle
pub struct ManageMeetingUseCase<S: DiscussionStore + 'static> {
    store: Arc<S>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<S: DiscussionStore + 'static> ManageMeetingUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn directors(&self) -> Result<Vec<Director>, MeetingError> {
        Ok(self.store.list_directors().await?)
    }

    /// Create a meeting in `preparing` with seats in the given order
    pub async fn create(&self, input: CreateMeetingInput) -> Result<Meeting, MeetingError> {
        if input.director_ids.is_empty() {
            return Err(MeetingError::InvalidInput(
                "at least one director is required".into(),
            ));
        }
        for (i, id) in input.director_ids.iter().enumerate() {
            if input.director_ids[..i].contains(id) {
                return Err(MeetingError::InvalidInput(format!(
                    "director {id} is listed twice"
                )));
            }
        }

        let now = Utc::now();
        let meeting = Meeting::new(input.title, input.topic, input.mode, input.max_rounds, now)?
            .with_description(input.description);

        for id in &input.director_ids {
            self.store.get_director(id).await?;
        }
        let participants: Vec<Participant> = input
            .director_ids
            .iter()
            .enumerate()
            .map(|(i, id)| Participant::new(meeting.id.clone(), id.clone(), i as u32 + 1, now))
            .collect();

        self.store.insert_meeting(&meeting, &participants).await?;
        info!(
            "Created meeting {} ({} mode, {} directors)",
            meeting.id,
            meeting.discussion_mode,
            participants.len()
        );
        Ok(meeting)
    }

    pub async fn start(&self, meeting_id: &MeetingId) -> Result<Meeting, MeetingError> {
        let mut meeting = self.store.get_meeting(meeting_id).await?;
        meeting.start(Utc::now())?;
        self.store.update_meeting(&meeting).await?;
        info!("Meeting {} started ({})", meeting.id, meeting.status);
        Ok(meeting)
    }

    pub async fn finish(&self, meeting_id: &MeetingId) -> Result<Meeting, MeetingError> {
        let mut meeting = self.store.get_meeting(meeting_id).await?;
        meeting.finish(Utc::now())?;
        self.store.update_meeting(&meeting).await?;
        info!(
            "Meeting {} completed after {} statements",
            meeting.id, meeting.total_statements
        );
        Ok(meeting)
    }

    /// Record a pending question. `asker_name` defaults to `"User"`.
    pub async fn ask(
        &self,
        meeting_id: &MeetingId,
        question: &str,
        asker_name: Option<String>,
    ) -> Result<UserQuestion, MeetingError> {
        let meeting = self.store.get_meeting(meeting_id).await?;
        if meeting.status.is_terminal() {
            return Err(MeetingError::InvalidState(meeting.status));
        }
        let question = UserQuestion::new(meeting.id, question, asker_name, Utc::now())
            .ok_or_else(|| MeetingError::InvalidInput("question is required".into()))?;

        self.store.insert_question(&question).await?;
        info!(
            "{} asked a question in meeting {}",
            question.asker_name, meeting_id
        );
        self.conversation_logger.log(ConversationEvent::new(
            events::QUESTION_ASKED,
            json!({
                "meeting_id": meeting_id,
                "question_id": question.id,
                "asker_name": question.asker_name,
                "question": question.question,
            }),
        ));
        Ok(question)
    }

    /// Pending questions of a meeting, newest first
    pub async fn pending(&self, meeting_id: &MeetingId) -> Result<Vec<UserQuestion>, MeetingError> {
        let meeting = self.store.get_meeting(meeting_id).await?;
        if meeting.status == MeetingStatus::Cancelled {
            return Ok(Vec::new());
        }
        Ok(self
            .store
            .questions(meeting_id)
            .await?
            .into_iter()
            .filter(UserQuestion::is_pending)
            .collect())
    }

    pub async fn list(&self) -> Result<Vec<Meeting>, MeetingError> {
        Ok(self.store.list_meetings().await?)
    }

    pub async fn show(&self, meeting_id: &MeetingId) -> Result<MeetingView, MeetingError> {
        let meeting = self.store.get_meeting(meeting_id).await?;
        let roster = self.store.roster(meeting_id).await?;
        let mut statements = self.store.statements(meeting_id).await?;
        statements.reverse();

        let mut questions = Vec::new();
        for question in self.store.questions(meeting_id).await?.into_iter().rev() {
            let responses = self.store.question_responses(&question.id).await?;
            questions.push(AnsweredQuestion {
                question,
                responses,
            });
        }

        Ok(MeetingView {
            meeting,
            roster,
            statements,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::shared::test_support::TestStore;

    fn ids(names: &[&str]) -> Vec<DirectorId> {
        names.iter().map(|n| DirectorId::from(*n)).collect()
    }

    #[tokio::test]
    async fn test_create_seats_in_order() {
        let store = Arc::new(TestStore::with_directors(&["Ada", "Ben", "Cy"]));
        let uc = ManageMeetingUseCase::new(Arc::clone(&store));

        let meeting = uc
            .create(CreateMeetingInput::new("Board", "AI", ids(&["cy", "ada"])))
            .await
            .unwrap();
        assert_eq!(meeting.status, MeetingStatus::Preparing);
        assert_eq!(meeting.max_rounds, 10);
        assert_eq!(meeting.discussion_mode, DiscussionMode::RoundRobin);

        let roster = store.roster(&meeting.id).await.unwrap();
        let order: Vec<(&str, u32)> = roster
            .iter()
            .map(|e| (e.director_id().as_str(), e.participant.join_order))
            .collect();
        assert_eq!(order, vec![("cy", 1), ("ada", 2)]);
        assert!(roster.iter().all(|e| e.participant.is_active));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let store = Arc::new(TestStore::with_directors(&["Ada"]));
        let uc = ManageMeetingUseCase::new(store);

        let err = uc
            .create(CreateMeetingInput::new("Board", "AI", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, MeetingError::InvalidInput(_)));

        let err = uc
            .create(CreateMeetingInput::new(" ", "AI", ids(&["ada"])))
            .await
            .unwrap_err();
        assert!(matches!(err, MeetingError::InvalidInput(_)));

        let err = uc
            .create(CreateMeetingInput::new("Board", "AI", ids(&["ada", "ada"])))
            .await
            .unwrap_err();
        assert!(matches!(err, MeetingError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_unknown_director_is_not_found() {
        let store = Arc::new(TestStore::with_directors(&["Ada"]));
        let uc = ManageMeetingUseCase::new(Arc::clone(&store));
        let err = uc
            .create(CreateMeetingInput::new("Board", "AI", ids(&["ada", "zed"])))
            .await
            .unwrap_err();
        assert!(matches!(err, MeetingError::NotFound { entity: "director", .. }));
        assert!(store.list_meetings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle() {
        let store = Arc::new(TestStore::with_directors(&["Ada", "Ben"]));
        let uc = ManageMeetingUseCase::new(store);
        let meeting = uc
            .create(
                CreateMeetingInput::new("Board", "AI", ids(&["ada", "ben"]))
                    .with_mode(DiscussionMode::Debate)
                    .with_max_rounds(3),
            )
            .await
            .unwrap();

        let started = uc.start(&meeting.id).await.unwrap();
        assert_eq!(started.status, MeetingStatus::Debating);
        assert_eq!(started.current_round, 1);

        let err = uc.start(&meeting.id).await.unwrap_err();
        assert!(matches!(err, MeetingError::InvalidState(MeetingStatus::Debating)));

        let finished = uc.finish(&meeting.id).await.unwrap();
        assert_eq!(finished.status, MeetingStatus::Completed);
        assert!(finished.ended_at.is_some());

        let view = uc.show(&meeting.id).await.unwrap();
        assert_eq!(view.meeting.status, MeetingStatus::Completed);
        assert_eq!(view.roster.len(), 2);
        assert!(view.statements.is_empty());
    }

    #[tokio::test]
    async fn test_ask_defaults_asker() {
        let store = Arc::new(TestStore::with_directors(&["Ada"]));
        let uc = ManageMeetingUseCase::new(store);
        let meeting = uc
            .create(CreateMeetingInput::new("Board", "AI", ids(&["ada"])))
            .await
            .unwrap();

        let q = uc.ask(&meeting.id, "Why now?", None).await.unwrap();
        assert_eq!(q.asker_name, "User");
        assert!(q.is_pending());
        assert_eq!(uc.pending(&meeting.id).await.unwrap(), vec![q]);
    }

    #[tokio::test]
    async fn test_ask_rejects_blank_missing_and_finished() {
        let store = Arc::new(TestStore::with_directors(&["Ada"]));
        let uc = ManageMeetingUseCase::new(store);
        let meeting = uc
            .create(CreateMeetingInput::new("Board", "AI", ids(&["ada"])))
            .await
            .unwrap();

        assert!(matches!(
            uc.ask(&meeting.id, "  ", None).await.unwrap_err(),
            MeetingError::InvalidInput(_)
        ));
        assert!(matches!(
            uc.ask(&MeetingId::from("nope"), "Why?", None)
                .await
                .unwrap_err(),
            MeetingError::NotFound { .. }
        ));

        uc.start(&meeting.id).await.unwrap();
        uc.finish(&meeting.id).await.unwrap();
        assert!(matches!(
            uc.ask(&meeting.id, "Why?", None).await.unwrap_err(),
            MeetingError::InvalidState(MeetingStatus::Completed)
        ));
    }

    #[tokio::test]
    async fn test_start_missing_meeting() {
        let uc = ManageMeetingUseCase::new(Arc::new(TestStore::default()));
        let err = uc.start(&MeetingId::from("nope")).await.unwrap_err();
        assert!(matches!(err, MeetingError::NotFound { entity: "meeting", .. }));
    }
}
