//! Advance Turn use case
//!
//! Runs one turn of a meeting: load, schedule, assemble context, compose the
//! prompt, generate, and commit the statement with its aggregate updates.

use crate::config::{BehaviorConfig, DiscussionParams};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, events,
};
use crate::ports::discussion_store::{DiscussionStore, StoreError};
use crate::ports::progress::{NoProgress, TurnProgressNotifier};
use crate::ports::text_generator::{GenerationError, TextGenerator};
use crate::use_cases::shared::{CallError, MeetingLocks, generate_bounded, is_cancelled};
use boardroom_domain::conversation::UNKNOWN_SPEAKER;
use boardroom_domain::{
    CommitRejection, Director, DirectorId, DomainError, Meeting, MeetingId, MeetingStatus,
    PromptComposer, QuestionId, RebuttalTarget, RosterEntry, SpeakerScheduler, Statement,
    StatementId, StatementRecorder, TieBreaker, TurnDecision, TurnFraming, TurnPromptInput,
    UserQuestion,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while advancing a turn
#[derive(Error, Debug)]
pub enum AdvanceTurnError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Meeting is not in an active discussion status (status: {0})")]
    InvalidState(MeetingStatus),

    #[error("Meeting has no active participants")]
    NoParticipants,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Turn conflicted with a concurrent update: {0}")]
    Conflict(CommitRejection),

    #[error("Turn cancelled before it was recorded")]
    Cancelled,

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl AdvanceTurnError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AdvanceTurnError::Cancelled)
    }

    /// The collaborator answered but the output was unusable
    pub fn is_malformed_output(&self) -> bool {
        matches!(
            self,
            AdvanceTurnError::Generation(GenerationError::MalformedOutput(_))
        )
    }
}

impl From<StoreError> for AdvanceTurnError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { entity, id } => AdvanceTurnError::NotFound { entity, id },
            StoreError::Rejected(rejection) => AdvanceTurnError::Conflict(rejection),
            other => AdvanceTurnError::Store(other),
        }
    }
}

impl From<DomainError> for AdvanceTurnError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidState(status) => AdvanceTurnError::InvalidState(status),
            DomainError::InvalidTransition { from, .. } => AdvanceTurnError::InvalidState(from),
            DomainError::NoParticipants => AdvanceTurnError::NoParticipants,
            DomainError::InvalidInput(message) => AdvanceTurnError::InvalidInput(message),
        }
    }
}

/// Speaker identity returned with a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerInfo {
    pub id: DirectorId,
    pub name: String,
    pub title: String,
}

impl From<&Director> for SpeakerInfo {
    fn from(d: &Director) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            title: d.title.clone(),
        }
    }
}

/// Result of one successful turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvanceTurnOutput {
    pub statement_id: StatementId,
    pub content: String,
    pub director: SpeakerInfo,
    pub round_number: u32,
    pub sequence_in_round: u32,
    pub is_rebuttal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_to: Option<StatementId>,
    pub framing: TurnFraming,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered_question: Option<QuestionId>,
    pub tokens_used: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Who would speak next, computed without generating anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlan {
    pub decision: TurnDecision,
    pub director: Director,
    /// Whether a pending question would reframe the turn
    pub preempted: bool,
}

/// Everything a turn reads from the store
struct TurnState {
    meeting: Meeting,
    /// Every seat, used to name speakers
    seats: Vec<RosterEntry>,
    /// Active seats in `join_order`, used for scheduling
    active: Vec<RosterEntry>,
    /// Newest first
    history: Vec<Statement>,
    /// Newest first
    questions: Vec<UserQuestion>,
}

/// Use case for advancing a meeting by one turn
pub struct AdvanceTurnUseCase<S: DiscussionStore + 'static, G: TextGenerator + 'static> {
    store: Arc<S>,
    generator: Arc<G>,
    behavior: BehaviorConfig,
    params: DiscussionParams,
    tie_breaker: Arc<Mutex<Box<dyn TieBreaker>>>,
    locks: MeetingLocks,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<S: DiscussionStore + 'static, G: TextGenerator + 'static> AdvanceTurnUseCase<S, G> {
    pub fn new(store: Arc<S>, generator: Arc<G>) -> Self {
        let params = DiscussionParams::default();
        Self {
            store,
            generator,
            behavior: BehaviorConfig::default(),
            tie_breaker: Arc::new(Mutex::new(Box::new(params.tie_breaker()))),
            params,
            locks: MeetingLocks::new(),
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set discussion parameters; reseeds the tie breaker from `params.seed`
    pub fn with_params(mut self, params: DiscussionParams) -> Self {
        self.tie_breaker = Arc::new(Mutex::new(Box::new(params.tie_breaker())));
        self.params = params;
        self
    }

    pub fn with_tie_breaker(mut self, tie_breaker: Box<dyn TieBreaker>) -> Self {
        self.tie_breaker = Arc::new(Mutex::new(tie_breaker));
        self
    }

    /// Share per-meeting locks with other use cases
    pub fn with_locks(mut self, locks: MeetingLocks) -> Self {
        self.locks = locks;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Compute the next turn without generating or recording it.
    ///
    /// In `free` mode the speaker drawn here may differ from the one the
    /// next [`execute`](Self::execute) picks; round and sequence do not.
    pub async fn plan(&self, meeting_id: &MeetingId) -> Result<TurnPlan, AdvanceTurnError> {
        let state = self.load(meeting_id).await?;
        let decision = self.schedule(&state)?;
        let director = state.active[decision.speaker_index].director.clone();
        let preempted = self
            .params
            .assembler()
            .preemption(&state.questions)
            .is_some();
        Ok(TurnPlan {
            decision,
            director,
            preempted,
        })
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        meeting_id: &MeetingId,
    ) -> Result<AdvanceTurnOutput, AdvanceTurnError> {
        self.execute_with_progress(meeting_id, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        meeting_id: &MeetingId,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<AdvanceTurnOutput, AdvanceTurnError> {
        let _guard = self.locks.acquire(meeting_id).await;
        if is_cancelled(&self.cancellation_token) {
            return Err(AdvanceTurnError::Cancelled);
        }

        let state = self.load(meeting_id).await?;
        let decision = self.schedule(&state)?;
        let director = state.active[decision.speaker_index].director.clone();

        info!(
            "Meeting {} round {} seq {}: {} speaks{}",
            meeting_id,
            decision.round,
            decision.sequence_in_round,
            director.name,
            if decision.is_rebuttal { " (rebuttal)" } else { "" }
        );
        self.conversation_logger.log(ConversationEvent::new(
            events::TURN_SCHEDULED,
            json!({
                "meeting_id": meeting_id,
                "mode": state.meeting.discussion_mode,
                "director_id": director.id,
                "round": decision.round,
                "sequence_in_round": decision.sequence_in_round,
                "is_rebuttal": decision.is_rebuttal,
                "responding_to": decision.responding_to,
            }),
        ));
        progress.on_turn_scheduled(&decision, &director);

        let context = self
            .params
            .assembler()
            .assemble(&state.history, &state.seats, &state.questions);
        let rebuttal_target = decision
            .responding_to
            .as_ref()
            .and_then(|id| state.history.iter().find(|s| &s.id == id))
            .map(|target| RebuttalTarget {
                speaker_name: speaker_name(&state.seats, &target.director_id),
                content: target.content.clone(),
            });

        let input = TurnPromptInput {
            director: &director,
            topic: &state.meeting.topic,
            mode: &state.meeting.discussion_mode,
            round: decision.round,
            is_rebuttal: decision.is_rebuttal,
            context: &context,
            rebuttal_target,
        };
        let composer =
            PromptComposer::default().with_turn_max_tokens(self.behavior.turn_max_tokens);
        let framing = PromptComposer::framing(&input);
        let request = composer.compose_turn(&input);
        debug!(
            "Composed {} prompt ({} chars, window {})",
            framing,
            request.prompt.len(),
            context.window.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            events::GENERATION_REQUEST,
            json!({
                "meeting_id": meeting_id,
                "director_id": director.id,
                "framing": framing,
                "max_tokens": request.max_tokens,
                "prompt": request.prompt,
                "preempted_by": context.preemption.as_ref().map(|q| &q.id),
            }),
        ));

        let output = match generate_bounded(
            self.generator.as_ref(),
            &request,
            self.behavior.timeout,
            &self.cancellation_token,
        )
        .await
        {
            Ok(output) => output,
            Err(CallError::Cancelled) => {
                info!("Turn for meeting {} cancelled during generation", meeting_id);
                progress.on_turn_failed(&director, "cancelled");
                return Err(AdvanceTurnError::Cancelled);
            }
            Err(CallError::Failed(e)) => {
                warn!("Generation failed for {}: {}", director.name, e);
                progress.on_turn_failed(&director, &e.to_string());
                return Err(AdvanceTurnError::Generation(e));
            }
        };

        // Past this point the turn is either committed in full or not at all
        if is_cancelled(&self.cancellation_token) {
            progress.on_turn_failed(&director, "cancelled");
            return Err(AdvanceTurnError::Cancelled);
        }

        let answered = context.preemption.as_ref().map(|q| q.id.clone());
        let commit = StatementRecorder::prepare(
            &state.meeting,
            &decision,
            &output,
            answered.clone(),
            Utc::now(),
        );
        if let Err(e) = self.store.commit_turn(&commit).await {
            warn!("Commit failed for meeting {}: {}", meeting_id, e);
            progress.on_turn_failed(&director, &e.to_string());
            return Err(e.into());
        }

        let statement = commit.statement;
        self.conversation_logger.log(ConversationEvent::new(
            events::STATEMENT_RECORDED,
            json!({
                "meeting_id": meeting_id,
                "statement_id": statement.id,
                "director_id": statement.director_id,
                "round": statement.round_number,
                "sequence_in_round": statement.sequence_in_round,
                "response_to": statement.response_to,
                "answered_question": answered,
                "tokens_used": statement.tokens_used,
                "model": statement.model,
                "content": statement.content,
            }),
        ));
        progress.on_turn_recorded(&statement, &director);

        Ok(AdvanceTurnOutput {
            is_rebuttal: statement.is_rebuttal(),
            statement_id: statement.id,
            content: statement.content,
            director: SpeakerInfo::from(&director),
            round_number: statement.round_number,
            sequence_in_round: statement.sequence_in_round,
            response_to: statement.response_to,
            framing,
            answered_question: answered,
            tokens_used: statement.tokens_used,
            model: statement.model,
        })
    }

    /// Read everything a turn needs. Counters that disagree with the
    /// statement history are reconciled first so scheduling and the commit
    /// guard work from repaired aggregates.
    async fn load(&self, meeting_id: &MeetingId) -> Result<TurnState, AdvanceTurnError> {
        let mut meeting = self.store.get_meeting(meeting_id).await?;
        meeting.ensure_active()?;

        let history = self.store.statements(meeting_id).await?;
        if meeting.total_statements as usize != history.len() {
            let report = self.store.reconcile(meeting_id).await?;
            warn!(
                "Meeting {} counters drifted ({} recorded, {} statements); repaired: {}",
                meeting_id,
                meeting.total_statements,
                history.len(),
                !report.is_clean()
            );
            meeting = self.store.get_meeting(meeting_id).await?;
        }

        let seats = self.store.roster(meeting_id).await?;
        let active: Vec<RosterEntry> = seats
            .iter()
            .filter(|e| e.participant.is_active)
            .cloned()
            .collect();
        let questions = self.store.questions(meeting_id).await?;

        Ok(TurnState {
            meeting,
            seats,
            active,
            history,
            questions,
        })
    }

    fn schedule(&self, state: &TurnState) -> Result<TurnDecision, AdvanceTurnError> {
        let mut tie_breaker = self
            .tie_breaker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(SpeakerScheduler::next_turn(
            &state.meeting,
            &state.active,
            &state.history,
            &mut **tie_breaker,
        )?)
    }
}

fn speaker_name(seats: &[RosterEntry], director_id: &DirectorId) -> String {
    seats
        .iter()
        .find(|e| e.director_id() == director_id)
        .map(|e| e.name().to_string())
        .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string())
}
