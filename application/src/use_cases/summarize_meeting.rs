//! Summarize Meeting use case
//!
//! Builds a chronological transcript of statements and user questions, asks
//! the generator for a structured JSON summary, and stores the parsed result
//! on the meeting. Unparseable output falls back to a default summary.

use crate::config::BehaviorConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, events,
};
use crate::ports::discussion_store::{DiscussionStore, StoreError};
use crate::ports::text_generator::{GenerationError, TextGenerator};
use crate::use_cases::shared::{CallError, generate_bounded};
use boardroom_domain::{MeetingId, MeetingSummary, PromptComposer, Transcript, parse_summary};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that can occur while summarizing
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Meeting {0} has nothing to summarize yet")]
    EmptyTranscript(MeetingId),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Summary cancelled before it was stored")]
    Cancelled,

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl SummarizeError {
    /// The meeting exists but its state does not allow a summary
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, SummarizeError::EmptyTranscript(_))
    }
}

impl From<StoreError> for SummarizeError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { entity, id } => SummarizeError::NotFound { entity, id },
            other => SummarizeError::Store(other),
        }
    }
}

/// Result of a summary run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarizeOutput {
    pub summary: MeetingSummary,
    /// The generated text could not be parsed and a default was stored
    pub fallback_used: bool,
    pub transcript_items: usize,
}

/// Use case for summarizing a meeting
pub struct SummarizeMeetingUseCase<S: DiscussionStore + 'static, G: TextGenerator + 'static> {
    store: Arc<S>,
    generator: Arc<G>,
    behavior: BehaviorConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<S: DiscussionStore + 'static, G: TextGenerator + 'static> SummarizeMeetingUseCase<S, G> {
    pub fn new(store: Arc<S>, generator: Arc<G>) -> Self {
        Self {
            store,
            generator,
            behavior: BehaviorConfig::default(),
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub async fn execute(&self, meeting_id: &MeetingId) -> Result<SummarizeOutput, SummarizeError> {
        let mut meeting = self.store.get_meeting(meeting_id).await?;
        let roster = self.store.roster(meeting_id).await?;
        let statements = self.store.statements(meeting_id).await?;
        let questions = self.store.questions(meeting_id).await?;

        let transcript = Transcript::build(&statements, &questions, &roster);
        if transcript.is_empty() {
            return Err(SummarizeError::EmptyTranscript(meeting.id));
        }

        let request = PromptComposer::default().compose_summary(
            &meeting.title,
            &meeting.topic,
            &transcript.speakers(),
            transcript.len(),
            &transcript.render(),
        );
        info!(
            "Summarizing meeting {} ({} transcript items)",
            meeting_id,
            transcript.len()
        );

        let output = match generate_bounded(
            self.generator.as_ref(),
            &request,
            self.behavior.timeout,
            &self.cancellation_token,
        )
        .await
        {
            Ok(output) => output,
            Err(CallError::Failed(e)) => return Err(SummarizeError::Generation(e)),
            Err(CallError::Cancelled) => return Err(SummarizeError::Cancelled),
        };

        let parsed = parse_summary(&output.text, &meeting.topic);
        let fallback_used = parsed.is_fallback();
        if fallback_used {
            warn!(
                "Summary for meeting {} was malformed; stored the default summary",
                meeting_id
            );
        }
        let summary = parsed.into_summary();

        meeting.summary = Some(summary.clone());
        self.store.update_meeting(&meeting).await?;

        self.conversation_logger.log(ConversationEvent::new(
            events::SUMMARY_GENERATED,
            json!({
                "meeting_id": meeting_id,
                "fallback_used": fallback_used,
                "transcript_items": transcript.len(),
                "summary": summary,
            }),
        ));

        Ok(SummarizeOutput {
            summary,
            fallback_used,
            transcript_items: transcript.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::shared::test_support::{ScriptedGenerator, TestStore};
    use boardroom_domain::{
        DiscussionMode, FirstCandidate, GenerationOutput, Meeting, Participant, SpeakerScheduler,
        StatementRecorder, TokenUsage, TurnDecision,
    };
    use chrono::Utc;

    async fn meeting_with_statement(store: &TestStore) -> MeetingId {
        let now = Utc::now();
        let mut meeting = Meeting::new("Board", "remote work", DiscussionMode::RoundRobin, 2, now)
            .unwrap();
        meeting.start(now).unwrap();
        let seat = Participant::new(meeting.id.clone(), "ada".into(), 1, now);
        store.insert_meeting(&meeting, &[seat]).await.unwrap();

        let roster = store.roster(&meeting.id).await.unwrap();
        let decision: TurnDecision =
            SpeakerScheduler::next_turn(&meeting, &roster, &[], &mut FirstCandidate).unwrap();
        let output = GenerationOutput::new("Offices matter.", "m", TokenUsage::default());
        let commit = StatementRecorder::prepare(&meeting, &decision, &output, None, now);
        store.commit_turn(&commit).await.unwrap();
        meeting.id
    }

    #[tokio::test]
    async fn test_summary_is_parsed_and_stored() {
        let store = Arc::new(TestStore::with_directors(&["Ada"]));
        let id = meeting_with_statement(&store).await;
        let generator = Arc::new(ScriptedGenerator::texts(&[
            "```json\n{\"executive_summary\": \"Hybrid wins.\", \"key_points\": [\"a\"]}\n```",
        ]));
        let uc = SummarizeMeetingUseCase::new(Arc::clone(&store), Arc::clone(&generator));

        let out = uc.execute(&id).await.unwrap();
        assert!(!out.fallback_used);
        assert_eq!(out.summary.executive_summary, "Hybrid wins.");
        assert_eq!(out.transcript_items, 1);
        assert!(generator.last_prompt().prompt.contains("1. Ada (Ada title):\nOffices matter."));

        let stored = store.get_meeting(&id).await.unwrap();
        assert_eq!(stored.summary, Some(out.summary));
        assert_eq!(stored.total_statements, 1);
    }

    #[tokio::test]
    async fn test_malformed_summary_falls_back() {
        let store = Arc::new(TestStore::with_directors(&["Ada"]));
        let id = meeting_with_statement(&store).await;
        let uc = SummarizeMeetingUseCase::new(
            Arc::clone(&store),
            Arc::new(ScriptedGenerator::texts(&["It was a fine meeting."])),
        );

        let out = uc.execute(&id).await.unwrap();
        assert!(out.fallback_used);
        assert!(out.summary.executive_summary.contains("remote work"));
        assert_eq!(out.summary.rating.depth, 7);
    }

    #[tokio::test]
    async fn test_empty_meeting_is_invalid_state() {
        let store = Arc::new(TestStore::with_directors(&["Ada"]));
        let meeting =
            Meeting::new("Board", "AI", DiscussionMode::Free, 2, Utc::now()).unwrap();
        store.insert_meeting(&meeting, &[]).await.unwrap();
        let uc = SummarizeMeetingUseCase::new(store, Arc::new(ScriptedGenerator::default()));
        let err = uc.execute(&meeting.id).await.unwrap_err();
        assert!(err.is_invalid_state());
    }
}
