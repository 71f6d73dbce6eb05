//! Direct answers to user questions
//!
//! Questions are recorded by [`ManageMeetingUseCase::ask`] and stay
//! `pending`. The next discussion turn picks up the newest pending one as a
//! reframing; [`UserQuestionUseCase::respond`] instead asks every active
//! director for a short direct answer.
//!
//! [`ManageMeetingUseCase::ask`]: crate::use_cases::manage_meeting::ManageMeetingUseCase::ask

use crate::config::BehaviorConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, events,
};
use crate::ports::discussion_store::DiscussionStore;
use crate::ports::progress::{NoProgress, TurnProgressNotifier};
use crate::ports::text_generator::TextGenerator;
use crate::use_cases::manage_meeting::{AnsweredQuestion, MeetingError};
use crate::use_cases::shared::{CallError, generate_bounded};
use boardroom_domain::{MeetingId, PromptComposer, QuestionId, QuestionResponse};
use chrono::Utc;
use futures::future::join_all;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for answering user questions
pub struct UserQuestionUseCase<S: DiscussionStore + 'static, G: TextGenerator + 'static> {
    store: Arc<S>,
    generator: Arc<G>,
    behavior: BehaviorConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<S: DiscussionStore + 'static, G: TextGenerator + 'static> UserQuestionUseCase<S, G> {
    pub fn new(store: Arc<S>, generator: Arc<G>) -> Self {
        Self {
            store,
            generator,
            behavior: BehaviorConfig::default(),
            conversation_logger: Arc::new(NoConversationLogger),
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

    /// Have every active director answer with default (no-op) progress
    pub async fn respond(
        &self,
        meeting_id: &MeetingId,
        question_id: &QuestionId,
    ) -> Result<AnsweredQuestion, MeetingError> {
        self.respond_with_progress(meeting_id, question_id, &NoProgress)
            .await
    }

    /// Have every active director answer the question directly.
    ///
    /// Answers are generated concurrently and stored in roster order.
    /// Individual failures are skipped; the question is marked answered
    /// afterwards regardless.
    pub async fn respond_with_progress(
        &self,
        meeting_id: &MeetingId,
        question_id: &QuestionId,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<AnsweredQuestion, MeetingError> {
        let question = self.store.get_question(meeting_id, question_id).await?;
        if !question.is_pending() {
            return Err(MeetingError::InvalidInput(format!(
                "question {question_id} was already answered"
            )));
        }

        let roster: Vec<_> = self
            .store
            .roster(meeting_id)
            .await?
            .into_iter()
            .filter(|e| e.participant.is_active)
            .collect();
        if roster.is_empty() {
            return Err(MeetingError::NoParticipants);
        }

        let composer = PromptComposer::default();
        let answers = join_all(roster.iter().map(|entry| {
            let request = composer.compose_question_answer(&entry.director, &question);
            async move {
                progress.on_answer_start(&entry.director);
                let result = generate_bounded(
                    self.generator.as_ref(),
                    &request,
                    self.behavior.timeout,
                    &None,
                )
                .await;
                progress.on_answer_complete(&entry.director, result.is_ok());
                result
            }
        }))
        .await;

        let now = Utc::now();
        let mut responses = Vec::new();
        for (index, (entry, answer)) in roster.iter().zip(answers).enumerate() {
            match answer {
                Ok(output) => responses.push(QuestionResponse {
                    id: format!("{}-{}", question.id, index + 1),
                    question_id: question.id.clone(),
                    director_id: entry.director.id.clone(),
                    content: output.text.trim().to_string(),
                    response_order: index as u32 + 1,
                    tokens_used: output.usage.output_tokens,
                    created_at: now,
                }),
                Err(CallError::Failed(e)) => {
                    warn!("{} could not answer: {}", entry.director.name, e);
                }
                Err(CallError::Cancelled) => {}
            }
        }

        self.store
            .record_question_responses(meeting_id, &question.id, &responses, now)
            .await?;
        info!(
            "Question {} answered by {}/{} directors",
            question.id,
            responses.len(),
            roster.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            events::QUESTION_ANSWERED,
            json!({
                "meeting_id": meeting_id,
                "question_id": question.id,
                "responses": responses
                    .iter()
                    .map(|r| json!({"director_id": r.director_id, "content": r.content}))
                    .collect::<Vec<_>>(),
            }),
        ));

        let question = self.store.get_question(meeting_id, question_id).await?;
        Ok(AnsweredQuestion {
            question,
            responses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::text_generator::GenerationError;
    use crate::use_cases::manage_meeting::ManageMeetingUseCase;
    use crate::use_cases::shared::test_support::{Reply, ScriptedGenerator, TestStore};
    use boardroom_domain::{DiscussionMode, Meeting, Participant};

    async fn seeded(names: &[&str]) -> (Arc<TestStore>, MeetingId) {
        let store = Arc::new(TestStore::with_directors(names));
        let now = Utc::now();
        let meeting = Meeting::new("Board", "AI", DiscussionMode::RoundRobin, 2, now).unwrap();
        let seats: Vec<Participant> = names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                Participant::new(meeting.id.clone(), n.to_lowercase().into(), i as u32 + 1, now)
            })
            .collect();
        store.insert_meeting(&meeting, &seats).await.unwrap();
        (store, meeting.id)
    }

    #[tokio::test]
    async fn test_respond_skips_failures() {
        let (store, id) = seeded(&["Ada", "Ben", "Cy"]).await;
        let generator = ScriptedGenerator::new(vec![
            Reply::Text("Ada's answer".into()),
            Reply::Fail(GenerationError::RateLimited("busy".into())),
            Reply::Text("Cy's answer".into()),
        ]);
        let uc = UserQuestionUseCase::new(Arc::clone(&store), Arc::new(generator));
        let manage = ManageMeetingUseCase::new(Arc::clone(&store));
        let q = manage.ask(&id, "Why?", Some("Eve".into())).await.unwrap();

        let answered = uc.respond(&id, &q.id).await.unwrap();
        let got: Vec<(&str, u32)> = answered
            .responses
            .iter()
            .map(|r| (r.director_id.as_str(), r.response_order))
            .collect();
        assert_eq!(got, vec![("ada", 1), ("cy", 3)]);
        assert!(!answered.question.is_pending());
        assert!(manage.pending(&id).await.unwrap().is_empty());

        let err = uc.respond(&id, &q.id).await.unwrap_err();
        assert!(matches!(err, MeetingError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_respond_requires_active_roster() {
        let (store, id) = seeded(&["Ada"]).await;
        store.deactivate("ada");
        let generator = Arc::new(ScriptedGenerator::default());
        let uc = UserQuestionUseCase::new(Arc::clone(&store), generator);
        let q = ManageMeetingUseCase::new(Arc::clone(&store))
            .ask(&id, "Why?", None)
            .await
            .unwrap();
        assert!(matches!(
            uc.respond(&id, &q.id).await.unwrap_err(),
            MeetingError::NoParticipants
        ));
    }

    #[tokio::test]
    async fn test_respond_missing_question() {
        let (store, id) = seeded(&["Ada"]).await;
        let uc = UserQuestionUseCase::new(store, Arc::new(ScriptedGenerator::default()));
        let err = uc.respond(&id, &QuestionId::from("nope")).await.unwrap_err();
        assert!(matches!(err, MeetingError::NotFound { entity: "question", .. }));
    }
}
