//! Create Director use case
//!
//! Drafts a persona from a free-text character prompt and registers it as a
//! director. Unparseable generator output still yields a director named
//! "Unknown Director" whose background is the raw prompt.

use crate::config::BehaviorConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, events,
};
use crate::ports::discussion_store::{DiscussionStore, StoreError};
use crate::ports::text_generator::{GenerationError, TextGenerator};
use crate::use_cases::shared::{CallError, generate_bounded};
use boardroom_domain::{Director, DirectorId, PromptComposer, parse_persona};
use serde::Serialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that can occur while creating a director
#[derive(Error, Debug)]
pub enum CreateDirectorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Director {0} already exists")]
    Duplicate(DirectorId),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Director creation cancelled")]
    Cancelled,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of creating a director
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDirectorOutput {
    pub director: Director,
    /// The persona could not be parsed and defaults were used
    pub fallback_used: bool,
}

/// Use case for drafting and registering a director
pub struct CreateDirectorUseCase<S: DiscussionStore + 'static, G: TextGenerator + 'static> {
    store: Arc<S>,
    generator: Arc<G>,
    behavior: BehaviorConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<S: DiscussionStore + 'static, G: TextGenerator + 'static> CreateDirectorUseCase<S, G> {
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

    /// Draft a director from `character_prompt` and store it.
    ///
    /// An explicit `id` must be unused. Without one the id is a slug of the
    /// drafted name, suffixed with `-2`, `-3`, ... until it is free.
    pub async fn execute(
        &self,
        character_prompt: &str,
        id: Option<DirectorId>,
    ) -> Result<CreateDirectorOutput, CreateDirectorError> {
        if character_prompt.trim().is_empty() {
            return Err(CreateDirectorError::InvalidInput(
                "character prompt must not be empty".into(),
            ));
        }
        let taken: HashSet<DirectorId> = self
            .store
            .list_directors()
            .await?
            .into_iter()
            .map(|d| d.id)
            .collect();
        if let Some(id) = &id {
            if id.as_str().trim().is_empty() {
                return Err(CreateDirectorError::InvalidInput(
                    "director id must not be empty".into(),
                ));
            }
            if taken.contains(id) {
                return Err(CreateDirectorError::Duplicate(id.clone()));
            }
        }

        let request = PromptComposer::default().compose_persona(character_prompt);
        let output = match generate_bounded(
            self.generator.as_ref(),
            &request,
            self.behavior.timeout,
            &self.cancellation_token,
        )
        .await
        {
            Ok(output) => output,
            Err(CallError::Failed(e)) => return Err(CreateDirectorError::Generation(e)),
            Err(CallError::Cancelled) => return Err(CreateDirectorError::Cancelled),
        };

        let parsed = parse_persona(&output.text);
        let fallback_used = parsed.is_fallback();
        if fallback_used {
            warn!("Persona draft was malformed; using default name and title");
        }
        let profile = parsed.into_profile();
        let id = match id {
            Some(id) => id,
            None => free_id(&profile.slug(), &taken),
        };
        let director = profile.into_director(id, character_prompt);

        self.store
            .upsert_directors(std::slice::from_ref(&director))
            .await?;
        info!("Created director {} ({})", director.name, director.id);
        self.conversation_logger.log(ConversationEvent::new(
            events::DIRECTOR_CREATED,
            json!({
                "director_id": director.id,
                "name": director.name,
                "title": director.title,
                "fallback_used": fallback_used,
            }),
        ));

        Ok(CreateDirectorOutput {
            director,
            fallback_used,
        })
    }
}

fn free_id(base: &str, taken: &HashSet<DirectorId>) -> DirectorId {
    let mut candidate = DirectorId::from(base);
    let mut n = 2;
    while taken.contains(&candidate) {
        candidate = DirectorId::from(format!("{base}-{n}"));
        n += 1;
    }
    candidate
}
