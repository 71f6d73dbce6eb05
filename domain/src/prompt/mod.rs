//! Prompt composition for the generation collaborator.
//!
//! - [`PromptTemplate`] - fixed text blocks (persona framing, mode instructions)
//! - [`PromptComposer`] - turns scheduling output and context into a [`GenerationRequest`]

pub mod composer;
pub mod request;
pub mod template;

pub use composer::{PromptComposer, RebuttalTarget, TurnPromptInput};
pub use request::{
    GenerationOutput, GenerationRequest, PERSONA_MAX_TOKENS, QUESTION_MAX_TOKENS,
    SUMMARY_MAX_TOKENS, TURN_MAX_TOKENS, TokenUsage, TurnFraming,
};
pub use template::PromptTemplate;
