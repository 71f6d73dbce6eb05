//! Prompt composer.
//!
//! Pure data transformation: no I/O, no generation. Template selection:
//!
//! | Preempted | `is_rebuttal` | Mode | Framing |
//! |-----------|---------------|------|---------|
//! | yes | any | any | [`TurnFraming::QuestionResponse`] |
//! | no | yes (target known) | any | [`TurnFraming::Rebuttal`] |
//! | no | no | debate | [`TurnFraming::Assertion`] |
//! | no | no | other | [`TurnFraming::Continuation`] |

use crate::conversation::AssembledContext;
use crate::meeting::{Director, DiscussionMode, UserQuestion};
use crate::prompt::request::{
    GenerationRequest, PERSONA_MAX_TOKENS, QUESTION_MAX_TOKENS, SUMMARY_MAX_TOKENS, TURN_MAX_TOKENS,
    TurnFraming,
};
use crate::prompt::template::{OPENING_CONTEXT, PromptTemplate};

/// The statement a rebuttal answers, resolved to its speaker's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuttalTarget {
    pub speaker_name: String,
    pub content: String,
}

/// Inputs for one discussion turn prompt
#[derive(Debug, Clone)]
pub struct TurnPromptInput<'a> {
    pub director: &'a Director,
    pub topic: &'a str,
    pub mode: &'a DiscussionMode,
    pub round: u32,
    pub is_rebuttal: bool,
    pub context: &'a AssembledContext,
    pub rebuttal_target: Option<RebuttalTarget>,
}

/// Builds generation requests
#[derive(Debug, Clone, Copy)]
pub struct PromptComposer {
    turn_max_tokens: u32,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self {
            turn_max_tokens: TURN_MAX_TOKENS,
        }
    }
}

impl PromptComposer {
    pub fn with_turn_max_tokens(mut self, max_tokens: u32) -> Self {
        self.turn_max_tokens = max_tokens;
        self
    }

    /// Pick the framing for a turn
    pub fn framing(input: &TurnPromptInput<'_>) -> TurnFraming {
        if input.context.is_preempted() {
            TurnFraming::QuestionResponse
        } else if input.is_rebuttal && input.rebuttal_target.is_some() {
            TurnFraming::Rebuttal
        } else if *input.mode == DiscussionMode::Debate {
            TurnFraming::Assertion
        } else {
            TurnFraming::Continuation
        }
    }

    /// Compose the request for a discussion turn
    pub fn compose_turn(&self, input: &TurnPromptInput<'_>) -> GenerationRequest {
        let framing = Self::framing(input);
        let window = input.context.window.render();
        let discussion = if window.is_empty() {
            OPENING_CONTEXT.to_string()
        } else {
            window
        };

        // The instruction follows the framing, not the raw flag: a rebuttal
        // whose target is gone is composed as an assertion.
        let rebutting = framing == TurnFraming::Rebuttal;
        let mut prompt = format!(
            "{persona}\n\nMeeting topic: {topic}\nDiscussion mode: {mode} - {instruction}\n\n",
            persona = PromptTemplate::persona(input.director),
            topic = input.topic,
            mode = input.mode,
            instruction = PromptTemplate::mode_instruction(input.mode, rebutting, input.round),
        );

        match (&framing, &input.context.preemption, &input.rebuttal_target) {
            (TurnFraming::QuestionResponse, Some(question), _) => {
                prompt.push_str(&Self::question_block(question));
                prompt.push_str(&format!("\n\nEarlier discussion:\n{discussion}\n\n"));
                prompt.push_str(&PromptTemplate::question_requirements(input.mode));
            }
            (TurnFraming::Rebuttal, _, Some(target)) => {
                prompt.push_str(&format!("Discussion so far:\n{discussion}\n\n"));
                prompt.push_str(&PromptTemplate::rebuttal_context(
                    &target.speaker_name,
                    &target.content,
                ));
                prompt.push_str("\n\n");
                prompt.push_str(&PromptTemplate::turn_requirements(input.mode));
            }
            _ => {
                prompt.push_str(&format!("Discussion so far:\n{discussion}\n\n"));
                prompt.push_str(&PromptTemplate::mode_context(input.mode, input.round));
                prompt.push_str("\n\n");
                prompt.push_str(&PromptTemplate::turn_requirements(input.mode));
            }
        }

        GenerationRequest::new(prompt, self.turn_max_tokens).with_framing(framing)
    }

    /// Compose the request for a director answering a user question directly
    pub fn compose_question_answer(
        &self,
        director: &Director,
        question: &UserQuestion,
    ) -> GenerationRequest {
        GenerationRequest::new(
            PromptTemplate::question_answer(director, &question.question),
            QUESTION_MAX_TOKENS,
        )
    }

    /// Compose the request for a meeting summary
    pub fn compose_summary(
        &self,
        title: &str,
        topic: &str,
        participant_names: &[String],
        item_count: usize,
        transcript: &str,
    ) -> GenerationRequest {
        GenerationRequest::new(
            PromptTemplate::summary(title, topic, participant_names, item_count, transcript),
            SUMMARY_MAX_TOKENS,
        )
    }

    /// Compose the request that turns a character prompt into a persona profile
    pub fn compose_persona(&self, character_prompt: &str) -> GenerationRequest {
        GenerationRequest::new(
            PromptTemplate::persona_profile(character_prompt),
            PERSONA_MAX_TOKENS,
        )
    }

    fn question_block(question: &UserQuestion) -> String {
        format!(
            "A user just asked: \"{}\"\nAsked by: {}",
            question.question, question.asker_name
        )
    }
}
