//! Discussion parameters for the turn pipeline.

use boardroom_domain::conversation::{DEFAULT_QUESTION_LOOKBACK, DEFAULT_WINDOW_SIZE};
use boardroom_domain::{ContextAssembler, SeededTieBreaker};
use serde::{Deserialize, Serialize};

/// Context and tie-break settings shared by every turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionParams {
    /// Statements shown to the speaker
    pub context_window: usize,
    /// Recent questions inspected for preemption
    pub question_lookback: usize,
    /// Fixed seed for `free` mode tie-breaks; entropy when unset
    pub seed: Option<u64>,
}

impl Default for DiscussionParams {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_WINDOW_SIZE,
            question_lookback: DEFAULT_QUESTION_LOOKBACK,
            seed: None,
        }
    }
}

impl DiscussionParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn assembler(&self) -> ContextAssembler {
        ContextAssembler::new(self.context_window, self.question_lookback)
    }

    pub fn tie_breaker(&self) -> SeededTieBreaker {
        SeededTieBreaker::from_optional_seed(self.seed)
    }
}
