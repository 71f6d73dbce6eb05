//! Context window assembly and question preemption.
//!
//! The window is the last few statements in chronological order, each
//! labelled with the speaker's name. Preemption is decided independently:
//! a pending question among the most recent ones reframes the next turn's
//! prompt but has no say in who speaks.

use crate::core::ids::StatementId;
use crate::meeting::{RosterEntry, Statement, UserQuestion};
use serde::{Deserialize, Serialize};

/// Statements kept in the window
pub const DEFAULT_WINDOW_SIZE: usize = 5;
/// Most recent questions inspected for preemption
pub const DEFAULT_QUESTION_LOOKBACK: usize = 3;
/// Label for statements whose author is no longer on the active roster
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// One labelled statement in the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub statement_id: StatementId,
    pub speaker_name: String,
    pub content: String,
}

/// Recent statements, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    pub entries: Vec<ContextEntry>,
}

impl ContextWindow {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `Name: content` blocks separated by blank lines
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.speaker_name, e.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Everything the prompt needs besides the scheduling decision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledContext {
    pub window: ContextWindow,
    /// Question the next turn must answer, if any
    pub preemption: Option<UserQuestion>,
}

impl AssembledContext {
    pub fn is_preempted(&self) -> bool {
        self.preemption.is_some()
    }
}

/// Builds [`AssembledContext`] from store reads
#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    window_size: usize,
    question_lookback: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE, DEFAULT_QUESTION_LOOKBACK)
    }
}

impl ContextAssembler {
    pub fn new(window_size: usize, question_lookback: usize) -> Self {
        Self {
            window_size,
            question_lookback,
        }
    }

    /// Assemble the context.
    ///
    /// `history` and `questions` are both newest first.
    pub fn assemble(
        &self,
        history: &[Statement],
        roster: &[RosterEntry],
        questions: &[UserQuestion],
    ) -> AssembledContext {
        AssembledContext {
            window: self.window(history, roster),
            preemption: self.preemption(questions),
        }
    }

    /// The newest `window_size` statements, reordered oldest first.
    pub fn window(&self, history: &[Statement], roster: &[RosterEntry]) -> ContextWindow {
        let entries = history
            .iter()
            .take(self.window_size)
            .rev()
            .map(|s| ContextEntry {
                statement_id: s.id.clone(),
                speaker_name: roster
                    .iter()
                    .find(|e| e.director_id() == &s.director_id)
                    .map(|e| e.name().to_string())
                    .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string()),
                content: s.content.clone(),
            })
            .collect();
        ContextWindow { entries }
    }

    /// The newest pending question among the last `question_lookback` asked.
    pub fn preemption(&self, questions: &[UserQuestion]) -> Option<UserQuestion> {
        questions
            .iter()
            .take(self.question_lookback)
            .find(|q| q.is_pending())
            .cloned()
    }
}
