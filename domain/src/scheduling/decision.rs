//! Output of one scheduling decision.

use crate::core::ids::{DirectorId, StatementId};
use crate::meeting::Statement;
use serde::{Deserialize, Serialize};

/// Who speaks next and where the statement lands (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnDecision {
    /// Position of the speaker in the ordered active roster
    pub speaker_index: usize,
    pub director_id: DirectorId,
    pub round: u32,
    /// 1-based position inside `round`
    pub sequence_in_round: u32,
    pub is_rebuttal: bool,
    /// The statement being rebutted; set only when `is_rebuttal` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responding_to: Option<StatementId>,
}

impl TurnDecision {
    pub(crate) fn new(
        speaker_index: usize,
        director_id: DirectorId,
        round: u32,
        sequence_in_round: u32,
    ) -> Self {
        Self {
            speaker_index,
            director_id,
            round,
            sequence_in_round,
            is_rebuttal: false,
            responding_to: None,
        }
    }

    /// Frame this turn as a rebuttal of `target`.
    pub(crate) fn rebutting(mut self, target: &Statement) -> Self {
        self.is_rebuttal = true;
        self.responding_to = Some(target.id.clone());
        self
    }
}
