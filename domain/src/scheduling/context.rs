//! Read-only view of the scheduling inputs.

use crate::core::ids::DirectorId;
use crate::meeting::{RosterEntry, Statement};
use crate::scheduling::decision::TurnDecision;

/// Scheduling inputs plus the derived "current round" slice.
///
/// `history` is newest first. `roster` is non-empty and ordered by
/// `join_order`.
pub struct TurnContext<'a> {
    roster: &'a [RosterEntry],
    history: &'a [Statement],
    current_round: u32,
    current: Vec<&'a Statement>,
}

impl<'a> TurnContext<'a> {
    pub fn new(current_round: u32, roster: &'a [RosterEntry], history: &'a [Statement]) -> Self {
        let current = history
            .iter()
            .filter(|s| s.round_number == current_round)
            .collect();
        Self {
            roster,
            history,
            current_round,
            current,
        }
    }

    pub fn roster(&self) -> &'a [RosterEntry] {
        self.roster
    }

    pub fn history(&self) -> &'a [Statement] {
        self.history
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Number of statements already made in the current round
    pub fn round_len(&self) -> usize {
        self.current.len()
    }

    /// No statement has ever been made in this meeting
    pub fn is_first_turn(&self) -> bool {
        self.history.is_empty()
    }

    /// Every active participant has spoken once in the current round
    pub fn round_is_full(&self) -> bool {
        self.current.len() >= self.roster.len()
    }

    /// Most recent statement of the meeting
    pub fn latest(&self) -> Option<&'a Statement> {
        self.history.first()
    }

    /// Roster position of a director, if they are active
    pub fn index_of(&self, director_id: &DirectorId) -> Option<usize> {
        self.roster.iter().position(|e| e.director_id() == director_id)
    }

    pub fn has_spoken_this_round(&self, director_id: &DirectorId) -> bool {
        self.current.iter().any(|s| &s.director_id == director_id)
    }

    /// First roster position (in order) that has not spoken this round and
    /// satisfies `filter`.
    pub fn first_unspoken(&self, filter: impl Fn(usize) -> bool) -> Option<usize> {
        self.roster
            .iter()
            .enumerate()
            .find(|(i, e)| filter(*i) && !self.has_spoken_this_round(e.director_id()))
            .map(|(i, _)| i)
    }

    /// Statements made by a director across the whole meeting
    pub fn total_statements_by(&self, director_id: &DirectorId) -> usize {
        self.history
            .iter()
            .filter(|s| &s.director_id == director_id)
            .count()
    }

    /// Statements made by a director among the `window` most recent ones
    pub fn recent_statements_by(&self, director_id: &DirectorId, window: usize) -> usize {
        self.history
            .iter()
            .take(window)
            .filter(|s| &s.director_id == director_id)
            .count()
    }

    /// Speaker at `index` takes the next slot of the current round.
    pub fn continue_round(&self, index: usize) -> TurnDecision {
        TurnDecision::new(
            index,
            self.roster[index].director_id().clone(),
            self.current_round,
            self.current.len() as u32 + 1,
        )
    }

    /// Speaker at `index` opens the following round.
    pub fn open_next_round(&self, index: usize) -> TurnDecision {
        TurnDecision::new(
            index,
            self.roster[index].director_id().clone(),
            self.current_round + 1,
            1,
        )
    }
}
