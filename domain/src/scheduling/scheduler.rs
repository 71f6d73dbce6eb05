//! Speaker scheduler entry point.

use crate::core::error::DomainError;
use crate::meeting::{Meeting, RosterEntry, Statement};
use crate::scheduling::context::TurnContext;
use crate::scheduling::decision::TurnDecision;
use crate::scheduling::strategy::strategy_for;
use crate::scheduling::tie_breaker::TieBreaker;

/// Decides the next turn of a meeting.
///
/// Stateless: everything is derived from the arguments, so the result can
/// be recomputed from the store at any time.
pub struct SpeakerScheduler;

impl SpeakerScheduler {
    /// Compute the next turn.
    ///
    /// `roster` holds the active participants ordered by `join_order`;
    /// `history` holds every statement of the meeting ordered by
    /// `(round_number desc, sequence_in_round desc)`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidState`] if the meeting is not discussing or debating
    /// - [`DomainError::NoParticipants`] if the roster is empty
    pub fn next_turn(
        meeting: &Meeting,
        roster: &[RosterEntry],
        history: &[Statement],
        tie_breaker: &mut dyn TieBreaker,
    ) -> Result<TurnDecision, DomainError> {
        meeting.ensure_active()?;
        if roster.is_empty() {
            return Err(DomainError::NoParticipants);
        }

        let ctx = TurnContext::new(meeting.current_round, roster, history);
        let strategy = strategy_for(&meeting.discussion_mode);
        Ok(strategy.next_turn(&ctx, tie_breaker))
    }
}
