//! Debate: two sides, alternating, with rebuttals.
//!
//! Sides come from roster parity: even positions argue pro, odd positions
//! argue con. After each statement the scheduler looks for someone on the
//! other side who has not spoken this round; that participant rebuts the
//! latest statement.

use crate::scheduling::context::TurnContext;
use crate::scheduling::decision::TurnDecision;
use crate::scheduling::strategy::TurnStrategy;
use crate::scheduling::tie_breaker::TieBreaker;
use serde::{Deserialize, Serialize};

/// Debate side derived from roster position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Pro,
    Con,
}

impl Side {
    pub fn of(index: usize) -> Self {
        if index % 2 == 0 { Side::Pro } else { Side::Con }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Pro => Side::Con,
            Side::Con => Side::Pro,
        }
    }
}

/// Pro/con alternation with rebuttal links
pub struct DebateStrategy;

impl TurnStrategy for DebateStrategy {
    fn name(&self) -> &'static str {
        "debate"
    }

    fn next_turn(&self, ctx: &TurnContext<'_>, _tie_breaker: &mut dyn TieBreaker) -> TurnDecision {
        let Some(latest) = ctx.latest() else {
            // Pro side opens
            return ctx.continue_round(0);
        };
        if ctx.round_is_full() {
            return ctx.open_next_round(0);
        }

        // An author who left the roster counts as con, so pro answers them.
        let last_side = ctx
            .index_of(&latest.director_id)
            .map(Side::of)
            .unwrap_or(Side::Con);

        if let Some(index) = ctx.first_unspoken(|i| Side::of(i) == last_side.opposite()) {
            return ctx.continue_round(index).rebutting(latest);
        }

        let index = ctx
            .first_unspoken(|i| Side::of(i) == last_side)
            .unwrap_or(0);
        ctx.continue_round(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::DiscussionMode;
    use crate::scheduling::FirstCandidate;
    use crate::scheduling::test_support::Table;

    #[test]
    fn test_side_parity() {
        assert_eq!(Side::of(0), Side::Pro);
        assert_eq!(Side::of(1), Side::Con);
        assert_eq!(Side::of(2), Side::Pro);
        assert_eq!(Side::Pro.opposite(), Side::Con);
    }

    #[test]
    fn test_four_director_opening_exchange() {
        let mut table = Table::new(DiscussionMode::Debate, &["A", "B", "C", "D"]);

        let first = table.decide(&mut FirstCandidate);
        assert_eq!(table.name_of(&first), "A");
        assert!(!first.is_rebuttal);
        let a_statement = table.record(&first);

        let second = table.take_turn(&mut FirstCandidate);
        assert_eq!(table.name_of(&second), "B");
        assert_eq!(second.sequence_in_round, 2);
        assert!(second.is_rebuttal);
        assert_eq!(second.responding_to, Some(a_statement));
    }

    #[test]
    fn test_full_round_alternates_sides() {
        let mut table = Table::new(DiscussionMode::Debate, &["A", "B", "C", "D"]);
        let names: Vec<String> = (0..4)
            .map(|_| {
                let d = table.take_turn(&mut FirstCandidate);
                table.name_of(&d).to_string()
            })
            .collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);

        let next = table.take_turn(&mut FirstCandidate);
        assert_eq!(table.name_of(&next), "A");
        assert_eq!(next.round, 2);
        assert_eq!(next.sequence_in_round, 1);
        assert!(!next.is_rebuttal);
    }

    #[test]
    fn test_rebuttal_targets_previous_turn() {
        let mut table = Table::new(DiscussionMode::Debate, &["A", "B", "C", "D", "E", "F"]);
        let mut previous = None;
        for _ in 0..6 {
            let d = table.decide(&mut FirstCandidate);
            if d.is_rebuttal {
                assert_eq!(d.responding_to, previous);
            }
            previous = Some(table.record(&d));
        }
    }

    #[test]
    fn test_falls_back_to_same_side_when_opponents_spoke() {
        let mut table = Table::new(DiscussionMode::Debate, &["A", "B", "C", "D"]);
        // Pro side (A, C) already spoke, then con B; only con D remains.
        table.record_speaker(0);
        table.record_speaker(2);
        table.record_speaker(1);

        let d = table.decide(&mut FirstCandidate);
        assert_eq!(table.name_of(&d), "D");
        assert_eq!(d.sequence_in_round, 4);
        assert!(!d.is_rebuttal);
        assert!(d.responding_to.is_none());
    }

    #[test]
    fn test_departed_author_is_answered_by_pro() {
        let mut table = Table::new(DiscussionMode::Debate, &["A", "B", "C"]);
        table.record_speaker(1);
        // B leaves the active roster
        table.roster.remove(1);

        let d = table.decide(&mut FirstCandidate);
        assert_eq!(table.name_of(&d), "A");
        assert!(d.is_rebuttal);
        assert_eq!(d.responding_to.as_ref(), Some(&table.history[0].id));
    }

    #[test]
    fn test_single_participant_never_rebuts() {
        let mut table = Table::new(DiscussionMode::Debate, &["A"]);
        for round in 1..=3 {
            let d = table.take_turn(&mut FirstCandidate);
            assert_eq!(d.round, round);
            assert!(!d.is_rebuttal);
        }
    }
}
