//! Free: the least recently heard speak next.

use crate::scheduling::context::TurnContext;
use crate::scheduling::decision::TurnDecision;
use crate::scheduling::strategy::TurnStrategy;
use crate::scheduling::tie_breaker::TieBreaker;

/// Picks uniformly among the participants with the fewest appearances in
/// the last `roster.len()` statements.
///
/// Rounds here are a pacing signal only: a round closes once it holds 1.5x
/// as many statements as there are participants, so not everyone is
/// guaranteed a turn per round.
pub struct FreeStrategy;

impl FreeStrategy {
    /// Roster positions tied for the lowest recent activity
    pub fn least_active(ctx: &TurnContext<'_>) -> Vec<usize> {
        let window = ctx.roster().len().min(ctx.history().len());
        let counts: Vec<usize> = ctx
            .roster()
            .iter()
            .map(|e| ctx.recent_statements_by(e.director_id(), window))
            .collect();
        let min = counts.iter().copied().min().unwrap_or(0);
        counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == min)
            .map(|(i, _)| i)
            .collect()
    }

    /// `round_len >= 1.5 * roster_len`, in integer arithmetic
    fn round_is_full(ctx: &TurnContext<'_>) -> bool {
        2 * ctx.round_len() >= 3 * ctx.roster().len()
    }
}

impl TurnStrategy for FreeStrategy {
    fn name(&self) -> &'static str {
        "free"
    }

    fn next_turn(&self, ctx: &TurnContext<'_>, tie_breaker: &mut dyn TieBreaker) -> TurnDecision {
        let candidates = Self::least_active(ctx);
        let pick = tie_breaker.pick(candidates.len()).min(candidates.len() - 1);
        let index = candidates[pick];

        if Self::round_is_full(ctx) {
            ctx.open_next_round(index)
        } else {
            ctx.continue_round(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::DiscussionMode;
    use crate::scheduling::SeededTieBreaker;
    use crate::scheduling::test_support::Table;
    use proptest::prelude::*;

    #[test]
    fn test_round_closes_at_one_and_a_half_roster() {
        let mut table = Table::new(DiscussionMode::Free, &["A", "B"]);
        let mut tb = SeededTieBreaker::from_seed(1);
        // Two participants: 3 statements fill a round
        let rounds: Vec<(u32, u32)> = (0..7)
            .map(|_| {
                let d = table.take_turn(&mut tb);
                (d.round, d.sequence_in_round)
            })
            .collect();
        assert_eq!(
            rounds,
            vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3), (3, 1)]
        );
    }

    #[test]
    fn test_fractional_threshold_rounds_up() {
        // Three participants: 4.5 -> the round closes after 5 statements
        let mut table = Table::new(DiscussionMode::Free, &["A", "B", "C"]);
        let mut tb = SeededTieBreaker::from_seed(9);
        for seq in 1..=5 {
            let d = table.take_turn(&mut tb);
            assert_eq!((d.round, d.sequence_in_round), (1, seq));
        }
        let d = table.take_turn(&mut tb);
        assert_eq!((d.round, d.sequence_in_round), (2, 1));
    }

    #[test]
    fn test_silent_participant_is_preferred() {
        let mut table = Table::new(DiscussionMode::Free, &["A", "B", "C"]);
        table.record_speaker(0);
        table.record_speaker(1);
        let mut tb = SeededTieBreaker::from_seed(3);
        let d = table.decide(&mut tb);
        assert_eq!(table.name_of(&d), "C");
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let run = |seed| {
            let mut table = Table::new(DiscussionMode::Free, &["A", "B", "C", "D"]);
            let mut tb = SeededTieBreaker::from_seed(seed);
            (0..12)
                .map(|_| {
                    let d = table.take_turn(&mut tb);
                    d.speaker_index
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    proptest! {
        #[test]
        fn never_picks_above_minimum_activity(
            roster_size in 1usize..6,
            speakers in proptest::collection::vec(0usize..6, 0..30),
            seed in any::<u64>(),
        ) {
            let names: Vec<String> = (0..roster_size).map(|i| format!("D{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut table = Table::new(DiscussionMode::Free, &refs);
            for s in speakers {
                table.record_speaker(s % roster_size);
            }

            let mut tb = SeededTieBreaker::from_seed(seed);
            let decision = table.decide(&mut tb);

            let window = roster_size.min(table.history.len());
            let recent = |idx: usize| {
                table.history[..window]
                    .iter()
                    .filter(|s| &s.director_id == table.roster[idx].director_id())
                    .count()
            };
            let min = (0..roster_size).map(recent).min().unwrap();
            prop_assert_eq!(recent(decision.speaker_index), min);
        }
    }
}
