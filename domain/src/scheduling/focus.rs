//! Focus: layered deep-dive.

use crate::scheduling::context::TurnContext;
use crate::scheduling::decision::TurnDecision;
use crate::scheduling::strategy::TurnStrategy;
use crate::scheduling::tie_breaker::TieBreaker;

/// Within a round, the first participant (roster order) who has not spoken.
/// A new round opens with whoever has spoken least over the whole meeting,
/// earliest `join_order` winning ties.
pub struct FocusStrategy;

impl FocusStrategy {
    fn least_heard(ctx: &TurnContext<'_>) -> usize {
        // min_by_key keeps the first minimum, so roster order breaks ties
        ctx.roster()
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| ctx.total_statements_by(e.director_id()))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

impl TurnStrategy for FocusStrategy {
    fn name(&self) -> &'static str {
        "focus"
    }

    fn next_turn(&self, ctx: &TurnContext<'_>, _tie_breaker: &mut dyn TieBreaker) -> TurnDecision {
        if ctx.is_first_turn() {
            return ctx.continue_round(0);
        }
        if ctx.round_is_full() {
            return ctx.open_next_round(Self::least_heard(ctx));
        }
        let index = ctx.first_unspoken(|_| true).unwrap_or(0);
        ctx.continue_round(index)
    }
}
