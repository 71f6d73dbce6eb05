//! Round robin: strict roster order.

use crate::scheduling::context::TurnContext;
use crate::scheduling::decision::TurnDecision;
use crate::scheduling::strategy::TurnStrategy;
use crate::scheduling::tie_breaker::TieBreaker;

/// Everyone speaks once per round in `join_order`. Never sets a rebuttal.
pub struct RoundRobinStrategy;

impl TurnStrategy for RoundRobinStrategy {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn next_turn(&self, ctx: &TurnContext<'_>, _tie_breaker: &mut dyn TieBreaker) -> TurnDecision {
        if ctx.is_first_turn() {
            return ctx.continue_round(0);
        }
        if ctx.round_is_full() {
            return ctx.open_next_round(0);
        }
        ctx.continue_round(ctx.round_len() % ctx.roster().len())
    }
}
