//! Strategy trait shared by all discussion modes.

use crate::meeting::DiscussionMode;
use crate::scheduling::context::TurnContext;
use crate::scheduling::debate::DebateStrategy;
use crate::scheduling::decision::TurnDecision;
use crate::scheduling::focus::FocusStrategy;
use crate::scheduling::free::FreeStrategy;
use crate::scheduling::round_robin::RoundRobinStrategy;
use crate::scheduling::tie_breaker::TieBreaker;

/// Turn-order policy for one discussion mode
///
/// Implementations are pure: the same context and tie-break choices always
/// produce the same decision. The roster in `ctx` is never empty.
pub trait TurnStrategy: Send + Sync {
    /// Mode name, for logs
    fn name(&self) -> &'static str;

    /// Compute the next turn
    fn next_turn(&self, ctx: &TurnContext<'_>, tie_breaker: &mut dyn TieBreaker) -> TurnDecision;
}

/// Strategy for a mode. Unrecognized modes get round robin.
pub fn strategy_for(mode: &DiscussionMode) -> &'static dyn TurnStrategy {
    match mode {
        DiscussionMode::RoundRobin | DiscussionMode::Other(_) => &RoundRobinStrategy,
        DiscussionMode::Debate => &DebateStrategy,
        DiscussionMode::Focus => &FocusStrategy,
        DiscussionMode::Free => &FreeStrategy,
    }
}
