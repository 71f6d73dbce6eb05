//! Speaker scheduling.
//!
//! Given a meeting, its ordered active roster and the statement history
//! (newest first), the scheduler decides who speaks next, in which round,
//! at which position, and whether the statement is a rebuttal.
//!
//! Each [`DiscussionMode`](crate::meeting::DiscussionMode) maps to one
//! [`TurnStrategy`]:
//!
//! | Mode | Strategy | Round is full when |
//! |------|----------|--------------------|
//! | `round_robin` | [`RoundRobinStrategy`] | every participant spoke once |
//! | `debate` | [`DebateStrategy`] | every participant spoke once |
//! | `focus` | [`FocusStrategy`] | every participant spoke once |
//! | `free` | [`FreeStrategy`] | 1.5x the roster size spoke |
//!
//! Unrecognized modes fall back to round robin so scheduling is total.

pub mod context;
pub mod debate;
pub mod decision;
pub mod focus;
pub mod free;
pub mod round_robin;
pub mod scheduler;
pub mod strategy;
pub mod tie_breaker;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::TurnContext;
pub use debate::{DebateStrategy, Side};
pub use decision::TurnDecision;
pub use focus::FocusStrategy;
pub use free::FreeStrategy;
pub use round_robin::RoundRobinStrategy;
pub use scheduler::SpeakerScheduler;
pub use strategy::{TurnStrategy, strategy_for};
pub use tie_breaker::{FirstCandidate, SeededTieBreaker, TieBreaker};
