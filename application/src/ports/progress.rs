//! Progress notification port
//!
//! Defines the interface for reporting progress while turns and question
//! answers are generated.

use boardroom_domain::{Director, Statement, TurnDecision};

/// Callback for progress updates during a discussion
///
/// Implementations live in the presentation layer (spinners, plain logs).
pub trait TurnProgressNotifier: Send + Sync {
    /// Called once the next speaker is known, before generation starts
    fn on_turn_scheduled(&self, decision: &TurnDecision, director: &Director);

    /// Called when the turn's statement has been committed
    fn on_turn_recorded(&self, statement: &Statement, director: &Director);

    /// Called when a turn fails before commit
    fn on_turn_failed(&self, _director: &Director, _reason: &str) {}

    /// Called when a director starts answering a user question
    fn on_answer_start(&self, _director: &Director) {}

    /// Called when a director finished (or failed) answering a user question
    fn on_answer_complete(&self, _director: &Director, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl TurnProgressNotifier for NoProgress {
    fn on_turn_scheduled(&self, _decision: &TurnDecision, _director: &Director) {}
    fn on_turn_recorded(&self, _statement: &Statement, _director: &Director) {}
}
