//! Aggregate repair from the statement history.

use crate::meeting::{Meeting, Participant, Statement};
use serde::{Deserialize, Serialize};

/// What [`reconcile`] had to fix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub meeting_fixed: bool,
    pub participants_fixed: usize,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        !self.meeting_fixed && self.participants_fixed == 0
    }
}

/// Recompute meeting and participant aggregates from `statements`.
///
/// `total_statements` becomes the statement count and `current_round` is
/// raised to the highest persisted round (it is never lowered, since a
/// freshly started meeting sits in round 1 with no statements).
pub fn reconcile(
    meeting: &mut Meeting,
    participants: &mut [Participant],
    statements: &[Statement],
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    let total = statements.len() as u32;
    let max_round = statements.iter().map(|s| s.round_number).max();
    let round = max_round.map_or(meeting.current_round, |r| r.max(meeting.current_round));
    if meeting.total_statements != total || meeting.current_round != round {
        meeting.total_statements = total;
        meeting.current_round = round;
        report.meeting_fixed = true;
    }

    for participant in participants.iter_mut() {
        let spoken: Vec<&Statement> = statements
            .iter()
            .filter(|s| s.director_id == participant.director_id)
            .collect();
        let count = spoken.len() as u32;
        let last = spoken.iter().map(|s| s.created_at).max();
        if participant.statements_count != count || participant.last_statement_at != last {
            participant.statements_count = count;
            participant.last_statement_at = last;
            report.participants_fixed += 1;
        }
    }

    report
}
