//! In-memory meeting table for scheduler tests.

use crate::core::ids::{DirectorId, StatementId};
use crate::meeting::{Director, DiscussionMode, Meeting, Participant, RosterEntry, Statement};
use crate::scheduling::context::TurnContext;
use crate::scheduling::decision::TurnDecision;
use crate::scheduling::scheduler::SpeakerScheduler;
use crate::scheduling::tie_breaker::TieBreaker;
use chrono::Utc;

pub(crate) fn roster(meeting: &Meeting, names: &[&str]) -> Vec<RosterEntry> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let id = DirectorId::from(name.to_lowercase());
            RosterEntry::new(
                Participant::new(meeting.id.clone(), id.clone(), i as u32 + 1, Utc::now()),
                Director::new(id, *name, format!("Director {name}"), ""),
            )
        })
        .collect()
}

/// A started meeting whose history grows as turns are taken.
pub(crate) struct Table {
    pub meeting: Meeting,
    pub roster: Vec<RosterEntry>,
    /// Newest first
    pub history: Vec<Statement>,
}

impl Table {
    pub fn new(mode: DiscussionMode, names: &[&str]) -> Self {
        let mut meeting = Meeting::new("Board", "Topic", mode, 10, Utc::now()).unwrap();
        meeting.start(Utc::now()).unwrap();
        let roster = roster(&meeting, names);
        Self {
            meeting,
            roster,
            history: Vec::new(),
        }
    }

    pub fn decide(&self, tie_breaker: &mut dyn TieBreaker) -> TurnDecision {
        SpeakerScheduler::next_turn(&self.meeting, &self.roster, &self.history, tie_breaker)
            .unwrap()
    }

    /// Persist a decision the way a turn commit would.
    pub fn record(&mut self, decision: &TurnDecision) -> StatementId {
        let statement = Statement {
            id: StatementId::generate(),
            meeting_id: self.meeting.id.clone(),
            director_id: decision.director_id.clone(),
            round_number: decision.round,
            sequence_in_round: decision.sequence_in_round,
            response_to: decision.responding_to.clone(),
            content: format!("statement {}", self.history.len() + 1),
            tokens_used: 0,
            model: None,
            created_at: Utc::now(),
        };
        let id = statement.id.clone();
        self.history.insert(0, statement);
        self.meeting.current_round = decision.round;
        self.meeting.total_statements += 1;
        id
    }

    /// Record a statement by the participant at `index` in the current round.
    pub fn record_speaker(&mut self, index: usize) -> StatementId {
        let decision =
            TurnContext::new(self.meeting.current_round, &self.roster, &self.history)
                .continue_round(index);
        self.record(&decision)
    }

    pub fn take_turn(&mut self, tie_breaker: &mut dyn TieBreaker) -> TurnDecision {
        let decision = self.decide(tie_breaker);
        self.record(&decision);
        decision
    }

    pub fn name_of(&self, decision: &TurnDecision) -> &str {
        self.roster[decision.speaker_index].name()
    }
}
