//! Directors and their seats in a meeting.

use crate::core::ids::{DirectorId, MeetingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persona that takes part in discussions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub id: DirectorId,
    pub name: String,
    pub title: String,
    /// Persona framing: history, values, speaking style
    #[serde(default)]
    pub background: String,
}

impl Director {
    pub fn new(
        id: impl Into<DirectorId>,
        name: impl Into<String>,
        title: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: title.into(),
            background: background.into(),
        }
    }
}

/// A director's seat in one meeting
///
/// `join_order` is 1-based and never changes once assigned; it is the
/// canonical roster order. Inactive participants keep their seat but are
/// skipped by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub meeting_id: MeetingId,
    pub director_id: DirectorId,
    pub join_order: u32,
    pub is_active: bool,
    pub statements_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_statement_at: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(
        meeting_id: MeetingId,
        director_id: DirectorId,
        join_order: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            meeting_id,
            director_id,
            join_order,
            is_active: true,
            statements_count: 0,
            last_statement_at: None,
            joined_at: now,
        }
    }
}

/// An active participant joined with its director profile.
///
/// Rosters handed to the scheduler are slices of these, sorted by
/// `join_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub participant: Participant,
    pub director: Director,
}

impl RosterEntry {
    pub fn new(participant: Participant, director: Director) -> Self {
        Self {
            participant,
            director,
        }
    }

    pub fn director_id(&self) -> &DirectorId {
        &self.director.id
    }

    pub fn name(&self) -> &str {
        &self.director.name
    }
}
