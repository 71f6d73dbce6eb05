//! Meeting entity and lifecycle.

use crate::core::error::DomainError;
use crate::core::ids::MeetingId;
use crate::meeting::mode::DiscussionMode;
use crate::summary::MeetingSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default round budget for new meetings
pub const DEFAULT_MAX_ROUNDS: u32 = 10;

/// Lifecycle status of a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    /// Created, roster assembled, not started yet
    Preparing,
    /// Turns are being generated
    Discussing,
    /// Turns are being generated (debate-mode meetings)
    Debating,
    /// Terminal: the discussion ended normally
    Completed,
    /// Terminal: the discussion was abandoned
    Cancelled,
}

impl MeetingStatus {
    /// Statuses in which turns may be advanced
    pub fn is_active(&self) -> bool {
        matches!(self, MeetingStatus::Discussing | MeetingStatus::Debating)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MeetingStatus::Completed | MeetingStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Preparing => "preparing",
            MeetingStatus::Discussing => "discussing",
            MeetingStatus::Debating => "debating",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discussion session (Entity)
///
/// `current_round` starts at 0, becomes 1 on start, and afterwards only
/// moves when a turn commit advances it. `total_statements` mirrors the
/// number of persisted statements and doubles as the optimistic
/// concurrency token for turn commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub topic: String,
    pub status: MeetingStatus,
    pub discussion_mode: DiscussionMode,
    pub current_round: u32,
    pub max_rounds: u32,
    pub total_statements: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<MeetingSummary>,
}

impl Meeting {
    /// Create a meeting in the `preparing` status.
    ///
    /// Title and topic must be non-blank. A `max_rounds` of 0 falls back to
    /// [`DEFAULT_MAX_ROUNDS`].
    pub fn new(
        title: impl Into<String>,
        topic: impl Into<String>,
        mode: DiscussionMode,
        max_rounds: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let topic = topic.into();
        if title.trim().is_empty() {
            return Err(DomainError::InvalidInput("title is required".into()));
        }
        if topic.trim().is_empty() {
            return Err(DomainError::InvalidInput("topic is required".into()));
        }

        Ok(Self {
            id: MeetingId::generate(),
            title,
            description: String::new(),
            topic,
            status: MeetingStatus::Preparing,
            discussion_mode: mode,
            current_round: 0,
            max_rounds: if max_rounds == 0 {
                DEFAULT_MAX_ROUNDS
            } else {
                max_rounds
            },
            total_statements: 0,
            created_at: now,
            started_at: None,
            ended_at: None,
            summary: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Move from `preparing` into the active status for this mode and open round 1.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        let target = if self.discussion_mode == DiscussionMode::Debate {
            MeetingStatus::Debating
        } else {
            MeetingStatus::Discussing
        };
        if self.status != MeetingStatus::Preparing {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.current_round = 1;
        self.started_at = Some(now);
        Ok(())
    }

    /// Close an active meeting.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.status.is_active() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: MeetingStatus::Completed,
            });
        }
        self.status = MeetingStatus::Completed;
        self.ended_at = Some(now);
        Ok(())
    }

    /// Fail with [`DomainError::InvalidState`] unless turns may be advanced.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(DomainError::InvalidState(self.status))
        }
    }
}
