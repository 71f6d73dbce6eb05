//! Domain error types

use crate::meeting::MeetingStatus;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Meeting is not in an active discussion status (status: {0})")]
    InvalidState(MeetingStatus),

    #[error("Meeting has no active participants")]
    NoParticipants,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Meeting cannot transition from {from} to {to}")]
    InvalidTransition { from: MeetingStatus, to: MeetingStatus },
}

impl DomainError {
    /// Check if this error is caused by the meeting's lifecycle status
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidState(_) | DomainError::InvalidTransition { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_display() {
        let error = DomainError::InvalidState(MeetingStatus::Preparing);
        assert_eq!(
            error.to_string(),
            "Meeting is not in an active discussion status (status: preparing)"
        );
    }

    #[test]
    fn test_is_state_error() {
        assert!(DomainError::InvalidState(MeetingStatus::Completed).is_state_error());
        assert!(
            DomainError::InvalidTransition {
                from: MeetingStatus::Completed,
                to: MeetingStatus::Discussing,
            }
            .is_state_error()
        );
        assert!(!DomainError::NoParticipants.is_state_error());
        assert!(!DomainError::InvalidInput("title".into()).is_state_error());
    }
}
