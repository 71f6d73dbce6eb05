//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording discussion events
//! (scheduling decisions, generation requests, recorded statements, user
//! questions, summaries) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! meeting transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// Event type identifiers written by the use cases
pub mod events {
    pub const TURN_SCHEDULED: &str = "turn_scheduled";
    pub const GENERATION_REQUEST: &str = "generation_request";
    pub const STATEMENT_RECORDED: &str = "statement_recorded";
    pub const QUESTION_ASKED: &str = "question_asked";
    pub const QUESTION_ANSWERED: &str = "question_answered";
    pub const SUMMARY_GENERATED: &str = "summary_generated";
    pub const DIRECTOR_CREATED: &str = "director_created";
}

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload containing event-specific
/// fields. The adapter adds the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    /// Event type identifier (see [`events`]).
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible; logging failures must
/// not disturb the discussion.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
