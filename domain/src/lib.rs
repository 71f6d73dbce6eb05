//! Domain layer for boardroom
//!
//! This crate contains the discussion rules: entities, scheduling, context
//! assembly, prompt composition and statement recording. It performs no I/O
//! and has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Meeting
//!
//! A meeting seats a roster of directors (personas) around one topic. Each
//! turn one director speaks; the [`DiscussionMode`] decides who:
//!
//! - **Round robin** (default): fixed seat order, one statement per round each
//! - **Debate**: alternating sides with rebuttals
//! - **Focus**: the least heard director speaks next
//! - **Free**: random pick among the least active, 1.5 statements per seat per round
//!
//! ## Turn
//!
//! A turn is scheduled ([`SpeakerScheduler`]), framed ([`ContextAssembler`],
//! [`PromptComposer`]) and persisted atomically ([`TurnCommit`]). A pending
//! user question among the latest ones preempts the next turn's framing.

pub mod conversation;
pub mod core;
pub mod meeting;
pub mod persona;
pub mod prompt;
pub mod recording;
pub mod scheduling;
pub mod summary;

// Re-export commonly used types
pub use conversation::{AssembledContext, ContextAssembler, ContextEntry, ContextWindow};
pub use core::{
    error::DomainError,
    ids::{DirectorId, MeetingId, QuestionId, StatementId},
};
pub use meeting::{
    Director, DiscussionMode, Meeting, MeetingStatus, Participant, QuestionResponse,
    QuestionStatus, RosterEntry, Statement, UserQuestion,
};
pub use persona::{PersonaParse, PersonaProfile, parse_persona};
pub use prompt::{
    GenerationOutput, GenerationRequest, PromptComposer, RebuttalTarget, TokenUsage,
    TurnFraming, TurnPromptInput,
};
pub use recording::{
    CommitRejection, ReconcileReport, StatementRecorder, TurnCommit, reconcile,
};
pub use scheduling::{
    FirstCandidate, SeededTieBreaker, SpeakerScheduler, TieBreaker, TurnDecision, TurnStrategy,
    strategy_for,
};
pub use summary::{
    MeetingSummary, ParticipantHighlight, SummaryParse, SummaryRating, Transcript,
    TranscriptItem, parse_summary,
};
