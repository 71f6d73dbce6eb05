//! Meeting summary: transcript building and tolerant result parsing.

pub mod parsing;
pub mod transcript;

pub use parsing::{
    MeetingSummary, ParticipantHighlight, SummaryParse, SummaryRating, parse_summary,
};
pub use transcript::{Transcript, TranscriptItem};
