//! Conversation context for the next turn.

pub mod assembler;

pub use assembler::{
    AssembledContext, ContextAssembler, ContextEntry, ContextWindow, DEFAULT_QUESTION_LOOKBACK,
    DEFAULT_WINDOW_SIZE, UNKNOWN_SPEAKER,
};
