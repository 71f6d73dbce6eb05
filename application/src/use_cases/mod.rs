//! Use cases (application services)

pub mod advance_turn;
pub mod create_director;
pub mod manage_meeting;
pub mod shared;
pub mod summarize_meeting;
pub mod user_questions;
