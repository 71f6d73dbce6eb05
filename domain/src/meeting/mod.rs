//! Meeting aggregate and the records that hang off it.
//!
//! - [`Meeting`] - one discussion session with its lifecycle status
//! - [`DiscussionMode`] - turn-order policy selector
//! - [`Participant`] / [`Director`] / [`RosterEntry`] - who sits at the table
//! - [`Statement`] / [`UserQuestion`] / [`QuestionResponse`] - append-only history

pub mod entities;
pub mod mode;
pub mod participant;
pub mod statement;

pub use entities::{Meeting, MeetingStatus};
pub use mode::DiscussionMode;
pub use participant::{Director, Participant, RosterEntry};
pub use statement::{QuestionResponse, QuestionStatus, Statement, UserQuestion};
