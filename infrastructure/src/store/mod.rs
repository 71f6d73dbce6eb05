//! Discussion store adapters
//!
//! Both adapters share [`StoreState`]: the in-memory store for tests and
//! short-lived sessions, the JSON-file store for the CLI.

mod backend;
pub mod json_file;
pub mod memory;
pub mod state;

pub use backend::{Persistence, StateStore};
pub use json_file::JsonFileStore;
pub use memory::InMemoryDiscussionStore;
pub use state::{MeetingRecord, StoreState};
