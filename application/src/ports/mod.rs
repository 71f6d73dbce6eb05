//! Port definitions (interfaces for external adapters)
//!
//! Ports define the boundaries between the application and infrastructure layers.

pub mod conversation_logger;
pub mod discussion_store;
pub mod progress;
pub mod text_generator;
