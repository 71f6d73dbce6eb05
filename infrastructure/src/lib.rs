//! Infrastructure layer for boardroom
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod generation;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDirectorConfig, FileDiscussionConfig,
    FileGenerationConfig, FileLoggingConfig, FileStoreConfig,
};
pub use generation::AnthropicGenerator;
pub use logging::JsonlConversationLogger;
pub use store::{InMemoryDiscussionStore, JsonFileStore, StoreState};
