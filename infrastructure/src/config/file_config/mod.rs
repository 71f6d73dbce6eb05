//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types at
//! the edge.

mod directors;
mod discussion;
mod generation;
mod logging;
mod store;

pub use directors::FileDirectorConfig;
pub use discussion::FileDiscussionConfig;
pub use generation::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, FileGenerationConfig,
};
pub use logging::FileLoggingConfig;
pub use store::FileStoreConfig;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Problems found by [`FileConfig::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("generation.model must not be empty")]
    EmptyModel,

    #[error("generation.turn_max_tokens must be greater than 0")]
    ZeroTurnTokens,

    #[error("discussion.context_window must be greater than 0")]
    ZeroContextWindow,

    #[error("directors[{index}]: {field} must not be empty")]
    EmptyDirectorField { index: usize, field: &'static str },

    #[error("director id '{0}' is defined more than once")]
    DuplicateDirector(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Text-generation collaborator settings
    pub generation: FileGenerationConfig,
    /// Context window and tie-break settings
    pub discussion: FileDiscussionConfig,
    /// Where meetings are persisted
    pub store: FileStoreConfig,
    /// Diagnostic and conversation logs
    pub logging: FileLoggingConfig,
    /// Director roster available to meetings
    pub directors: Vec<FileDirectorConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            generation: FileGenerationConfig::default(),
            discussion: FileDiscussionConfig::default(),
            store: FileStoreConfig::default(),
            logging: FileLoggingConfig::default(),
            directors: directors::default_directors(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.generation.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModel);
        }
        if self.generation.turn_max_tokens == 0 {
            issues.push(ConfigValidationError::ZeroTurnTokens);
        }
        if self.discussion.context_window == 0 {
            issues.push(ConfigValidationError::ZeroContextWindow);
        }

        let mut seen = HashSet::new();
        for (index, director) in self.directors.iter().enumerate() {
            for (field, value) in [("id", &director.id), ("name", &director.name)] {
                if value.trim().is_empty() {
                    issues.push(ConfigValidationError::EmptyDirectorField { index, field });
                }
            }
            if !director.id.trim().is_empty() && !seen.insert(director.id.as_str()) {
                issues.push(ConfigValidationError::DuplicateDirector(director.id.clone()));
            }
        }

        issues
    }
}
