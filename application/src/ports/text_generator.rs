//! Text generator port
//!
//! Defines the interface for the remote text-generation collaborator.

use async_trait::async_trait;
use boardroom_domain::{GenerationOutput, GenerationRequest};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed generation output: {0}")]
    MalformedOutput(String),

    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
}

impl GenerationError {
    /// Whether a caller-level retry could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::RateLimited(_)
            | GenerationError::Network(_)
            | GenerationError::Timeout(_) => true,
            GenerationError::Api { status, .. } => *status >= 500,
            GenerationError::Authentication(_) | GenerationError::MalformedOutput(_) => false,
        }
    }
}

/// Gateway to the text-generation collaborator
///
/// One request, one response. Implementations must not retry internally.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier used for requests
    fn model(&self) -> &str;

    /// Generate text for a single prompt
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError>;
}
