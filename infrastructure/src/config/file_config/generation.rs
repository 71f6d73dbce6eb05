//! Generation configuration from TOML (`[generation]` section)
//!
//! ```toml
//! [generation]
//! model = "claude-sonnet-4-20250514"
//! base_url = "https://api.anthropic.com"
//! api_key_env = "ANTHROPIC_API_KEY"
//! timeout_seconds = 120
//! turn_max_tokens = 500
//! ```

use boardroom_application::BehaviorConfig;
use boardroom_domain::prompt::TURN_MAX_TOKENS;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Per-call limit; unset or 0 disables the limit
    pub timeout_seconds: Option<u64>,
    pub turn_max_tokens: u32,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_seconds: Some(120),
            turn_max_tokens: TURN_MAX_TOKENS,
        }
    }
}

impl FileGenerationConfig {
    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(self.timeout_seconds)
            .with_turn_max_tokens(self.turn_max_tokens)
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
