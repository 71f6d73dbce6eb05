//! Generation behavior for use cases.

use boardroom_domain::prompt::TURN_MAX_TOKENS;
use std::time::Duration;

/// Application behavior configuration.
///
/// Controls runtime behavior of use cases like the timeout for generation
/// calls. The timeout is a caller-supplied resource limit; `None` waits for
/// the collaborator's own limit.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for one generation call.
    pub timeout: Option<Duration>,
    /// Response-size bound for discussion turns.
    pub turn_max_tokens: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            turn_max_tokens: TURN_MAX_TOKENS,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None` or zero, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
            ..Self::default()
        }
    }

    pub fn with_turn_max_tokens(mut self, max_tokens: u32) -> Self {
        self.turn_max_tokens = max_tokens;
        self
    }
}
