//! Discussion configuration from TOML (`[discussion]` section)
//!
//! ```toml
//! [discussion]
//! context_window = 5      # statements shown to the speaker
//! question_lookback = 3   # recent questions checked for preemption
//! seed = 42               # reproducible free-mode picks
//! ```

use boardroom_application::DiscussionParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    pub context_window: usize,
    pub question_lookback: usize,
    pub seed: Option<u64>,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        let params = DiscussionParams::default();
        Self {
            context_window: params.context_window,
            question_lookback: params.question_lookback,
            seed: params.seed,
        }
    }
}

impl FileDiscussionConfig {
    pub fn params(&self) -> DiscussionParams {
        DiscussionParams {
            context_window: self.context_window,
            question_lookback: self.question_lookback,
            seed: self.seed,
        }
    }
}
