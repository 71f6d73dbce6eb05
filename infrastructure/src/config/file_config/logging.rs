//! Logging configuration from TOML (`[logging]` section)
//!
//! ```toml
//! [logging]
//! conversation_log = "~/boardroom/conversation.jsonl"
//! log_dir = "~/boardroom/logs"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of discussion events; disabled when unset
    pub conversation_log: Option<PathBuf>,
    /// Directory for daily-rolling diagnostic logs; disabled when unset
    pub log_dir: Option<PathBuf>,
}
