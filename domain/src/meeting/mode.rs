//! Discussion modes.
//!
//! The mode decides turn order. Values outside the four known modes are kept
//! verbatim in [`DiscussionMode::Other`] so a meeting created by a newer
//! client still schedules (as round robin) instead of failing to load.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Turn-order policy of a meeting
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscussionMode {
    /// Strict roster order, one statement per participant per round
    #[default]
    RoundRobin,
    /// Pro (even roster index) and con (odd roster index) sides alternate with rebuttals
    Debate,
    /// Layered deep-dive; new rounds open with the least heard participant
    Focus,
    /// Least recently active participants speak, ties broken at random
    Free,
    /// Unrecognized value, scheduled like round robin
    Other(String),
}

impl DiscussionMode {
    pub fn as_str(&self) -> &str {
        match self {
            DiscussionMode::RoundRobin => "round_robin",
            DiscussionMode::Debate => "debate",
            DiscussionMode::Focus => "focus",
            DiscussionMode::Free => "free",
            DiscussionMode::Other(raw) => raw,
        }
    }

    /// Whether this is one of the four known modes
    pub fn is_recognized(&self) -> bool {
        !matches!(self, DiscussionMode::Other(_))
    }

    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            DiscussionMode::RoundRobin => "Round robin: everyone speaks once per round, in order",
            DiscussionMode::Debate => "Debate: pro and con sides alternate with rebuttals",
            DiscussionMode::Focus => "Focus: each round digs one layer deeper",
            DiscussionMode::Free => "Free: the least recently heard speak next",
            DiscussionMode::Other(_) => "Unrecognized mode (scheduled as round robin)",
        }
    }
}

impl From<&str> for DiscussionMode {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "round_robin" | "round-robin" | "roundrobin" => DiscussionMode::RoundRobin,
            "debate" => DiscussionMode::Debate,
            "focus" => DiscussionMode::Focus,
            "free" => DiscussionMode::Free,
            _ => DiscussionMode::Other(s.to_string()),
        }
    }
}

impl From<String> for DiscussionMode {
    fn from(s: String) -> Self {
        DiscussionMode::from(s.as_str())
    }
}

impl From<DiscussionMode> for String {
    fn from(mode: DiscussionMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for DiscussionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
