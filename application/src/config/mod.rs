//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`BehaviorConfig`] - generation timeout and response-size bound for turns
//! - [`DiscussionParams`] - context window, question lookback and tie-break seed

pub mod behavior;
pub mod discussion_params;

pub use behavior::BehaviorConfig;
pub use discussion_params::DiscussionParams;
