//! Text generator adapters

pub mod anthropic;

pub use anthropic::AnthropicGenerator;
