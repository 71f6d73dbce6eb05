//! Configuration file loading for boardroom
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `BOARDROOM_*` environment variables (`BOARDROOM_GENERATION__MODEL=...`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./boardroom.toml` or `./.boardroom.toml`
//! 4. Global: `~/.config/boardroom/config.toml` (or the platform config dir)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, FileConfig,
    FileDirectorConfig, FileDiscussionConfig, FileGenerationConfig, FileLoggingConfig,
    FileStoreConfig,
};
pub use loader::ConfigLoader;
