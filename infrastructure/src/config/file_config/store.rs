//! Store configuration from TOML (`[store]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const STORE_FILE: &str = "meetings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// JSON file holding every meeting; defaults to the platform data dir
    pub path: Option<PathBuf>,
}

impl FileStoreConfig {
    /// Configured path, else `<data dir>/boardroom/meetings.json`, else `./meetings.json`
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("boardroom").join(STORE_FILE))
                .unwrap_or_else(|| PathBuf::from(STORE_FILE))
        })
    }
}
