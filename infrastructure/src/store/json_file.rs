//! JSON-file discussion store.
//!
//! The whole state lives in one pretty-printed JSON document. Every
//! mutation rewrites it through a sibling temp file followed by a rename,
//! so a crash leaves either the old or the new snapshot on disk.
//!
//! Several processes may share one file. A sibling `.lock` file is held
//! exclusively while a mutation reloads, validates and rewrites the
//! document, and shared while a read reloads it.

use super::backend::{Persistence, StateStore};
use super::state::StoreState;
use boardroom_application::StoreError;
use fs2::FileExt;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reloads from and writes back to `path` on every call
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("store.json"));
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Block until the lock file is held; the lock is released when the
    /// returned handle drops.
    fn acquire(&self, exclusive: bool) -> Result<fs::File, StoreError> {
        let lock_path = self.sibling(".lock");
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| {
                StoreError::Backend(format!("failed to open {}: {e}", lock_path.display()))
            })?;
        let locked = if exclusive {
            FileExt::lock_exclusive(&file)
        } else {
            FileExt::lock_shared(&file)
        };
        locked.map_err(|e| {
            StoreError::Backend(format!("failed to lock {}: {e}", lock_path.display()))
        })?;
        Ok(file)
    }

    fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| StoreError::Backend(format!("failed to serialize store: {e}")))?;

        let temp = self.sibling(".tmp");
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&temp)?;
            file.write_all(&json)?;
            file.sync_all()?;
            fs::rename(&temp, &self.path)
        };
        write().map_err(|e| {
            StoreError::Backend(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!("Saved store snapshot to {}", self.path.display());
        Ok(())
    }
}

impl Persistence for JsonFile {
    fn refresh(&self, cached: &mut StoreState) -> Result<(), StoreError> {
        let _lock = self.acquire(false)?;
        *cached = load(&self.path)?;
        Ok(())
    }

    fn transact<T>(
        &self,
        cached: &mut StoreState,
        op: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _lock = self.acquire(true)?;
        let mut next = load(&self.path)?;
        let result = op(&mut next)?;
        self.save(&next)?;
        *cached = next;
        Ok(result)
    }
}

/// Store persisted to a single JSON file
pub type JsonFileStore = StateStore<JsonFile>;

impl JsonFileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file is an empty store. Meeting and participant counters
    /// that drifted from the stored statements are repaired on load.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Backend(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let persistence = JsonFile { path };
        let state = {
            let _lock = persistence.acquire(true)?;
            let mut state = load(&persistence.path)?;
            let repaired = state.reconcile_all();
            if !repaired.is_empty() {
                for (id, report) in &repaired {
                    warn!(
                        "Repaired counters of meeting {} (meeting fixed: {}, participants fixed: {})",
                        id, report.meeting_fixed, report.participants_fixed
                    );
                }
                persistence.save(&state)?;
            }
            state
        };

        Ok(Self::with_state(state, persistence))
    }

    pub fn path(&self) -> &Path {
        &self.persistence().path
    }
}

fn load(path: &Path) -> Result<StoreState, StoreError> {
    if !path.exists() {
        debug!("No store at {}, starting empty", path.display());
        return Ok(StoreState::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| StoreError::Backend(format!("failed to read {}: {e}", path.display())))?;
    if content.trim().is_empty() {
        return Ok(StoreState::default());
    }
    serde_json::from_str(&content)
        .map_err(|e| StoreError::Backend(format!("failed to parse {}: {e}", path.display())))
}
