//! In-memory discussion store.

use super::backend::{Persistence, StateStore};
use super::state::StoreState;
use boardroom_application::StoreError;

/// The cached state is the only copy
pub struct Ephemeral;

impl Persistence for Ephemeral {
    fn refresh(&self, _cached: &mut StoreState) -> Result<(), StoreError> {
        Ok(())
    }

    // StoreState operations validate before they mutate
    fn transact<T>(
        &self,
        cached: &mut StoreState,
        op: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        op(cached)
    }
}

/// Process-local store; state is lost on exit
pub type InMemoryDiscussionStore = StateStore<Ephemeral>;

impl InMemoryDiscussionStore {
    pub fn new() -> Self {
        Self::with_state(StoreState::default(), Ephemeral)
    }
}

impl Default for InMemoryDiscussionStore {
    fn default() -> Self {
        Self::new()
    }
}
