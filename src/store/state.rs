use std::collections::HashSet;

use crate::model::{CatalogEntry, FavoriteRecord};

/// Load status of the session-wide sync state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncStatus {
    /// Nothing in flight; the state is trustworthy (possibly still empty).
    #[default]
    Idle,
    /// Initial load in flight.
    Loading,
    /// Initial load failed; catalog and favorites were left untouched.
    Error,
}

/// Session-wide synchronized state.
///
/// Created empty at session start, populated once by
/// [`StoreHandle::initialize`](crate::store::StoreHandle::initialize), then
/// mutated only by favorite toggles. Lives exactly as long as the store task.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncState {
    pub catalog: Vec<CatalogEntry>,
    pub favorites: Vec<FavoriteRecord>,
    pub status: SyncStatus,
    pub error_message: Option<String>,
}

impl SyncState {
    /// The derived FavoriteSet: recomputed from the record collection on
    /// every call, never stored, so it cannot drift.
    pub fn favorite_ids(&self) -> HashSet<u32> {
        self.favorites
            .iter()
            .map(|record| record.pokemon_id)
            .collect()
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.iter().any(|record| record.pokemon_id == id)
    }
}
