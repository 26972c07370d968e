//! In-memory [`CatalogApi`] for tests.
//!
//! `MockCatalogApi` plays the role of the remote service: it owns the
//! server-side favorites collection, supports one-shot failure injection per
//! operation, and can hold mutations in flight behind a gate so tests can
//! observe the store's per-id serialization. It ships in the library rather
//! than behind `cfg(test)` so integration tests and downstream users can
//! drive a full session without a server.
//!
//! ```ignore
//! let api = Arc::new(MockCatalogApi::new());
//! api.set_catalog(entries);
//! api.fail_add(ApiError::Service("already a favorite".into()));
//!
//! let session = PokedexSession::with_api(api.clone());
//! // ...
//! assert_eq!(api.favorites().len(), 0);
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::model::{CatalogEntry, FavoriteRecord, PokemonDetail};
use crate::remote::{ApiError, CatalogApi};

#[derive(Default)]
struct MockState {
    catalog: Vec<CatalogEntry>,
    favorites: Vec<FavoriteRecord>,
    fail_catalog: Option<ApiError>,
    fail_favorites: Option<ApiError>,
    fail_detail: Option<ApiError>,
    fail_add: Option<ApiError>,
    fail_remove: Option<ApiError>,
    mutation_gate: Option<Arc<Semaphore>>,
    mutation_starts: u32,
}

/// Scriptable stand-in for the remote service.
#[derive(Default)]
pub struct MockCatalogApi {
    state: Mutex<MockState>,
}

impl MockCatalogApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the served catalog.
    pub fn set_catalog(&self, entries: Vec<CatalogEntry>) {
        self.state.lock().unwrap().catalog = entries;
    }

    /// Replaces the server-side favorites collection.
    pub fn set_favorites(&self, records: Vec<FavoriteRecord>) {
        self.state.lock().unwrap().favorites = records;
    }

    /// Fails the next `fetch_catalog` call with `error`.
    pub fn fail_catalog(&self, error: ApiError) {
        self.state.lock().unwrap().fail_catalog = Some(error);
    }

    /// Fails the next `fetch_favorites` call with `error`.
    pub fn fail_favorites(&self, error: ApiError) {
        self.state.lock().unwrap().fail_favorites = Some(error);
    }

    /// Fails the next `fetch_detail` call with `error`.
    pub fn fail_detail(&self, error: ApiError) {
        self.state.lock().unwrap().fail_detail = Some(error);
    }

    /// Fails the next `add_favorite` call with `error`.
    pub fn fail_add(&self, error: ApiError) {
        self.state.lock().unwrap().fail_add = Some(error);
    }

    /// Fails the next `remove_favorite` call with `error`.
    pub fn fail_remove(&self, error: ApiError) {
        self.state.lock().unwrap().fail_remove = Some(error);
    }

    /// Holds every subsequent mutation until the returned gate receives
    /// permits (`gate.add_permits(n)`), one permit per held call.
    pub fn hold_mutations(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.state.lock().unwrap().mutation_gate = Some(gate.clone());
        gate
    }

    /// Server-side view of the favorites collection.
    pub fn favorites(&self) -> Vec<FavoriteRecord> {
        self.state.lock().unwrap().favorites.clone()
    }

    /// How many mutation calls have reached the service, counted before any
    /// gate is awaited — in-flight calls are included.
    pub fn mutation_starts(&self) -> u32 {
        self.state.lock().unwrap().mutation_starts
    }

    async fn enter_mutation(&self) {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.mutation_starts += 1;
            state.mutation_gate.clone()
        };
        if let Some(gate) = gate {
            gate.acquire().await.expect("mutation gate closed").forget();
        }
    }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.fail_catalog.take() {
            return Err(error);
        }
        Ok(state.catalog.clone())
    }

    async fn fetch_detail(&self, id: u32) -> Result<PokemonDetail, ApiError> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.fail_detail.take() {
            return Err(error);
        }
        state
            .catalog
            .iter()
            .find(|entry| entry.id() == id)
            .map(|entry| PokemonDetail {
                id,
                name: entry.name.clone(),
                height: None,
                weight: None,
                types: Vec::new(),
            })
            .ok_or_else(|| ApiError::Service(format!("pokemon {id} not found")))
    }

    async fn fetch_favorites(&self) -> Result<Vec<FavoriteRecord>, ApiError> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.fail_favorites.take() {
            return Err(error);
        }
        Ok(state.favorites.clone())
    }

    async fn add_favorite(&self, id: u32) -> Result<FavoriteRecord, ApiError> {
        self.enter_mutation().await;
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.fail_add.take() {
            return Err(error);
        }
        if state.favorites.iter().any(|record| record.pokemon_id == id) {
            return Err(ApiError::Service(format!("pokemon {id} is already a favorite")));
        }
        let record = FavoriteRecord::new(id);
        state.favorites.insert(0, record.clone());
        Ok(record)
    }

    async fn remove_favorite(&self, id: u32) -> Result<FavoriteRecord, ApiError> {
        self.enter_mutation().await;
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.fail_remove.take() {
            return Err(error);
        }
        let index = state
            .favorites
            .iter()
            .position(|record| record.pokemon_id == id)
            .ok_or_else(|| ApiError::Service(format!("pokemon {id} is not a favorite")))?;
        Ok(state.favorites.remove(index))
    }
}
