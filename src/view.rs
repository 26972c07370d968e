//! Orchestration between UI intents, the store, and the filter pipeline.

use tracing::{debug, instrument};

use crate::filter::{self, FilterCriteria};
use crate::model::{CatalogEntry, PokemonDetail};
use crate::store::{StoreError, StoreHandle, SyncStatus};

/// View controller for one browsing surface.
///
/// Holds only transient UI state (criteria and selection); everything else
/// is read from the store on demand. Cheap to create, one per mounted view.
#[derive(Clone)]
pub struct BrowseView {
    store: StoreHandle,
    criteria: FilterCriteria,
    selected: Option<u32>,
}

impl BrowseView {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
            selected: None,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.criteria.favorites_only = favorites_only;
    }

    pub fn toggle_favorites_only(&mut self) {
        self.criteria.favorites_only = !self.criteria.favorites_only;
    }

    pub fn select(&mut self, id: u32) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.selected
    }

    /// Entries visible under the current criteria, in catalog order.
    pub async fn visible(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let state = self.store.snapshot().await?;
        Ok(filter::apply(
            &state.catalog,
            &state.favorite_ids(),
            &self.criteria,
        ))
    }

    /// Global load status and banner text, mirrored from the store.
    ///
    /// Initial-load failures are global and block rendering; mutation
    /// failures never show up here.
    pub async fn status(&self) -> Result<(SyncStatus, Option<String>), StoreError> {
        let state = self.store.snapshot().await?;
        Ok((state.status, state.error_message))
    }

    /// Whether `id` is currently a favorite.
    pub async fn is_favorite(&self, id: u32) -> Result<bool, StoreError> {
        Ok(self.store.snapshot().await?.is_favorite(id))
    }

    /// The selected entry, or `None` when the selection does not resolve in
    /// the current filtered view (e.g. filtered out by a new search term).
    pub async fn selected_entry(&self) -> Result<Option<CatalogEntry>, StoreError> {
        let Some(id) = self.selected else {
            return Ok(None);
        };
        Ok(self
            .visible()
            .await?
            .into_iter()
            .find(|entry| entry.id() == id))
    }

    /// Lazily fetched detail for the selected entry.
    ///
    /// A stale selection is treated as "no selection", never an error.
    #[instrument(skip(self))]
    pub async fn selected_detail(&self) -> Result<Option<PokemonDetail>, StoreError> {
        let Some(entry) = self.selected_entry().await? else {
            debug!("selection does not resolve, treating as no selection");
            return Ok(None);
        };
        self.store.detail(entry.id()).await.map(Some)
    }

    /// Forwards a favorite toggle for `id` to the store.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, id: u32) -> Result<bool, StoreError> {
        self.store.toggle_favorite(id).await
    }
}
