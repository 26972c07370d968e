//! Cloneable client half of the sync store.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::model::PokemonDetail;
use crate::store::message::{Respond, StoreRequest};
use crate::store::{StoreError, SyncState};

/// Type-safe handle for the [`SyncStore`](crate::store::SyncStore).
///
/// Holds only a channel sender, so cloning is cheap; every view of the
/// session talks to the same store task.
#[derive(Clone)]
pub struct StoreHandle {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreHandle {
    pub(crate) fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Respond<T>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Loads catalog and favorites concurrently.
    ///
    /// Both-or-neither: if either fetch fails, neither result is applied and
    /// the store transitions to [`SyncStatus::Error`](crate::store::SyncStatus).
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<(), StoreError> {
        debug!("sending request");
        self.request(|respond_to| StoreRequest::Initialize { respond_to })
            .await
    }

    /// Current state snapshot for derived views.
    pub async fn snapshot(&self) -> Result<SyncState, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    /// Toggles favorite membership for `id`, resolving once the mutation has
    /// settled remotely. Returns whether the entry is a favorite afterwards.
    ///
    /// A second toggle for an id with an in-flight mutation is rejected with
    /// a [`MutationError`](crate::store::MutationError).
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, id: u32) -> Result<bool, StoreError> {
        debug!("sending request");
        self.request(|respond_to| StoreRequest::ToggleFavorite { id, respond_to })
            .await
    }

    /// Lazily fetches per-selection detail through the store.
    #[instrument(skip(self))]
    pub async fn detail(&self, id: u32) -> Result<PokemonDetail, StoreError> {
        debug!("sending request");
        self.request(|respond_to| StoreRequest::Detail { id, respond_to })
            .await
    }
}
