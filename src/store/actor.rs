//! The synchronization store: single owner of [`SyncState`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::model::{FavoriteRecord, PokemonDetail};
use crate::remote::CatalogApi;
use crate::store::message::{MutationOutcome, Respond, StoreRequest};
use crate::store::{MutationError, MutationOp, StoreError, StoreHandle, SyncState, SyncStatus};

/// A toggle whose remote call has not settled yet.
struct PendingMutation {
    /// Removed record and its original index, kept so a failed remove can be
    /// rolled back in place and the view renders exactly as before.
    rollback: Option<(usize, FavoriteRecord)>,
    respond_to: Respond<bool>,
}

/// Message-processing store that exclusively owns the session's [`SyncState`].
///
/// The store runs in its own task and processes requests sequentially, so
/// the state needs no locks. Remote mutations run in spawned tasks that
/// report back via an internal settle message; the per-id `pending` map is
/// what serializes toggles on the same id while letting distinct ids overlap.
pub struct SyncStore {
    receiver: mpsc::Receiver<StoreRequest>,
    /// Weak handle to our own mailbox, upgraded when spawning mutation tasks.
    /// Keeping it weak preserves shutdown-by-drop: once every external handle
    /// is gone and no mutation is in flight, `recv` returns `None`.
    mailbox: mpsc::WeakSender<StoreRequest>,
    api: Arc<dyn CatalogApi>,
    state: SyncState,
    pending: HashMap<u32, PendingMutation>,
}

impl SyncStore {
    /// Creates the store (server half) and its cloneable handle.
    pub fn new(api: Arc<dyn CatalogApi>, buffer_size: usize) -> (Self, StoreHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            mailbox: sender.downgrade(),
            api,
            state: SyncState::default(),
            pending: HashMap::new(),
        };
        (store, StoreHandle::new(sender))
    }

    /// Runs the store loop until every handle is dropped and all in-flight
    /// mutations have settled.
    pub async fn run(mut self) {
        info!("sync store started");
        while let Some(request) = self.receiver.recv().await {
            match request {
                StoreRequest::Initialize { respond_to } => {
                    self.handle_initialize(respond_to).await;
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.state.clone());
                }
                StoreRequest::ToggleFavorite { id, respond_to } => {
                    self.handle_toggle(id, respond_to);
                }
                StoreRequest::Detail { id, respond_to } => {
                    self.handle_detail(id, respond_to);
                }
                StoreRequest::MutationSettled { id, outcome } => {
                    self.handle_settled(id, outcome);
                }
            }
        }
        info!(favorites = self.state.favorites.len(), "sync store shut down");
    }

    async fn handle_initialize(&mut self, respond_to: Respond<()>) {
        debug!("initial load starting");
        self.state.status = SyncStatus::Loading;
        self.state.error_message = None;

        // Join semantics: the first failure does not cancel the other fetch,
        // but any failure wins and neither result is applied. A catalog
        // without matching favorite state would misrender favorite markers.
        let (catalog, favorites) =
            tokio::join!(self.api.fetch_catalog(), self.api.fetch_favorites());

        match (catalog, favorites) {
            (Ok(catalog), Ok(favorites)) => {
                info!(
                    entries = catalog.len(),
                    favorites = favorites.len(),
                    "initial load complete"
                );
                self.state.catalog = catalog;
                self.state.favorites = favorites;
                self.state.status = SyncStatus::Idle;
                let _ = respond_to.send(Ok(()));
            }
            (Err(error), _) | (_, Err(error)) => {
                warn!(%error, "initial load failed");
                self.state.status = SyncStatus::Error;
                self.state.error_message = Some(error.to_string());
                let _ = respond_to.send(Err(StoreError::Api(error)));
            }
        }
    }

    fn handle_toggle(&mut self, id: u32, respond_to: Respond<bool>) {
        if self.pending.contains_key(&id) {
            debug!(id, "toggle rejected, mutation already in flight");
            let operation = if self.state.is_favorite(id) {
                MutationOp::Remove
            } else {
                MutationOp::Add
            };
            let _ = respond_to.send(Err(MutationError {
                operation,
                id,
                message: "a mutation for this id is already in flight".to_string(),
            }
            .into()));
            return;
        }

        let Some(mailbox) = self.mailbox.upgrade() else {
            // Every external handle is gone; the loop is draining.
            let _ = respond_to.send(Err(StoreError::Closed));
            return;
        };

        let position = self
            .state
            .favorites
            .iter()
            .position(|record| record.pokemon_id == id);

        let rollback = match position {
            Some(index) => {
                // Optimistic removal: the record leaves local state before
                // the remote call resolves.
                let record = self.state.favorites.remove(index);
                debug!(id, "optimistically removed favorite");
                let api = Arc::clone(&self.api);
                tokio::spawn(async move {
                    let outcome = MutationOutcome::Removed(api.remove_favorite(id).await);
                    let _ = mailbox
                        .send(StoreRequest::MutationSettled { id, outcome })
                        .await;
                });
                Some((index, record))
            }
            None => {
                // Pessimistic add: the server-assigned record (with its
                // timestamp) must come back before it is trusted into the set.
                debug!(id, "adding favorite");
                let api = Arc::clone(&self.api);
                tokio::spawn(async move {
                    let outcome = MutationOutcome::Added(api.add_favorite(id).await);
                    let _ = mailbox
                        .send(StoreRequest::MutationSettled { id, outcome })
                        .await;
                });
                None
            }
        };

        self.pending
            .insert(id, PendingMutation { rollback, respond_to });
    }

    fn handle_settled(&mut self, id: u32, outcome: MutationOutcome) {
        let Some(pending) = self.pending.remove(&id) else {
            warn!(id, "settle message for unknown mutation");
            return;
        };

        let result = match outcome {
            MutationOutcome::Added(Ok(record)) => {
                info!(id, "favorite added");
                // Newest first, matching the service's favorites ordering.
                self.state.favorites.insert(0, record);
                Ok(true)
            }
            MutationOutcome::Added(Err(error)) => {
                warn!(id, %error, "add favorite failed, state unchanged");
                Err(MutationError {
                    operation: MutationOp::Add,
                    id,
                    message: error.to_string(),
                }
                .into())
            }
            MutationOutcome::Removed(Ok(_)) => {
                info!(id, "favorite removed");
                Ok(false)
            }
            MutationOutcome::Removed(Err(error)) => {
                // Roll the optimistic removal back in place.
                if let Some((index, record)) = pending.rollback {
                    let index = index.min(self.state.favorites.len());
                    self.state.favorites.insert(index, record);
                }
                warn!(id, %error, "remove favorite failed, rolled back");
                Err(MutationError {
                    operation: MutationOp::Remove,
                    id,
                    message: error.to_string(),
                }
                .into())
            }
        };

        // A dropped receiver means the view has unmounted; the state update
        // above still applies, the notification is just discarded.
        let _ = pending.respond_to.send(result);
    }

    fn handle_detail(&self, id: u32, respond_to: Respond<PokemonDetail>) {
        debug!(id, "detail requested");
        // Read-only; runs off-loop so a slow detail response cannot block
        // toggles or snapshots.
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let result = api.fetch_detail(id).await.map_err(StoreError::Api);
            let _ = respond_to.send(result);
        });
    }
}
