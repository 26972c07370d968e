//! Request messages processed by the store loop.

use tokio::sync::oneshot;

use crate::model::{FavoriteRecord, PokemonDetail};
use crate::remote::ApiError;
use crate::store::{StoreError, SyncState};

/// One-shot response channel for store requests.
pub(crate) type Respond<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests processed sequentially by the store loop.
#[derive(Debug)]
pub(crate) enum StoreRequest {
    /// Concurrent catalog + favorites load; both-or-neither application.
    Initialize { respond_to: Respond<()> },

    /// Clone of the current state for derived views.
    Snapshot {
        respond_to: oneshot::Sender<SyncState>,
    },

    /// Membership-dependent favorite toggle. Resolves once the mutation has
    /// settled remotely.
    ToggleFavorite { id: u32, respond_to: Respond<bool> },

    /// Lazy per-selection detail fetch; never touches sync state.
    Detail {
        id: u32,
        respond_to: Respond<PokemonDetail>,
    },

    /// Internal: a spawned mutation task reporting its remote outcome.
    MutationSettled { id: u32, outcome: MutationOutcome },
}

#[derive(Debug)]
pub(crate) enum MutationOutcome {
    Added(Result<FavoriteRecord, ApiError>),
    Removed(Result<FavoriteRecord, ApiError>),
}
