//! Single source of truth for the session's synchronized state.
//!
//! The [`SyncStore`] runs in its own task and exclusively owns [`SyncState`];
//! the filter pipeline and the view controller only ever see snapshots
//! obtained through a [`StoreHandle`]. Favorite toggles are optimistic for
//! removal (with rollback on failure) and pessimistic for addition, and
//! toggles on the same id are serialized while distinct ids proceed
//! concurrently.

mod actor;
mod error;
mod handle;
pub(crate) mod message;
mod state;

pub use actor::SyncStore;
pub use error::{MutationError, MutationOp, StoreError};
pub use handle::StoreHandle;
pub use state::{SyncState, SyncStatus};
