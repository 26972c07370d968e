//! Error types for the sync store.

use std::fmt;

use thiserror::Error;

use crate::remote::ApiError;

/// Which toggle operation a mutation failure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOp {
    Add,
    Remove,
}

impl fmt::Display for MutationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationOp::Add => write!(f, "add"),
            MutationOp::Remove => write!(f, "remove"),
        }
    }
}

/// A favorite toggle failed.
///
/// By the time this surfaces, local state has already been settled (rolled
/// back or left untouched) and the global status is unaffected — the catalog
/// view must never blank out over a single failed toggle.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{operation} favorite failed for id {id}: {message}")]
pub struct MutationError {
    pub operation: MutationOp,
    pub id: u32,
    pub message: String,
}

/// Errors surfaced by [`StoreHandle`](crate::store::StoreHandle) operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store task is gone; the session has shut down.
    #[error("sync store closed")]
    Closed,

    /// The store dropped the response channel before answering.
    #[error("sync store dropped response channel")]
    Dropped,

    /// The store task panicked or was aborted during shutdown.
    #[error("store task failed: {0}")]
    TaskFailed(String),

    /// A remote call failed (initial load or detail fetch).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A favorite toggle failed after the store settled local state.
    #[error(transparent)]
    Mutation(#[from] MutationError),
}
