use std::sync::Arc;

use tracing::{error, info};

use crate::config::ApiConfig;
use crate::remote::{CatalogApi, HttpCatalogApi};
use crate::store::{StoreError, StoreHandle, SyncStore};
use crate::view::BrowseView;

/// Capacity of the store mailbox.
const STORE_BUFFER: usize = 32;

/// One browsing session: the long-lived store task plus the handles the
/// consuming components need.
///
/// Constructed at session start and passed explicitly to consumers instead
/// of living in a global; dropping or shutting it down ends the session.
pub struct PokedexSession {
    store: StoreHandle,
    task: tokio::task::JoinHandle<()>,
}

impl PokedexSession {
    /// Connects to the service described by `config`.
    pub fn connect(config: &ApiConfig) -> Self {
        Self::with_api(Arc::new(HttpCatalogApi::new(config)))
    }

    /// Builds a session over any [`CatalogApi`] implementation — the mock in
    /// tests, the HTTP client in production.
    pub fn with_api(api: Arc<dyn CatalogApi>) -> Self {
        let (store, handle) = SyncStore::new(api, STORE_BUFFER);
        let task = tokio::spawn(store.run());
        info!("session started");
        Self {
            store: handle,
            task,
        }
    }

    /// A shared handle to the session's store.
    pub fn store(&self) -> StoreHandle {
        self.store.clone()
    }

    /// A fresh view controller bound to this session's store.
    pub fn view(&self) -> BrowseView {
        BrowseView::new(self.store.clone())
    }

    /// Drops the session's handle and waits for the store task to drain.
    ///
    /// Any other live [`StoreHandle`] or view keeps the store alive; drop
    /// them first. In-flight mutations still settle before the task exits;
    /// their callers are notified, or silently ignored if their views are
    /// already gone.
    pub async fn shutdown(self) -> Result<(), StoreError> {
        info!("shutting down session");
        drop(self.store);
        if let Err(join_error) = self.task.await {
            error!(%join_error, "store task failed");
            return Err(StoreError::TaskFailed(join_error.to_string()));
        }
        info!("session shutdown complete");
        Ok(())
    }
}
