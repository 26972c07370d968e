//! # pokedex-sync
//!
//! Client-side data-synchronization core for a Pokémon catalog browser:
//! fetch the remote catalog and favorites, keep them consistent under
//! optimistic mutation, and derive filtered views for the UI.
//!
//! ## Architecture
//!
//! State ownership follows the actor model: one [`store::SyncStore`] task
//! exclusively owns the session's [`store::SyncState`] and processes
//! requests sequentially, so the state needs no locks. Everything else talks
//! to it through a cloneable [`store::StoreHandle`].
//!
//! Reads flow one way: remote client → store → filter pipeline → view.
//! Writes round-trip: view → store → remote client → store update or
//! rollback.
//!
//! ## Module Tour
//!
//! - [`model`]: pure data structures — [`model::CatalogEntry`] (with id
//!   derivation from resource URLs), [`model::FavoriteRecord`],
//!   [`model::PokemonDetail`].
//! - [`remote`]: the typed service boundary. [`remote::CatalogApi`] is the
//!   trait seam; [`remote::HttpCatalogApi`] speaks the uniform
//!   success/data/message envelope over reqwest, and [`remote::mock`] ships
//!   an in-memory stand-in for tests.
//! - [`store`]: the synchronization store. Optimistic removal with in-place
//!   rollback, pessimistic addition, per-id mutation serialization, and a
//!   both-or-neither initial load.
//! - [`filter`]: the pure scope-then-search pipeline over state snapshots.
//! - [`view`]: [`view::BrowseView`], mapping UI intents to store calls and
//!   treating stale selections as "no selection".
//! - [`lifecycle`]: [`lifecycle::PokedexSession`] wires the pieces together
//!   at session start and tears them down on shutdown;
//!   [`lifecycle::setup_tracing`] configures logging.
//! - [`config`]: the single base-URL setting.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pokedex_sync::{ApiConfig, PokedexSession};
//!
//! # async fn demo() -> Result<(), pokedex_sync::store::StoreError> {
//! let session = PokedexSession::connect(&ApiConfig::from_env());
//! let store = session.store();
//! store.initialize().await?;
//!
//! let mut view = session.view();
//! view.set_search_term("char");
//! for entry in view.visible().await? {
//!     println!("{} (#{})", entry.name, entry.id());
//! }
//!
//! view.toggle_favorite(4).await?;
//!
//! // Handles keep the session alive; drop them before shutting down.
//! drop(view);
//! drop(store);
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod filter;
pub mod lifecycle;
pub mod model;
pub mod remote;
pub mod store;
pub mod view;

pub use config::ApiConfig;
pub use filter::FilterCriteria;
pub use lifecycle::{setup_tracing, PokedexSession};
pub use remote::{ApiError, CatalogApi, HttpCatalogApi};
pub use store::{MutationError, StoreError, StoreHandle, SyncState, SyncStatus};
pub use view::BrowseView;
