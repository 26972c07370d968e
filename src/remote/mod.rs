//! Typed boundary to the catalog/favorites service.
//!
//! The store never issues raw HTTP; it talks to the [`CatalogApi`] trait, so
//! tests can substitute [`mock::MockCatalogApi`] for the reqwest-backed
//! [`HttpCatalogApi`].

pub mod error;
pub mod http;
pub mod mock;

pub use error::ApiError;
pub use http::HttpCatalogApi;

use async_trait::async_trait;

use crate::model::{CatalogEntry, FavoriteRecord, PokemonDetail};

/// Request/response contract for the remote service.
///
/// One operation per resource action. Every operation normalizes failures to
/// [`ApiError`], and nothing here retries automatically — retry policy
/// belongs to the caller.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /pokemon/list` — the fixed catalog.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError>;

    /// `GET /pokemon/{id}` — lazy per-selection detail.
    async fn fetch_detail(&self, id: u32) -> Result<PokemonDetail, ApiError>;

    /// `GET /pokemon/favorites` — bypasses intermediate caches; favorites are
    /// mutated by the same user across sessions, so stale reads are wrong.
    async fn fetch_favorites(&self) -> Result<Vec<FavoriteRecord>, ApiError>;

    /// `POST /pokemon/favorites` — fails with [`ApiError::Service`] when the
    /// service rejects (already favorited, unknown id).
    async fn add_favorite(&self, id: u32) -> Result<FavoriteRecord, ApiError>;

    /// `DELETE /pokemon/favorites/{id}` — fails when the id is not favorited.
    async fn remove_favorite(&self, id: u32) -> Result<FavoriteRecord, ApiError>;
}
