//! reqwest-backed implementation of [`CatalogApi`].

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::model::{CatalogEntry, FavoriteRecord, PokemonDetail};
use crate::remote::{ApiError, CatalogApi};

/// Fallback used when a failing envelope carries no message.
const UNKNOWN_ERROR: &str = "an unknown error occurred";

/// The uniform response wrapper the service uses for every endpoint:
/// `{ success: bool, data: T, message?: string | string[] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<EnvelopeMessage>,
}

/// The service reports failures either as a single string or a list of parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EnvelopeMessage {
    One(String),
    Many(Vec<String>),
}

impl EnvelopeMessage {
    /// Normalizes multi-part messages by joining with `", "`.
    fn normalize(self) -> String {
        match self {
            EnvelopeMessage::One(message) => message,
            EnvelopeMessage::Many(parts) => parts.join(", "),
        }
    }
}

impl<T> Envelope<T> {
    /// Unwraps the payload, mapping every failure signal — non-2xx status,
    /// `success=false`, or a success envelope with no data — to
    /// [`ApiError::Service`].
    fn into_data(self, http_ok: bool) -> Result<T, ApiError> {
        if !http_ok || !self.success {
            let message = self
                .message
                .map(EnvelopeMessage::normalize)
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Err(ApiError::Service(message));
        }
        self.data
            .ok_or_else(|| ApiError::Service("envelope is missing data".to_string()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddFavoriteBody {
    pokemon_id: u32,
}

/// Stateless HTTP client for the catalog/favorites service.
///
/// Holds only a connection pool and the base URL; all state lives in the
/// store. Cheap to clone.
#[derive(Clone)]
pub struct HttpCatalogApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and decodes the uniform envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let http_ok = response.status().is_success();
        let envelope: Envelope<T> = response.json().await?;
        envelope.into_data(http_ok)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        debug!("fetching catalog");
        self.execute(self.client.get(self.url("/pokemon/list"))).await
    }

    async fn fetch_detail(&self, id: u32) -> Result<PokemonDetail, ApiError> {
        debug!(id, "fetching detail");
        self.execute(self.client.get(self.url(&format!("/pokemon/{id}"))))
            .await
    }

    async fn fetch_favorites(&self) -> Result<Vec<FavoriteRecord>, ApiError> {
        debug!("fetching favorites");
        // no-store: favorites change across sessions, caches must not answer.
        self.execute(
            self.client
                .get(self.url("/pokemon/favorites"))
                .header(CACHE_CONTROL, "no-store"),
        )
        .await
    }

    async fn add_favorite(&self, id: u32) -> Result<FavoriteRecord, ApiError> {
        debug!(id, "adding favorite");
        self.execute(
            self.client
                .post(self.url("/pokemon/favorites"))
                .json(&AddFavoriteBody { pokemon_id: id }),
        )
        .await
    }

    async fn remove_favorite(&self, id: u32) -> Result<FavoriteRecord, ApiError> {
        debug!(id, "removing favorite");
        self.execute(
            self.client
                .delete(self.url(&format!("/pokemon/favorites/{id}"))),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_success_envelope() {
        let envelope: Envelope<Vec<CatalogEntry>> = serde_json::from_str(
            r#"{ "success": true, "data": [{ "name": "pikachu", "url": "/pokemon/25/" }] }"#,
        )
        .unwrap();
        let entries = envelope.into_data(true).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id(), 25);
    }

    #[test]
    fn joins_multi_part_failure_messages() {
        let envelope: Envelope<Vec<CatalogEntry>> = serde_json::from_str(
            r#"{ "success": false, "data": null, "message": ["bad id", "not a number"] }"#,
        )
        .unwrap();
        assert_eq!(
            envelope.into_data(true),
            Err(ApiError::Service("bad id, not a number".to_string()))
        );
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let envelope: Envelope<()> =
            serde_json::from_str(r#"{ "success": false, "data": null }"#).unwrap();
        assert_eq!(
            envelope.into_data(true),
            Err(ApiError::Service(UNKNOWN_ERROR.to_string()))
        );
    }

    #[test]
    fn non_2xx_status_fails_even_when_envelope_claims_success() {
        let envelope: Envelope<()> =
            serde_json::from_str(r#"{ "success": true, "data": null, "message": "teapot" }"#)
                .unwrap();
        assert_eq!(
            envelope.into_data(false),
            Err(ApiError::Service("teapot".to_string()))
        );
    }

    #[test]
    fn success_without_data_is_malformed() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{ "success": true }"#).unwrap();
        assert!(matches!(envelope.into_data(true), Err(ApiError::Service(_))));
    }
}
