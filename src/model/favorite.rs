use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-persisted marker associating the user with a catalog entry.
///
/// Owned by the sync store. Set membership is always derived from the record
/// collection, never stored as a flag on the entry itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub pokemon_id: u32,
    pub created_at: DateTime<Utc>,
}

impl FavoriteRecord {
    /// Marks `pokemon_id` as favorited now.
    ///
    /// The service normally assigns the timestamp; this constructor exists
    /// for the mock service and for tests.
    pub fn new(pokemon_id: u32) -> Self {
        Self {
            pokemon_id,
            created_at: Utc::now(),
        }
    }
}
