use serde::{Deserialize, Serialize};

/// One browsable item in the fixed catalog list.
///
/// Entries are immutable once fetched. The service identifies an entry either
/// by an explicit `id` or implicitly by the trailing path segment of its
/// resource URL, which is how the upstream catalog formats its list payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u32>,
}

impl CatalogEntry {
    /// Creates an entry whose id is derived from the resource URL.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            id: None,
        }
    }

    /// Creates an entry with an explicit id, which takes precedence over
    /// derivation.
    pub fn with_id(id: u32, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            id: Some(id),
        }
    }

    /// The entry's catalog id: the explicit id when the service provided one,
    /// otherwise derived from the resource URL.
    ///
    /// The service contract guarantees every entry carries a derivable id, so
    /// the `0` fallback is unreachable for well-formed catalogs.
    pub fn id(&self) -> u32 {
        self.id.or_else(|| derive_id(&self.url)).unwrap_or(0)
    }
}

/// Extracts the trailing positive-integer path segment of a resource URL.
///
/// Pure and deterministic: `https://pokeapi.co/api/v2/pokemon/25/` yields
/// `Some(25)`; URLs with no trailing number (or a zero segment) yield `None`.
pub fn derive_id(resource_ref: &str) -> Option<u32> {
    resource_ref
        .split('/')
        .rev()
        .find(|segment| !segment.is_empty())?
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
}

/// Per-entity detail, fetched lazily on selection.
///
/// Not part of the synchronized core state; the store fetches it on demand
/// and nothing is cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_id_from_trailing_segment() {
        assert_eq!(derive_id("https://pokeapi.co/api/v2/pokemon/25/"), Some(25));
        assert_eq!(derive_id("https://pokeapi.co/api/v2/pokemon/25"), Some(25));
        assert_eq!(derive_id("/pokemon/1/"), Some(1));
    }

    #[test]
    fn derivation_is_stable() {
        let url = "https://pokeapi.co/api/v2/pokemon/151/";
        assert_eq!(derive_id(url), derive_id(url));
    }

    #[test]
    fn rejects_refs_without_a_positive_trailing_id() {
        assert_eq!(derive_id("https://pokeapi.co/api/v2/pokemon/"), None);
        assert_eq!(derive_id("https://pokeapi.co/api/v2/pokemon/0/"), None);
        assert_eq!(derive_id(""), None);
    }

    #[test]
    fn explicit_id_takes_precedence() {
        let entry = CatalogEntry::with_id(7, "squirtle", "/pokemon/4/");
        assert_eq!(entry.id(), 7);

        let derived = CatalogEntry::new("charmander", "/pokemon/4/");
        assert_eq!(derived.id(), 4);
    }
}
