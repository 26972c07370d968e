//! Store semantics against the in-memory mock service: optimistic removal
//! with rollback, pessimistic addition, both-or-neither initial load, and
//! per-id mutation serialization.

use std::sync::Arc;
use std::time::Duration;

use pokedex_sync::lifecycle::PokedexSession;
use pokedex_sync::model::{CatalogEntry, FavoriteRecord};
use pokedex_sync::remote::mock::MockCatalogApi;
use pokedex_sync::remote::ApiError;
use pokedex_sync::store::{MutationOp, StoreError, SyncStatus, SyncStore};

fn sample_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"),
        CatalogEntry::new("charmander", "https://pokeapi.co/api/v2/pokemon/4/"),
        CatalogEntry::new("squirtle", "https://pokeapi.co/api/v2/pokemon/7/"),
    ]
}

fn mock_api() -> Arc<MockCatalogApi> {
    let api = Arc::new(MockCatalogApi::new());
    api.set_catalog(sample_catalog());
    api
}

/// Lets the store loop and spawned mutation tasks make progress.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(25)).await;
}

#[tokio::test]
async fn initialize_populates_catalog_and_favorites() {
    let api = mock_api();
    api.set_favorites(vec![FavoriteRecord::new(7)]);
    let session = PokedexSession::with_api(api);
    let store = session.store();

    store.initialize().await.expect("initial load failed");

    let state = store.snapshot().await.unwrap();
    assert_eq!(state.status, SyncStatus::Idle);
    assert_eq!(state.catalog.len(), 3);
    assert_eq!(state.favorite_ids(), [7].into_iter().collect());
    assert!(state.error_message.is_none());

    drop(store);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn initialize_applies_neither_result_when_favorites_fail() {
    let api = mock_api();
    api.fail_favorites(ApiError::Network("connection refused".to_string()));
    let session = PokedexSession::with_api(api);
    let store = session.store();

    let result = store.initialize().await;
    assert!(matches!(result, Err(StoreError::Api(ApiError::Network(_)))));

    // Both-or-neither: the catalog fetch succeeded but must not be applied.
    let state = store.snapshot().await.unwrap();
    assert_eq!(state.status, SyncStatus::Error);
    assert!(state.catalog.is_empty());
    assert!(state.favorites.is_empty());
    assert!(state.error_message.is_some());

    drop(store);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn toggle_round_trip_restores_the_favorite_set() {
    let api = mock_api();
    let session = PokedexSession::with_api(api.clone());
    let store = session.store();
    store.initialize().await.unwrap();

    assert!(store.toggle_favorite(1).await.unwrap());
    let state = store.snapshot().await.unwrap();
    assert_eq!(state.favorite_ids(), [1].into_iter().collect());
    // The server-assigned record is prepended, newest first.
    assert_eq!(state.favorites[0].pokemon_id, 1);

    assert!(!store.toggle_favorite(1).await.unwrap());
    let state = store.snapshot().await.unwrap();
    assert!(state.favorite_ids().is_empty());
    assert!(api.favorites().is_empty());

    drop(store);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn failed_add_leaves_state_unchanged() {
    let api = mock_api();
    api.fail_add(ApiError::Service("invalid id".to_string()));
    let session = PokedexSession::with_api(api.clone());
    let store = session.store();
    store.initialize().await.unwrap();

    let error = store.toggle_favorite(1).await.unwrap_err();
    let StoreError::Mutation(mutation) = error else {
        panic!("expected mutation error, got {error:?}");
    };
    assert_eq!(mutation.operation, MutationOp::Add);
    assert_eq!(mutation.id, 1);

    let state = store.snapshot().await.unwrap();
    assert!(state.favorites.is_empty());
    // Mutation failures are local; global status must not blank the view.
    assert_eq!(state.status, SyncStatus::Idle);
    assert!(api.favorites().is_empty());

    drop(store);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn failed_remove_rolls_the_record_back_in_place() {
    let api = mock_api();
    let original = vec![FavoriteRecord::new(1), FavoriteRecord::new(4)];
    api.set_favorites(original.clone());
    api.fail_remove(ApiError::Network("timeout".to_string()));
    let session = PokedexSession::with_api(api);
    let store = session.store();
    store.initialize().await.unwrap();

    let error = store.toggle_favorite(4).await.unwrap_err();
    let StoreError::Mutation(mutation) = error else {
        panic!("expected mutation error, got {error:?}");
    };
    assert_eq!(mutation.operation, MutationOp::Remove);
    assert_eq!(mutation.id, 4);

    // The optimistic removal was rolled back at its original index.
    let state = store.snapshot().await.unwrap();
    assert_eq!(state.favorites, original);
    assert_eq!(state.status, SyncStatus::Idle);

    drop(store);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn same_id_toggle_is_rejected_while_in_flight() {
    let api = mock_api();
    let gate = api.hold_mutations();
    let session = PokedexSession::with_api(api);
    let store = session.store();
    store.initialize().await.unwrap();

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.toggle_favorite(1).await }
    });
    settle().await;

    let error = store.toggle_favorite(1).await.unwrap_err();
    let StoreError::Mutation(mutation) = error else {
        panic!("expected mutation error, got {error:?}");
    };
    assert_eq!(mutation.id, 1);
    assert!(mutation.message.contains("in flight"));

    gate.add_permits(1);
    assert!(first.await.unwrap().unwrap());

    let state = store.snapshot().await.unwrap();
    assert_eq!(state.favorite_ids(), [1].into_iter().collect());

    drop(store);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn distinct_ids_toggle_concurrently() {
    let api = mock_api();
    let gate = api.hold_mutations();
    let session = PokedexSession::with_api(api.clone());
    let store = session.store();
    store.initialize().await.unwrap();

    let add_one = tokio::spawn({
        let store = store.clone();
        async move { store.toggle_favorite(1).await }
    });
    let add_four = tokio::spawn({
        let store = store.clone();
        async move { store.toggle_favorite(4).await }
    });
    settle().await;

    // Both remote calls are in flight at once; neither waited on the other.
    assert_eq!(api.mutation_starts(), 2);

    gate.add_permits(2);
    assert!(add_one.await.unwrap().unwrap());
    assert!(add_four.await.unwrap().unwrap());

    let state = store.snapshot().await.unwrap();
    assert_eq!(state.favorite_ids(), [1, 4].into_iter().collect());

    drop(store);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn in_flight_toggle_settles_silently_after_its_view_is_gone() {
    let api = mock_api();
    let gate = api.hold_mutations();
    let session = PokedexSession::with_api(api.clone());
    let store = session.store();
    store.initialize().await.unwrap();

    let toggler = tokio::spawn({
        let store = store.clone();
        async move { store.toggle_favorite(1).await }
    });
    settle().await;

    // The view unmounts mid-toggle: nobody is listening for the outcome.
    toggler.abort();
    gate.add_permits(1);
    settle().await;

    // The state update still landed, locally and remotely.
    let state = store.snapshot().await.unwrap();
    assert_eq!(state.favorite_ids(), [1].into_iter().collect());
    assert_eq!(api.favorites().len(), 1);

    drop(store);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn handles_report_closed_after_the_store_task_ends() {
    let api = mock_api();
    let (actor, store) = SyncStore::new(api, 8);
    let task = tokio::spawn(actor.run());
    store.initialize().await.unwrap();

    task.abort();
    let _ = task.await;

    assert!(matches!(store.snapshot().await, Err(StoreError::Closed)));
    assert!(matches!(
        store.toggle_favorite(1).await,
        Err(StoreError::Closed)
    ));
}
