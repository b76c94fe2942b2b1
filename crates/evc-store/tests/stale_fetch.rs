//! A plant request that finishes after the selection moved on must not
//! overwrite the newer state.

use std::sync::Arc;

use evc_catalog::{CatalogConfig, PlantFetcher};
use evc_core::{CatalogRecord, MockCatalog, Selection};
use evc_store::{MapStore, PlantsStatus, RequestOutcome};

/// Grassland-only and wetland-only species in one dataset
fn records() -> Vec<CatalogRecord> {
    let grass = (0..6).map(|i| {
        CatalogRecord::new()
            .with("species", format!("Grass {i}"))
            .with("grasslands_and_woodlands_on_fertile_plains", "3.1")
            .with("freshwater_wetland_zone_a", "")
    });
    let wetland = (0..4).map(|i| {
        CatalogRecord::new()
            .with("species", format!("Sedge {i}"))
            .with("grasslands_and_woodlands_on_fertile_plains", "")
            .with("freshwater_wetland_zone_a", "-")
    });
    grass.chain(wetland).collect()
}

fn setup() -> (Arc<MockCatalog>, Arc<MapStore<Arc<MockCatalog>>>) {
    let catalog = Arc::new(MockCatalog::new(records()));
    let store = MapStore::new(PlantFetcher::new(catalog.clone(), CatalogConfig::default()));
    (catalog, Arc::new(store))
}

async fn wait_for_in_flight(catalog: &MockCatalog, n: usize) {
    while catalog.in_flight() < n {
        tokio::task::yield_now().await;
    }
}

fn species(store: &MapStore<Arc<MockCatalog>>) -> Vec<String> {
    store
        .snapshot()
        .plants
        .iter()
        .filter_map(|p| p.species().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_stale_result_is_discarded() {
    let (catalog, store) = setup();
    store.select_code(Selection::new("132"));

    let hold = catalog.hold().await;
    let first = tokio::spawn({
        let store = store.clone();
        async move { store.request_plants().await }
    });
    wait_for_in_flight(&catalog, 1).await;
    assert!(store.snapshot().is_loading_plants);

    // User clicks another district while the first lookup is pending
    store.select_code(Selection::new("647"));
    assert!(!store.snapshot().is_loading_plants);
    drop(hold);

    assert_eq!(first.await.unwrap(), RequestOutcome::Discarded);
    let state = store.snapshot();
    assert_eq!(state.selection.as_ref().unwrap().code.as_str(), "647");
    assert!(state.plants.is_empty());
    assert_eq!(state.plants_status, PlantsStatus::NotRequested);

    assert_eq!(
        store.request_plants().await,
        RequestOutcome::Applied { count: 4 }
    );
    assert!(species(&store).iter().all(|s| s.starts_with("Sedge")));
}

#[tokio::test]
async fn test_newer_request_wins_regardless_of_completion_order() {
    let (catalog, store) = setup();
    store.select_code(Selection::new("132"));

    let hold = catalog.hold().await;
    let first = tokio::spawn({
        let store = store.clone();
        async move { store.request_plants().await }
    });
    wait_for_in_flight(&catalog, 1).await;

    store.select_code(Selection::new("647"));
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.request_plants().await }
    });
    wait_for_in_flight(&catalog, 2).await;
    drop(hold);

    let (first, second) = (first.await.unwrap(), second.await.unwrap());
    assert_eq!(first, RequestOutcome::Discarded);
    assert_eq!(second, RequestOutcome::Applied { count: 4 });

    let state = store.snapshot();
    assert!(!state.is_loading_plants);
    assert_eq!(state.plants_status, PlantsStatus::Loaded);
    assert!(species(&store).iter().all(|s| s.starts_with("Sedge")));
}

#[tokio::test]
async fn test_repeat_request_supersedes_earlier_one() {
    let (catalog, store) = setup();
    store.select_code(Selection::new("132"));

    let hold = catalog.hold().await;
    let first = tokio::spawn({
        let store = store.clone();
        async move { store.request_plants().await }
    });
    wait_for_in_flight(&catalog, 1).await;
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.request_plants().await }
    });
    wait_for_in_flight(&catalog, 2).await;
    drop(hold);

    assert_eq!(first.await.unwrap(), RequestOutcome::Discarded);
    assert_eq!(second.await.unwrap(), RequestOutcome::Applied { count: 6 });
    assert_eq!(species(&store).len(), 6);
}

#[tokio::test]
async fn test_subscribers_see_loading_then_plants() {
    let (_catalog, store) = setup();
    let mut rx = store.subscribe();

    store.select_code(Selection::new("647"));
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().plants.is_empty());

    store.request_plants().await;
    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.plants.len(), 4);
    assert!(!state.is_loading_plants);
}
