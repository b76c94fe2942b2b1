//! The session store
//!
//! [`MapStore`] is the only mutator of [`StoreState`]. Every operation
//! applies its changes in a single `watch` update, so subscribers never see
//! a selection paired with another selection's plants.
//!
//! Plant requests are tagged with the selection epoch and a request
//! sequence number when they start. A result whose tag no longer matches
//! the state (because the user picked another district or asked again) is
//! dropped.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use evc_catalog::PlantFetcher;
use evc_core::{PlantCatalog, Selection, VegetationCode};

use crate::state::{PlantsStatus, StoreState, ViewMode};

/// What happened to a plant request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Nothing is selected
    NoSelection,
    /// Results were written to the state
    Applied { count: usize },
    /// The selection or request changed while fetching; results dropped
    Discarded,
}

/// Identifies the state a request was issued against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequestTag {
    epoch: u64,
    seq: u64,
}

impl RequestTag {
    fn matches(&self, state: &StoreState) -> bool {
        state.selection_epoch == self.epoch && state.request_seq == self.seq
    }
}

/// Selection, plants and view mode for one session
pub struct MapStore<C> {
    fetcher: Arc<PlantFetcher<C>>,
    state: watch::Sender<StoreState>,
}

impl<C: PlantCatalog> MapStore<C> {
    pub fn new(fetcher: PlantFetcher<C>) -> Self {
        Self::with_shared_fetcher(Arc::new(fetcher))
    }

    pub fn with_shared_fetcher(fetcher: Arc<PlantFetcher<C>>) -> Self {
        Self {
            fetcher,
            state: watch::Sender::new(StoreState::default()),
        }
    }

    pub fn fetcher(&self) -> &PlantFetcher<C> {
        &self.fetcher
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Make `selection` current
    ///
    /// Plants are cleared even when the code is unchanged, and any request
    /// still running for the previous selection becomes stale.
    pub fn select_code(&self, selection: Selection) {
        debug!(code = %selection.code, "Selecting EVC");
        self.state.send_modify(|state| {
            state.selection = Some(selection);
            state.selection_epoch += 1;
            Self::reset_plants(state);
        });
    }

    /// Return to the empty "click on the map" state
    pub fn clear_selection(&self) {
        self.state.send_if_modified(|state| {
            if state.selection.is_none() && state.plants.is_empty() {
                return false;
            }
            state.selection = None;
            state.selection_epoch += 1;
            Self::reset_plants(state);
            true
        });
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.state.send_if_modified(|state| {
            if state.view_mode == mode {
                return false;
            }
            state.view_mode = mode;
            true
        });
    }

    /// Fetch plants for the current selection
    ///
    /// Failures are absorbed: the state ends with no plants and
    /// [`PlantsStatus::Unavailable`].
    #[instrument(skip(self))]
    pub async fn request_plants(&self) -> RequestOutcome {
        let Some((tag, code)) = self.begin_request() else {
            debug!("No selection, nothing to fetch");
            return RequestOutcome::NoSelection;
        };

        let (plants, status) = match self.fetcher.try_fetch_plants(&code).await {
            Ok(query) => {
                if query.is_partial() {
                    warn!(code = %code, stop = ?query.stop, "Plant list is partial");
                }
                (query.plants, PlantsStatus::Loaded)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Plant lookup failed, showing no plants");
                (Vec::new(), PlantsStatus::Unavailable)
            }
        };

        let count = plants.len();
        let applied = self.state.send_if_modified(|state| {
            if !tag.matches(state) {
                return false;
            }
            state.plants = plants;
            state.is_loading_plants = false;
            state.plants_status = status;
            true
        });

        if applied {
            info!(code = %code, count, "Plants loaded");
            RequestOutcome::Applied { count }
        } else {
            debug!(
                code = %code,
                epoch = tag.epoch,
                seq = tag.seq,
                "Discarding stale plant results"
            );
            RequestOutcome::Discarded
        }
    }

    fn begin_request(&self) -> Option<(RequestTag, VegetationCode)> {
        let mut started = None;
        self.state.send_if_modified(|state| {
            let Some(selection) = &state.selection else {
                return false;
            };
            state.request_seq += 1;
            state.is_loading_plants = true;
            state.plants_status = PlantsStatus::Loading;
            started = Some((
                RequestTag {
                    epoch: state.selection_epoch,
                    seq: state.request_seq,
                },
                selection.code.clone(),
            ));
            true
        });
        started
    }

    fn reset_plants(state: &mut StoreState) {
        state.plants.clear();
        state.is_loading_plants = false;
        state.plants_status = PlantsStatus::NotRequested;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evc_catalog::CatalogConfig;
    use evc_core::{CatalogRecord, MockCatalog};

    fn records() -> Vec<CatalogRecord> {
        (0..5)
            .map(|i| {
                CatalogRecord::new()
                    .with("species", format!("Grass {i}"))
                    .with("grasslands_and_woodlands_on_fertile_plains", "-")
            })
            .collect()
    }

    fn store(catalog: MockCatalog) -> MapStore<MockCatalog> {
        MapStore::new(PlantFetcher::new(catalog, CatalogConfig::default()))
    }

    #[tokio::test]
    async fn test_request_without_selection() {
        let store = store(MockCatalog::new(records()));
        assert_eq!(store.request_plants().await, RequestOutcome::NoSelection);
        assert_eq!(store.fetcher().catalog().request_count(), 0);
        assert!(!store.snapshot().is_loading_plants);
    }

    #[tokio::test]
    async fn test_request_applies_plants() {
        let store = store(MockCatalog::new(records()));
        store.select_code(Selection::new("132"));

        assert_eq!(
            store.request_plants().await,
            RequestOutcome::Applied { count: 5 }
        );
        let state = store.snapshot();
        assert_eq!(state.plants.len(), 5);
        assert!(!state.is_loading_plants);
        assert_eq!(state.plants_status, PlantsStatus::Loaded);
    }

    #[tokio::test]
    async fn test_select_clears_plants() {
        let store = store(MockCatalog::new(records()));
        store.select_code(Selection::new("132"));
        store.request_plants().await;
        assert!(!store.snapshot().plants.is_empty());

        // Same code again still clears
        store.select_code(Selection::new("132"));
        let state = store.snapshot();
        assert!(state.plants.is_empty());
        assert_eq!(state.plants_status, PlantsStatus::NotRequested);
        assert_eq!(state.selection_epoch, 2);
    }

    #[tokio::test]
    async fn test_unmapped_code_is_unavailable() {
        let store = store(MockCatalog::new(records()));
        store.select_code(Selection::new("99999"));

        assert_eq!(
            store.request_plants().await,
            RequestOutcome::Applied { count: 0 }
        );
        let state = store.snapshot();
        assert!(state.plants.is_empty());
        assert_eq!(state.plants_status, PlantsStatus::Unavailable);
        assert_eq!(store.fetcher().catalog().request_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_is_unavailable() {
        let store = store(MockCatalog::new(records()).fail_sample());
        store.select_code(Selection::new("132"));
        store.request_plants().await;

        let state = store.snapshot();
        assert!(state.plants.is_empty());
        assert!(!state.is_loading_plants);
        assert_eq!(state.plants_status, PlantsStatus::Unavailable);
    }

    #[tokio::test]
    async fn test_view_mode_and_clear() {
        let store = store(MockCatalog::new(records()));
        let mut rx = store.subscribe();

        store.set_view_mode(ViewMode::Diorama);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        // Unchanged mode does not notify
        store.set_view_mode(ViewMode::Diorama);
        assert!(!rx.has_changed().unwrap());

        store.select_code(Selection::new("132"));
        store.request_plants().await;
        store.clear_selection();

        let state = store.snapshot();
        assert!(state.selection.is_none());
        assert!(state.plants.is_empty());
        assert_eq!(state.view_mode, ViewMode::Diorama);
    }
}
