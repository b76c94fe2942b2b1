//! Observable session state

use serde::{Deserialize, Serialize};

use evc_core::{AnnotatedPlant, Selection};

/// Which view the consumer renders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Map,
    Diorama,
}

/// Where the plant list of the current selection stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantsStatus {
    /// No request made for this selection yet
    #[default]
    NotRequested,
    /// A request is running
    Loading,
    /// The lookup finished; the list may still be empty
    Loaded,
    /// The lookup failed: unmapped code, no schema column, or unreachable catalog
    Unavailable,
}

/// Everything a rendering consumer reads
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreState {
    pub selection: Option<Selection>,
    pub plants: Vec<AnnotatedPlant>,
    pub is_loading_plants: bool,
    pub plants_status: PlantsStatus,
    pub view_mode: ViewMode,
    /// Bumped on every selection change
    pub selection_epoch: u64,
    /// Bumped on every plant request
    pub request_seq: u64,
}

impl StoreState {
    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// Whether the "Show Plants" action applies
    pub fn can_request_plants(&self) -> bool {
        self.selection.is_some() && !self.is_loading_plants
    }
}
