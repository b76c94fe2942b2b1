//! # EVC Store
//!
//! Session state for the atlas. The map writes a selection, the detail
//! panel asks for plants, and rendering consumers watch the result.
//!
//! ```rust,ignore
//! use evc_store::{MapStore, ViewMode};
//!
//! let store = MapStore::new(fetcher);
//! store.select_code(selection);
//! store.request_plants().await;
//! store.set_view_mode(ViewMode::Diorama);
//! let scene = evc_store::Diorama::seeded(&store.snapshot().plants, 7);
//! ```

pub mod diorama;
pub mod state;
pub mod store;

pub use diorama::{Diorama, Placement, PlantForm};
pub use state::{PlantsStatus, StoreState, ViewMode};
pub use store::{MapStore, RequestOutcome};
