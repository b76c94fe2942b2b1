//! # EVC Map
//!
//! Map-side metadata for the atlas: the EVC polygon layer, point
//! hit-testing for clicks, and WMS GetFeatureInfo for tiled maps.
//!
//! ```rust,ignore
//! use evc_map::VegetationLayer;
//!
//! let layer = VegetationLayer::load("data/evc_1750.geojson")?;
//! if let Some(selection) = layer.selection_at(144.96, -37.81) {
//!     println!("{}", selection.title());
//! }
//! ```

pub mod error;
pub mod feature;
pub mod layer;
pub mod wms;

pub use error::{MapError, MapResult};
pub use feature::{FeatureProperties, VegetationFeature};
pub use layer::VegetationLayer;
pub use wms::{parse_feature_info, FeatureInfoRequest, Viewport, WmsClient, WmsConfig};
