//! # EVC Core
//!
//! Core types, static tables, and catalog traits for the pre-colonial
//! vegetation atlas.
//!
//! This crate holds everything the plant pipeline needs that does not touch
//! the network: the EVC code table, the likelihood ratings, the schema field
//! resolver, and the [`PlantCatalog`] trait that lets the same fetch logic run
//! against the real catalog API or an in-memory mock.
//!
//! ## Key Types
//!
//! - [`VegetationCode`]: Identifier of a vegetation district (EVC number)
//! - [`VegetationType`]: Coarse grouping of EVC codes
//! - [`LikelihoodCode`]: Confidence that a species historically occurred
//! - [`CatalogRecord`]: A record from the plant catalog with an unknown key set
//! - [`AnnotatedPlant`]: A catalog record tagged with likelihood and type
//! - [`Selection`]: The map selection shown in the detail panel
//!
//! ## Key Traits
//!
//! - [`PlantCatalog`]: Paginated access to the remote plant catalog

pub mod catalog;
pub mod code;
pub mod error;
pub mod likelihood;
pub mod mapping;
pub mod mock_catalog;
pub mod record;
pub mod resolver;
pub mod selection;
pub mod vegetation;

// Re-export main types
pub use catalog::*;
pub use code::*;
pub use error::*;
pub use likelihood::*;
pub use mapping::{codes_for, evc_name, lookup, EvcEntry, EVC_TABLE};
pub use mock_catalog::*;
pub use record::*;
pub use resolver::*;
pub use selection::*;
pub use vegetation::*;
