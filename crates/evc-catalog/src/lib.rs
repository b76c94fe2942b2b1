//! # EVC Catalog
//!
//! Access to the pre-colonial plant catalog and the pipeline that turns an
//! EVC code into a ranked list of plants.
//!
//! ## Example
//!
//! ```rust,ignore
//! use evc_catalog::{CatalogConfig, HttpCatalog, PlantFetcher};
//!
//! let config = CatalogConfig::default();
//! let fetcher = PlantFetcher::new(HttpCatalog::new(&config)?, config);
//!
//! for plant in fetcher.fetch_plants(&"132".into()).await {
//!     println!("{} {:?}", plant.likelihood(), plant.species());
//! }
//! ```

pub mod config;
pub mod fetcher;
pub mod http;

pub use config::CatalogConfig;
pub use fetcher::{annotate_page, rank_plants, PaginationStop, PlantFetcher, PlantQuery};
pub use http::HttpCatalog;
