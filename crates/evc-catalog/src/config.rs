//! Configuration for the plant catalog client

use serde::{Deserialize, Deserializer, Serialize};

/// City of Melbourne pre-colonial plant list, Opendatasoft records API
pub const DEFAULT_ENDPOINT: &str = "https://data.melbourne.vic.gov.au/api/explore/v2.1/catalog/datasets/pre-colonial-plant-list/records";

/// Records requested per page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Maximum plants returned for one query
pub const DEFAULT_MAX_PLANTS: usize = 50;

/// Timeout for a single catalog request in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 20_000;

/// Configuration for catalog access and the fetch pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Records endpoint URL
    pub endpoint: String,
    /// Records requested per page, at least 1
    #[serde(deserialize_with = "at_least_one")]
    pub page_size: usize,
    /// Maximum plants kept after ranking
    pub max_plants: usize,
    /// Timeout for each catalog request in milliseconds
    pub request_timeout_ms: u64,
}

fn at_least_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    Ok(usize::deserialize(deserializer)?.max(1))
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_plants: DEFAULT_MAX_PLANTS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl CatalogConfig {
    /// Create a configuration for a custom endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Set the page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the result cap
    pub fn with_max_plants(mut self, max_plants: usize) -> Self {
        self.max_plants = max_plants;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Per-request timeout as a duration
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }
}
