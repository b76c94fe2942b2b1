//! Plant catalog abstraction
//!
//! The [`PlantCatalog`] trait provides paginated access to the plant records
//! catalog. This allows the fetch pipeline to work with both the real HTTP
//! API and in-memory catalogs for testing.
//!
//! ## Implementations
//!
//! - [`MockCatalog`](crate::MockCatalog): In-memory catalog for testing
//! - `HttpCatalog`: The City of Melbourne open data API (in evc-catalog crate)

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CatalogError;
use crate::record::CatalogRecord;

/// One paginated request against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of records to return
    pub limit: usize,
    /// Pagination cursor; `None` leaves it to the server default
    pub offset: Option<usize>,
}

impl PageRequest {
    /// A request for a single record, used to discover the live schema
    pub fn sample() -> Self {
        Self {
            limit: 1,
            offset: None,
        }
    }

    /// A page starting at `offset`
    pub fn page(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset: Some(offset),
        }
    }

    /// Effective starting offset
    pub fn start(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Whether this is the schema discovery request
    pub fn is_sample(&self) -> bool {
        self.offset.is_none()
    }
}

/// One page of catalog records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Records on this page; absent or null in the response means none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<CatalogRecord>,
    /// Total records in the dataset, when the server reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<CatalogRecord>, D::Error> {
    Ok(Option::<Vec<CatalogRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CatalogPage {
    pub fn new(results: Vec<CatalogRecord>) -> Self {
        Self {
            results,
            total_count: None,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Paginated access to the plant records catalog
///
/// # Example
///
/// ```rust,ignore
/// use evc_core::{PageRequest, PlantCatalog};
///
/// async fn schema<C: PlantCatalog>(catalog: &C) -> Vec<String> {
///     let page = catalog.fetch_page(PageRequest::sample()).await?;
///     page.results[0].field_names().map(str::to_string).collect()
/// }
/// ```
#[async_trait]
pub trait PlantCatalog: Send + Sync {
    /// Fetch one page of records
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body cannot be decoded.
    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage, CatalogError>;

    /// Short description of the catalog for logging
    fn describe(&self) -> String {
        "plant catalog".to_string()
    }
}

#[async_trait]
impl<C: PlantCatalog + ?Sized> PlantCatalog for std::sync::Arc<C> {
    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage, CatalogError> {
        (**self).fetch_page(request).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
