//! HTTP access to the plant catalog
//!
//! [`HttpCatalog`] implements [`PlantCatalog`] over the Opendatasoft records
//! API: `GET <endpoint>?limit=N&offset=M` answering `{"results": [...]}`.

use async_trait::async_trait;
use tracing::{debug, warn};

use evc_core::{CatalogError, CatalogPage, PageRequest, PlantCatalog};

use crate::config::CatalogConfig;

/// Plant catalog backed by the remote records API
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCatalog {
    /// Build a client for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CatalogError::RequestFailed(format!("http client init failed: {e}")))?;
        Ok(Self::with_client(client, config.endpoint.clone()))
    }

    /// Use an existing client
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query parameters for a page request
    pub fn query_params(request: &PageRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", request.limit.to_string())];
        if let Some(offset) = request.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

#[async_trait]
impl PlantCatalog for HttpCatalog {
    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage, CatalogError> {
        debug!(
            limit = request.limit,
            offset = ?request.offset,
            "Requesting catalog page"
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .query(&Self::query_params(&request))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "Catalog request failed");
                CatalogError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Catalog returned non-success status");
            return Err(CatalogError::HttpStatus(status.as_u16()));
        }

        response
            .json::<CatalogPage>()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_omits_offset() {
        let params = HttpCatalog::query_params(&PageRequest::sample());
        assert_eq!(params, vec![("limit", "1".to_string())]);
    }

    #[test]
    fn test_page_params() {
        let params = HttpCatalog::query_params(&PageRequest::page(100, 300));
        assert_eq!(
            params,
            vec![("limit", "100".to_string()), ("offset", "300".to_string())]
        );
    }

    #[test]
    fn test_client_from_config() {
        let catalog = HttpCatalog::new(&CatalogConfig::default()).unwrap();
        assert!(catalog.endpoint().starts_with("https://data.melbourne.vic.gov.au"));
        assert_eq!(catalog.describe(), catalog.endpoint());
    }
}
