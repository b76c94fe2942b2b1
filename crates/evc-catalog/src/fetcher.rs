//! Plant fetch pipeline
//!
//! Turns an EVC code into a ranked, capped list of plants:
//!
//! 1. Map the code to a vegetation type (no request if unmapped)
//! 2. Fetch one sample record to learn the live schema
//! 3. Resolve which field holds the type's likelihood codes
//! 4. Page through the catalog, keeping records with a valid code
//! 5. Stable-sort by likelihood rank and truncate
//!
//! Pagination stops once enough plants are collected, when a page comes back
//! short or empty, or when a page request fails. A failed page keeps what was already
//! gathered.

use tracing::{debug, info, instrument, warn};

use evc_core::{
    lookup, resolve_field, AnnotatedPlant, CatalogError, CatalogPage, CatalogRecord, EvcResult,
    PageRequest, PlantCatalog, ResolutionError, VegetationCode, VegetationType,
};

use crate::config::CatalogConfig;

/// Why pagination ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationStop {
    /// Collected at least the configured number of plants
    Enough,
    /// A page returned fewer records than requested
    EndOfData,
    /// A page request failed; results are partial
    PageFailed(String),
}

/// Result of a plant query, with diagnostics
#[derive(Debug, Clone)]
pub struct PlantQuery {
    /// Code that was queried
    pub code: VegetationCode,
    /// Vegetation type the code maps to
    pub vegetation_type: VegetationType,
    /// Catalog field used for likelihood codes
    pub field: String,
    /// Ranked, capped plants
    pub plants: Vec<AnnotatedPlant>,
    /// Pages fetched successfully (excluding the sample)
    pub pages_fetched: usize,
    /// Records examined across all pages
    pub records_scanned: usize,
    /// Why pagination ended
    pub stop: PaginationStop,
}

impl PlantQuery {
    /// Whether pagination was cut short by a failed page
    pub fn is_partial(&self) -> bool {
        matches!(self.stop, PaginationStop::PageFailed(_))
    }
}

/// Keep the records of a page that carry a valid likelihood code in `field`
pub fn annotate_page(
    records: Vec<CatalogRecord>,
    field: &str,
    vegetation_type: VegetationType,
) -> Vec<AnnotatedPlant> {
    records
        .into_iter()
        .filter_map(|record| AnnotatedPlant::from_record(record, field, vegetation_type))
        .collect()
}

/// Stable sort by likelihood, most certain first
pub fn rank_plants(plants: &mut [AnnotatedPlant]) {
    plants.sort_by_key(|p| p.likelihood().rank());
}

/// Runs plant queries against a catalog
pub struct PlantFetcher<C> {
    catalog: C,
    config: CatalogConfig,
}

impl<C: PlantCatalog> PlantFetcher<C> {
    pub fn new(catalog: C, config: CatalogConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Fetch the ranked plant list for a code
    ///
    /// Never fails: unmapped codes, schema mismatches and remote failures all
    /// produce an empty list. Use [`try_fetch_plants`](Self::try_fetch_plants)
    /// to tell them apart.
    pub async fn fetch_plants(&self, code: &VegetationCode) -> Vec<AnnotatedPlant> {
        match self.try_fetch_plants(code).await {
            Ok(query) => query.plants,
            Err(e) => {
                warn!(code = %code, error = %e, "Plant lookup failed, returning no plants");
                Vec::new()
            }
        }
    }

    /// Fetch the ranked plant list for a code, reporting why it may be empty
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::UnmappedCode`] if the code has no vegetation type
    /// - [`ResolutionError::NoMatchingField`] if the live schema has no column for the type
    /// - [`CatalogError`] if the schema sample cannot be fetched
    ///
    /// Failures after the sample do not error; they end pagination and the
    /// query is marked partial.
    #[instrument(skip(self, code), fields(code = %code))]
    pub async fn try_fetch_plants(&self, code: &VegetationCode) -> EvcResult<PlantQuery> {
        let vegetation_type =
            lookup(code).ok_or_else(|| ResolutionError::UnmappedCode(code.to_string()))?;
        debug!(vegetation_type = %vegetation_type, "EVC mapped to vegetation type");

        let field = self.discover_field(vegetation_type).await?;
        debug!(field = %field, "Using catalog field");

        let page_size = self.config.page_size.max(1);
        let mut plants: Vec<AnnotatedPlant> = Vec::new();
        let mut offset = 0;
        let mut pages_fetched = 0;
        let mut records_scanned = 0;

        let stop = loop {
            if plants.len() >= self.config.max_plants {
                break PaginationStop::Enough;
            }

            let page = match self.request(PageRequest::page(page_size, offset)).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(offset, error = %e, "Catalog page failed, keeping partial results");
                    break PaginationStop::PageFailed(e.to_string());
                }
            };
            pages_fetched += 1;

            let count = page.len();
            records_scanned += count;
            plants.extend(annotate_page(page.results, &field, vegetation_type));

            if count == 0 || count < page_size {
                break PaginationStop::EndOfData;
            }
            offset += page_size;
        };

        rank_plants(&mut plants);
        plants.truncate(self.config.max_plants);

        info!(
            vegetation_type = %vegetation_type,
            plants = plants.len(),
            pages = pages_fetched,
            stop = ?stop,
            "Plant query complete"
        );

        Ok(PlantQuery {
            code: code.clone(),
            vegetation_type,
            field,
            plants,
            pages_fetched,
            records_scanned,
            stop,
        })
    }

    /// Learn the live schema from one record and resolve the type's field
    async fn discover_field(&self, vegetation_type: VegetationType) -> EvcResult<String> {
        let sample = self.request(PageRequest::sample()).await?;
        let record = sample.results.first().ok_or(CatalogError::EmptySample)?;

        match resolve_field(record.field_names(), vegetation_type.label()) {
            Some(field) => Ok(field.to_string()),
            None => {
                debug!(
                    available = ?record.field_names().collect::<Vec<_>>(),
                    "No catalog field for vegetation type"
                );
                Err(ResolutionError::NoMatchingField {
                    vegetation_type: vegetation_type.label().to_string(),
                    available: record.len(),
                }
                .into())
            }
        }
    }

    /// One catalog request bounded by the configured timeout
    async fn request(&self, request: PageRequest) -> Result<CatalogPage, CatalogError> {
        let timeout_ms = self.config.request_timeout_ms;
        tokio::time::timeout(self.config.request_timeout(), self.catalog.fetch_page(request))
            .await
            .map_err(|_| {
                warn!(timeout_ms, offset = ?request.offset, "Catalog request timed out");
                CatalogError::Timeout(timeout_ms)
            })?
    }
}
