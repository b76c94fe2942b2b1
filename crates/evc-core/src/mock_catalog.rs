//! Mock catalog implementation for testing
//!
//! Provides an in-memory plant catalog for testing the fetch pipeline and the
//! application store without a network connection.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use evc_core::{CatalogRecord, MockCatalog, PageRequest, PlantCatalog};
//!
//! let records = vec![CatalogRecord::new().with("species", "Themeda triandra")];
//! let catalog = MockCatalog::new(records).fail_at_offset(100);
//!
//! let page = catalog.fetch_page(PageRequest::page(100, 0)).await.unwrap();
//! assert_eq!(catalog.request_count(), 1);
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::catalog::{CatalogPage, PageRequest, PlantCatalog};
use crate::error::CatalogError;
use crate::record::CatalogRecord;

/// Sample response override
#[derive(Debug, Clone)]
enum SampleMode {
    /// First record of the dataset
    FirstRecord,
    /// A fixed record
    Fixed(CatalogRecord),
    /// No records
    Empty,
    /// Request fails
    Fail,
}

/// An in-memory plant catalog
///
/// Pages are served by slicing the record list. Every request is logged so
/// tests can assert on pagination, and individual offsets can be made to
/// fail or hang.
pub struct MockCatalog {
    records: Vec<CatalogRecord>,
    sample: SampleMode,
    failing_offsets: HashSet<usize>,
    stalled_offsets: HashSet<usize>,
    requests: Mutex<Vec<PageRequest>>,
    in_flight: AtomicUsize,
    gate: Arc<RwLock<()>>,
}

impl MockCatalog {
    /// Create a catalog serving the given records
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records,
            sample: SampleMode::FirstRecord,
            failing_offsets: HashSet::new(),
            stalled_offsets: HashSet::new(),
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            gate: Arc::new(RwLock::new(())),
        }
    }

    /// Serve this record for the schema discovery request
    pub fn with_sample(mut self, record: CatalogRecord) -> Self {
        self.sample = SampleMode::Fixed(record);
        self
    }

    /// Answer the schema discovery request with no records
    pub fn with_empty_sample(mut self) -> Self {
        self.sample = SampleMode::Empty;
        self
    }

    /// Fail the schema discovery request
    pub fn fail_sample(mut self) -> Self {
        self.sample = SampleMode::Fail;
        self
    }

    /// Fail the page starting at `offset`
    pub fn fail_at_offset(mut self, offset: usize) -> Self {
        self.failing_offsets.insert(offset);
        self
    }

    /// Never answer the page starting at `offset`
    pub fn stall_at_offset(mut self, offset: usize) -> Self {
        self.stalled_offsets.insert(offset);
        self
    }

    /// Block every request until the returned guard is dropped
    ///
    /// Requests issued while the hold is active count as in flight.
    pub async fn hold(&self) -> OwnedRwLockWriteGuard<()> {
        self.gate.clone().write_owned().await
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    /// Number of requests started but not yet answered
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn log(&self, request: PageRequest) {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request),
            Err(poisoned) => poisoned.into_inner().push(request),
        }
    }

    fn serve(&self, request: PageRequest) -> Result<CatalogPage, CatalogError> {
        if request.is_sample() {
            return match &self.sample {
                SampleMode::FirstRecord => Ok(CatalogPage::new(
                    self.records.iter().take(request.limit).cloned().collect(),
                )),
                SampleMode::Fixed(record) => Ok(CatalogPage::new(vec![record.clone()])),
                SampleMode::Empty => Ok(CatalogPage::default()),
                SampleMode::Fail => Err(CatalogError::HttpStatus(500)),
            };
        }

        let start = request.start();
        if self.failing_offsets.contains(&start) {
            return Err(CatalogError::RequestFailed(format!(
                "injected failure at offset {}",
                start
            )));
        }

        let page = self
            .records
            .iter()
            .skip(start)
            .take(request.limit)
            .cloned()
            .collect();
        Ok(CatalogPage {
            results: page,
            total_count: Some(self.records.len() as u64),
        })
    }
}

/// Counts a request as in flight until dropped, including on cancellation
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PlantCatalog for MockCatalog {
    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage, CatalogError> {
        self.log(request);
        let _in_flight = InFlight::enter(&self.in_flight);

        let _gate = self.gate.read().await;
        if !request.is_sample() && self.stalled_offsets.contains(&request.start()) {
            std::future::pending::<()>().await;
        }
        self.serve(request)
    }

    fn describe(&self) -> String {
        format!("mock catalog ({} records)", self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<CatalogRecord> {
        (0..n)
            .map(|i| CatalogRecord::new().with("id", i as u64))
            .collect()
    }

    #[tokio::test]
    async fn test_pages_are_sliced() {
        let catalog = MockCatalog::new(records(250));

        let first = catalog.fetch_page(PageRequest::page(100, 0)).await.unwrap();
        assert_eq!(first.len(), 100);
        assert_eq!(first.total_count, Some(250));

        let last = catalog.fetch_page(PageRequest::page(100, 200)).await.unwrap();
        assert_eq!(last.len(), 50);

        let past_end = catalog.fetch_page(PageRequest::page(100, 300)).await.unwrap();
        assert!(past_end.is_empty());

        assert_eq!(catalog.request_count(), 3);
        assert_eq!(catalog.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_sample_modes() {
        let catalog = MockCatalog::new(records(5));
        let page = catalog.fetch_page(PageRequest::sample()).await.unwrap();
        assert_eq!(page.len(), 1);

        let fixed = MockCatalog::new(records(5)).with_sample(CatalogRecord::new().with("x", 1));
        let page = fixed.fetch_page(PageRequest::sample()).await.unwrap();
        assert_eq!(page.results[0].field_names().collect::<Vec<_>>(), vec!["x"]);

        let empty = MockCatalog::new(records(5)).with_empty_sample();
        assert!(empty.fetch_page(PageRequest::sample()).await.unwrap().is_empty());

        let failing = MockCatalog::new(records(5)).fail_sample();
        assert!(failing.fetch_page(PageRequest::sample()).await.is_err());
    }

    #[test]
    fn test_request_log() {
        let catalog = MockCatalog::new(records(3));
        tokio_test::block_on(async {
            catalog.fetch_page(PageRequest::sample()).await.unwrap();
            catalog.fetch_page(PageRequest::page(100, 0)).await.unwrap();
        });
        assert_eq!(
            catalog.requests(),
            vec![PageRequest::sample(), PageRequest::page(100, 0)]
        );
        assert_eq!(catalog.request_count(), 2);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let catalog = MockCatalog::new(records(300)).fail_at_offset(100);
        assert!(catalog.fetch_page(PageRequest::page(100, 0)).await.is_ok());
        assert!(matches!(
            catalog.fetch_page(PageRequest::page(100, 100)).await,
            Err(CatalogError::RequestFailed(_))
        ));
        assert_eq!(catalog.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_hold_blocks_requests() {
        let catalog = Arc::new(MockCatalog::new(records(3)));
        let hold = catalog.hold().await;

        let task = {
            let catalog = catalog.clone();
            tokio::spawn(async move { catalog.fetch_page(PageRequest::page(100, 0)).await })
        };

        while catalog.in_flight() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!task.is_finished());

        drop(hold);
        let page = task.await.unwrap().unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(catalog.in_flight(), 0);
    }
}
