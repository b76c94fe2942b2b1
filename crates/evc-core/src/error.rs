//! Error types for the vegetation atlas

use thiserror::Error;

/// Top-level error type for the plant pipeline
#[derive(Debug, Error)]
pub enum EvcError {
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl EvcError {
    /// Whether this error came from the remote catalog rather than a lookup miss
    pub fn is_remote(&self) -> bool {
        matches!(self, EvcError::Catalog(_))
    }
}

/// Errors resolving a code or vegetation type to catalog data
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("No vegetation type mapped for EVC {0}")]
    UnmappedCode(String),

    #[error("No catalog field matches vegetation type '{vegetation_type}' ({available} fields available)")]
    NoMatchingField {
        vegetation_type: String,
        available: usize,
    },
}

/// Errors talking to the remote plant catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Sample request returned no records")]
    EmptySample,
}

/// Result type alias for pipeline operations
pub type EvcResult<T> = Result<T, EvcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_display() {
        let err = ResolutionError::UnmappedCode("9999".to_string());
        assert!(format!("{}", err).contains("9999"));

        let err = ResolutionError::NoMatchingField {
            vegetation_type: "Saltmarsh".to_string(),
            available: 12,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Saltmarsh"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_catalog_error_display() {
        assert!(format!("{}", CatalogError::HttpStatus(503)).contains("503"));
        assert!(format!("{}", CatalogError::Timeout(250)).contains("250 ms"));
        assert!(format!("{}", CatalogError::EmptySample).contains("no records"));

        let err = CatalogError::RequestFailed("connection refused".to_string());
        assert!(format!("{}", err).contains("connection refused"));
    }

    #[test]
    fn test_error_conversions() {
        let err: EvcError = ResolutionError::UnmappedCode("1".into()).into();
        assert!(matches!(err, EvcError::Resolution(_)));
        assert!(!err.is_remote());

        let err: EvcError = CatalogError::EmptySample.into();
        assert!(matches!(err, EvcError::Catalog(_)));
        assert!(err.is_remote());
        assert!(format!("{}", err).contains("Catalog error"));
    }
}
