//! Error types for map feature handling

use thiserror::Error;

/// Errors loading vegetation features or querying feature info
#[derive(Debug, Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("Point ({lon}, {lat}) is outside the viewport")]
    OutsideViewport { lon: f64, lat: f64 },

    #[error("Feature info request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::InvalidGeoJson(e.to_string())
    }
}

/// Result type alias for map operations
pub type MapResult<T> = Result<T, MapError>;
