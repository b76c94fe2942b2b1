//! WMS GetFeatureInfo for the EVC layer
//!
//! When the map is rendered from a WMS tile service instead of a local
//! GeoJSON file, clicks are resolved by asking the server which feature
//! lies under the clicked pixel.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use evc_core::Selection;

use crate::error::{MapError, MapResult};
use crate::feature::FeatureProperties;

/// Visible map extent in EPSG:4326 and its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Validated viewport
    pub fn new(west: f64, south: f64, east: f64, north: f64, width: u32, height: u32) -> MapResult<Self> {
        let viewport = Self {
            west,
            south,
            east,
            north,
            width,
            height,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> MapResult<()> {
        if !(self.west < self.east) || !(self.south < self.north) {
            return Err(MapError::InvalidViewport(format!(
                "empty extent {}",
                self.bbox_param()
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidViewport(format!(
                "empty size {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// `BBOX` parameter: `west,south,east,north`
    pub fn bbox_param(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }

    /// Pixel under a coordinate, origin top-left
    pub fn pixel_at(&self, lon: f64, lat: f64) -> MapResult<(u32, u32)> {
        self.validate()?;
        if lon < self.west || lon > self.east || lat < self.south || lat > self.north {
            return Err(MapError::OutsideViewport { lon, lat });
        }
        let fx = (lon - self.west) / (self.east - self.west) * f64::from(self.width);
        let fy = (self.north - lat) / (self.north - self.south) * f64::from(self.height);
        // Points on the east or south edge land one past the last pixel
        let x = (fx.floor() as u32).min(self.width - 1);
        let y = (fy.floor() as u32).min(self.height - 1);
        Ok((x, y))
    }
}

/// A WMS 1.1.1 GetFeatureInfo query for one click
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureInfoRequest {
    pub layer: String,
    pub lon: f64,
    pub lat: f64,
    pub viewport: Viewport,
}

impl FeatureInfoRequest {
    pub fn new(layer: impl Into<String>, lon: f64, lat: f64, viewport: Viewport) -> Self {
        Self {
            layer: layer.into(),
            lon,
            lat,
            viewport,
        }
    }

    /// Query string parameters, in the order servers document them
    pub fn query_params(&self) -> MapResult<Vec<(&'static str, String)>> {
        let (x, y) = self.viewport.pixel_at(self.lon, self.lat)?;
        Ok(vec![
            ("SERVICE", "WMS".to_string()),
            ("VERSION", "1.1.1".to_string()),
            ("REQUEST", "GetFeatureInfo".to_string()),
            ("LAYERS", self.layer.clone()),
            ("QUERY_LAYERS", self.layer.clone()),
            ("STYLES", String::new()),
            ("SRS", "EPSG:4326".to_string()),
            ("BBOX", self.viewport.bbox_param()),
            ("WIDTH", self.viewport.width.to_string()),
            ("HEIGHT", self.viewport.height.to_string()),
            ("X", x.to_string()),
            ("Y", y.to_string()),
            ("INFO_FORMAT", "application/json".to_string()),
            ("FEATURE_COUNT", "1".to_string()),
        ])
    }
}

#[derive(Debug, Deserialize)]
struct FeatureInfoJson {
    #[serde(default)]
    features: Vec<FeatureInfoEntry>,
}

#[derive(Debug, Deserialize)]
struct FeatureInfoEntry {
    #[serde(default)]
    properties: Option<FeatureProperties>,
}

/// Selection from a GetFeatureInfo JSON answer
///
/// Only the first returned feature is used. `Ok(None)` means the click hit
/// no district, or the first feature has no EVC code.
pub fn parse_feature_info(body: &str) -> MapResult<Option<Selection>> {
    let info: FeatureInfoJson = serde_json::from_str(body)?;
    Ok(info
        .features
        .first()
        .and_then(|f| f.properties.as_ref())
        .and_then(FeatureProperties::to_selection))
}

/// WMS service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmsConfig {
    /// Service base URL
    pub endpoint: String,
    /// Layer holding the EVC polygons
    pub layer: String,
}

/// GetFeatureInfo client
#[derive(Debug, Clone)]
pub struct WmsClient {
    client: reqwest::Client,
    config: WmsConfig,
}

impl WmsClient {
    pub fn new(config: WmsConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: WmsConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &WmsConfig {
        &self.config
    }

    /// Selection under a click, as reported by the server
    #[instrument(skip(self, viewport), fields(layer = %self.config.layer))]
    pub async fn feature_info(
        &self,
        lon: f64,
        lat: f64,
        viewport: Viewport,
    ) -> MapResult<Option<Selection>> {
        let request = FeatureInfoRequest::new(self.config.layer.clone(), lon, lat, viewport);
        let params = request.query_params()?;

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Feature info request failed");
                MapError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Feature info returned non-success status");
            return Err(MapError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MapError::RequestFailed(e.to_string()))?;
        let selection = parse_feature_info(&body)?;
        debug!(
            code = selection.as_ref().map(|s| s.code.as_str()),
            "Feature info resolved"
        );
        Ok(selection)
    }
}
