//! The EVC polygon layer
//!
//! Loads the pre-1750 EVC GeoJSON export and answers "which district is
//! under this point" for map clicks.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use evc_core::Selection;

use crate::error::{MapError, MapResult};
use crate::feature::{FeatureProperties, GeometryJson, VegetationFeature};

#[derive(Debug, Deserialize)]
struct FeatureCollectionJson {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<FeatureJson>,
}

#[derive(Debug, Deserialize)]
struct FeatureJson {
    #[serde(default)]
    geometry: Option<GeometryJson>,
    #[serde(default)]
    properties: Option<FeatureProperties>,
}

/// Vegetation polygons in file order
#[derive(Debug, Clone, Default)]
pub struct VegetationLayer {
    features: Vec<VegetationFeature>,
    skipped: usize,
}

impl VegetationLayer {
    pub fn new(features: Vec<VegetationFeature>) -> Self {
        Self {
            features,
            skipped: 0,
        }
    }

    /// Parse a GeoJSON `FeatureCollection`
    ///
    /// Features without a polygon geometry are skipped and counted; a
    /// malformed polygon fails the whole layer.
    pub fn from_geojson_str(geojson: &str) -> MapResult<Self> {
        let collection: FeatureCollectionJson = serde_json::from_str(geojson)?;
        if collection.kind != "FeatureCollection" {
            return Err(MapError::InvalidGeoJson(format!(
                "expected FeatureCollection, got {}",
                collection.kind
            )));
        }

        let mut features = Vec::with_capacity(collection.features.len());
        let mut skipped = 0;
        for (index, feature) in collection.features.into_iter().enumerate() {
            let geometry = match &feature.geometry {
                Some(g) => g.to_multi_polygon()?,
                None => None,
            };
            match geometry {
                Some(geometry) => features.push(VegetationFeature::new(
                    geometry,
                    feature.properties.unwrap_or_default(),
                )),
                None => {
                    warn!(
                        index,
                        kind = feature.geometry.as_ref().map(|g| g.kind.as_str()),
                        "Skipping feature without polygon geometry"
                    );
                    skipped += 1;
                }
            }
        }

        debug!(features = features.len(), skipped, "Parsed vegetation layer");
        Ok(Self { features, skipped })
    }

    /// Load a layer from a GeoJSON file
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> MapResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let layer = Self::from_geojson_str(&text)?;
        info!(features = layer.len(), "Loaded vegetation layer");
        Ok(layer)
    }

    pub fn features(&self) -> &[VegetationFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of features dropped while parsing
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// First feature covering the point
    pub fn feature_at(&self, lon: f64, lat: f64) -> Option<&VegetationFeature> {
        self.features.iter().find(|f| f.contains(lon, lat))
    }

    /// Selection for a click at the point
    ///
    /// `None` when nothing is under the point or the feature has no code.
    pub fn selection_at(&self, lon: f64, lat: f64) -> Option<Selection> {
        self.feature_at(lon, lat)?.selection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layer_json() -> String {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[144.0, -38.0], [145.0, -38.0], [145.0, -37.0], [144.0, -37.0], [144.0, -38.0]]]
                    },
                    "properties": {"evc": "132", "vegetation_type": "Grasslands and Woodlands on fertile plains"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [144.5, -37.5]},
                    "properties": {"evc": "53"}
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[144.4, -37.6], [144.6, -37.6], [144.6, -37.4], [144.4, -37.4], [144.4, -37.6]]]
                    },
                    "properties": {"evc": "647"}
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": {"evc": "9"}
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[150.0, -30.0], [151.0, -30.0], [151.0, -29.0], [150.0, -30.0]]]
                    },
                    "properties": null
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn test_parse_skips_non_polygons() {
        let layer = VegetationLayer::from_geojson_str(&layer_json()).unwrap();
        assert_eq!(layer.len(), 3);
        assert_eq!(layer.skipped(), 2);
    }

    #[test]
    fn test_first_matching_feature_wins() {
        let layer = VegetationLayer::from_geojson_str(&layer_json()).unwrap();
        // Inside both polygons: file order decides
        let feature = layer.feature_at(144.5, -37.5).unwrap();
        assert_eq!(feature.properties().evc.as_ref().unwrap().as_str(), "132");
        assert_eq!(feature.fill_color(), "#8BC34A");
    }

    #[test]
    fn test_selection_at() {
        let layer = VegetationLayer::from_geojson_str(&layer_json()).unwrap();
        let selection = layer.selection_at(144.1, -37.9).unwrap();
        assert_eq!(selection.title(), "EVC 132: Plains Grassland");

        assert!(layer.selection_at(100.0, 0.0).is_none());
        // Polygon without properties has no code
        assert!(layer.feature_at(150.8, -29.9).is_some());
        assert!(layer.selection_at(150.8, -29.9).is_none());
    }

    #[test]
    fn test_rejects_non_collection() {
        let result = VegetationLayer::from_geojson_str(r#"{"type": "Feature"}"#);
        assert!(matches!(result, Err(MapError::InvalidGeoJson(_))));

        let result = VegetationLayer::from_geojson_str("not json");
        assert!(matches!(result, Err(MapError::InvalidGeoJson(_))));
    }

    #[test]
    fn test_malformed_polygon_fails_layer() {
        let geojson = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": "nope"},
                "properties": {}
            }]
        })
        .to_string();
        assert!(matches!(
            VegetationLayer::from_geojson_str(&geojson),
            Err(MapError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_empty_collection() {
        let layer =
            VegetationLayer::from_geojson_str(r#"{"type": "FeatureCollection", "features": []}"#)
                .unwrap();
        assert!(layer.is_empty());
        assert!(layer.feature_at(144.0, -37.0).is_none());
    }
}
