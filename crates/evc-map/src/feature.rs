//! Vegetation polygon features and their metadata

use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use evc_core::{vegetation_color, Selection, VegetationCode, DEFAULT_VEGETATION_COLOR};

use crate::error::{MapError, MapResult};

/// Metadata attached to an EVC polygon
///
/// Property names follow the DELWP EVC layer. WMS servers often report
/// them upper-cased, so both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default, alias = "EVC", deserialize_with = "lenient_code")]
    pub evc: Option<VegetationCode>,
    #[serde(default, rename = "x_evcname", alias = "X_EVCNAME")]
    pub evc_name: Option<String>,
    #[serde(default, alias = "BIOREGION")]
    pub bioregion: Option<String>,
    #[serde(default, rename = "evc_bcs", alias = "EVC_BCS")]
    pub conservation_code: Option<String>,
    #[serde(default, rename = "evc_bcs_desc", alias = "EVC_BCS_DESC")]
    pub conservation_description: Option<String>,
    #[serde(default, alias = "VEGETATION_TYPE")]
    pub vegetation_type: Option<String>,
    #[serde(default, rename = "x_groupname", alias = "X_GROUPNAME")]
    pub group_name: Option<String>,
    #[serde(default, rename = "x_subgroupname", alias = "X_SUBGROUPNAME")]
    pub subgroup_name: Option<String>,
}

/// Codes arrive as strings, numbers, blanks or nulls depending on the export
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<VegetationCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(VegetationCode::from_json))
}

impl FeatureProperties {
    /// Selection for this feature, if it carries an EVC code
    pub fn to_selection(&self) -> Option<Selection> {
        let code = self.evc.clone()?;
        let mut selection = Selection::new(code);
        if let Some(name) = non_empty(&self.evc_name) {
            selection = selection.with_evc_name(name);
        }
        selection.bioregion = non_empty(&self.bioregion).map(str::to_string);
        selection.conservation_code = non_empty(&self.conservation_code).map(str::to_string);
        selection.conservation_description =
            non_empty(&self.conservation_description).map(str::to_string);
        selection.vegetation_label = non_empty(&self.vegetation_type).map(str::to_string);
        selection.group_name = non_empty(&self.group_name).map(str::to_string);
        selection.subgroup_name = non_empty(&self.subgroup_name).map(str::to_string);
        Some(selection)
    }

    /// Fill color from the layer's vegetation type label
    pub fn fill_color(&self) -> &'static str {
        match non_empty(&self.vegetation_type) {
            Some(label) => vegetation_color(label),
            None => DEFAULT_VEGETATION_COLOR,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A polygon of the vegetation layer
#[derive(Debug, Clone)]
pub struct VegetationFeature {
    geometry: MultiPolygon<f64>,
    properties: FeatureProperties,
}

impl VegetationFeature {
    pub fn new(geometry: MultiPolygon<f64>, properties: FeatureProperties) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    pub fn properties(&self) -> &FeatureProperties {
        &self.properties
    }

    /// Whether the polygon covers the point (boundary excluded)
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.geometry.contains(&Point::new(lon, lat))
    }

    pub fn fill_color(&self) -> &'static str {
        self.properties.fill_color()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.properties.to_selection()
    }
}

/// GeoJSON geometry before conversion
#[derive(Debug, Deserialize)]
pub(crate) struct GeometryJson {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl GeometryJson {
    /// Convert to a multipolygon
    ///
    /// Returns `Ok(None)` for geometry kinds that cannot be hit-tested.
    pub fn to_multi_polygon(&self) -> MapResult<Option<MultiPolygon<f64>>> {
        match self.kind.as_str() {
            "Polygon" => {
                let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(self.coordinates.clone())
                    .map_err(|e| MapError::InvalidGeometry(e.to_string()))?;
                Ok(Some(MultiPolygon::new(vec![polygon(rings)?])))
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<Vec<f64>>>> =
                    serde_json::from_value(self.coordinates.clone())
                        .map_err(|e| MapError::InvalidGeometry(e.to_string()))?;
                let polygons = polygons
                    .into_iter()
                    .map(polygon)
                    .collect::<MapResult<Vec<_>>>()?;
                Ok(Some(MultiPolygon::new(polygons)))
            }
            _ => Ok(None),
        }
    }
}

fn polygon(rings: Vec<Vec<Vec<f64>>>) -> MapResult<Polygon<f64>> {
    let mut rings = rings.into_iter().map(ring);
    let exterior = rings
        .next()
        .ok_or_else(|| MapError::InvalidGeometry("polygon without rings".into()))??;
    let interiors = rings.collect::<MapResult<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn ring(positions: Vec<Vec<f64>>) -> MapResult<LineString<f64>> {
    if positions.len() < 3 {
        return Err(MapError::InvalidGeometry(format!(
            "ring needs at least 3 positions, got {}",
            positions.len()
        )));
    }
    positions
        .into_iter()
        .map(|p| match p.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(MapError::InvalidGeometry(format!(
                "position needs 2 ordinates, got {}",
                p.len()
            ))),
        })
        .collect::<MapResult<Vec<_>>>()
        .map(LineString::new)
}
