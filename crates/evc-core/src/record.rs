//! Catalog records and annotated plants

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::likelihood::LikelihoodCode;
use crate::vegetation::VegetationType;

/// Field holding the plant's common name
pub const COMMON_NAME_FIELD: &str = "common_name_s";

/// Field holding the plant's scientific name
pub const SPECIES_FIELD: &str = "species";

/// Key added to serialised plants for the likelihood code
pub const LIKELIHOOD_KEY: &str = "_likelihoodCode";

/// Key added to serialised plants for the vegetation type
pub const VEGETATION_TYPE_KEY: &str = "_vegetationType";

/// A record from the plant catalog
///
/// The catalog schema is not fixed, so a record is just an ordered map of
/// field names to JSON values. Field order is the order the API sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogRecord(Map<String, Value>);

impl CatalogRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Field names in the order the catalog sent them
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value of a field, if present
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of a field, if present and a non-empty string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Likelihood code stored in a field, if present and valid
    pub fn likelihood(&self, field: &str) -> Option<LikelihoodCode> {
        self.0.get(field).and_then(LikelihoodCode::from_value)
    }

    /// Set a field, returning the record for chaining
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for CatalogRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A plant record annotated for one vegetation type
///
/// Created only by the fetch pipeline and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedPlant {
    record: CatalogRecord,
    likelihood: LikelihoodCode,
    vegetation_type: VegetationType,
}

impl AnnotatedPlant {
    /// Annotate a record whose likelihood column has already been read
    pub fn new(
        record: CatalogRecord,
        likelihood: LikelihoodCode,
        vegetation_type: VegetationType,
    ) -> Self {
        Self {
            record,
            likelihood,
            vegetation_type,
        }
    }

    /// Annotate a record using the value in `field`
    ///
    /// Returns `None` if the field is missing or not a valid likelihood code.
    pub fn from_record(
        record: CatalogRecord,
        field: &str,
        vegetation_type: VegetationType,
    ) -> Option<Self> {
        let likelihood = record.likelihood(field)?;
        Some(Self::new(record, likelihood, vegetation_type))
    }

    pub fn record(&self) -> &CatalogRecord {
        &self.record
    }

    pub fn likelihood(&self) -> LikelihoodCode {
        self.likelihood
    }

    pub fn vegetation_type(&self) -> VegetationType {
        self.vegetation_type
    }

    /// Common name, if the catalog has one
    pub fn common_name(&self) -> Option<&str> {
        self.record.get_str(COMMON_NAME_FIELD)
    }

    /// Scientific name
    pub fn species(&self) -> Option<&str> {
        self.record.get_str(SPECIES_FIELD)
    }
}

impl Serialize for AnnotatedPlant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.record.as_map();
        let mut map = serializer.serialize_map(Some(fields.len() + 2))?;
        for (k, v) in fields {
            if k != LIKELIHOOD_KEY && k != VEGETATION_TYPE_KEY {
                map.serialize_entry(k, v)?;
            }
        }
        map.serialize_entry(LIKELIHOOD_KEY, &self.likelihood)?;
        map.serialize_entry(VEGETATION_TYPE_KEY, &self.vegetation_type)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CatalogRecord {
        serde_json::from_value(json!({
            "species": "Themeda triandra",
            "common_name_s": "Kangaroo Grass",
            "saltmarsh": "",
            "grasslands_and_woodlands_on_fertile_plains": "-",
        }))
        .unwrap()
    }

    #[test]
    fn test_field_order_is_preserved() {
        let record = sample();
        let names: Vec<_> = record.field_names().collect();
        assert_eq!(
            names,
            vec![
                "species",
                "common_name_s",
                "saltmarsh",
                "grasslands_and_woodlands_on_fertile_plains"
            ]
        );
    }

    #[test]
    fn test_annotate() {
        let plant = AnnotatedPlant::from_record(
            sample(),
            "grasslands_and_woodlands_on_fertile_plains",
            VegetationType::GrasslandsAndWoodlands,
        )
        .unwrap();
        assert_eq!(plant.likelihood(), LikelihoodCode::Certain);
        assert_eq!(plant.common_name(), Some("Kangaroo Grass"));
        assert_eq!(plant.species(), Some("Themeda triandra"));

        assert!(AnnotatedPlant::from_record(sample(), "saltmarsh", VegetationType::Saltmarsh).is_none());
        assert!(AnnotatedPlant::from_record(sample(), "missing", VegetationType::Saltmarsh).is_none());
    }

    #[test]
    fn test_serialized_plant_carries_annotations() {
        let plant = AnnotatedPlant::new(
            sample(),
            LikelihoodCode::HighlyLikely,
            VegetationType::GrasslandsAndWoodlands,
        );
        let value = serde_json::to_value(&plant).unwrap();
        assert_eq!(value["_likelihoodCode"], "3.1");
        assert_eq!(
            value["_vegetationType"],
            "Grasslands and Woodlands on fertile plains"
        );
        assert_eq!(value["species"], "Themeda triandra");
    }
}
