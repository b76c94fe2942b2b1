//! Map selection
//!
//! A [`Selection`] is what the detail panel shows after a click: the EVC code
//! plus the descriptive fields the map layer carries for it.

use serde::{Deserialize, Serialize};

use crate::code::VegetationCode;
use crate::mapping;
use crate::vegetation::VegetationType;

/// Bioregional conservation status of an EVC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConservationStatus {
    #[serde(rename = "E")]
    Endangered,
    #[serde(rename = "V")]
    Vulnerable,
    #[serde(rename = "D")]
    Depleted,
    #[serde(rename = "LC")]
    LeastConcern,
}

impl ConservationStatus {
    /// Parse a status code; unknown codes return `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "E" => Some(ConservationStatus::Endangered),
            "V" => Some(ConservationStatus::Vulnerable),
            "D" => Some(ConservationStatus::Depleted),
            "LC" => Some(ConservationStatus::LeastConcern),
            _ => None,
        }
    }

    /// Style to use for a raw code, falling back to Least Concern
    pub fn for_display(code: &str) -> Self {
        Self::from_code(code).unwrap_or(ConservationStatus::LeastConcern)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ConservationStatus::Endangered => "E",
            ConservationStatus::Vulnerable => "V",
            ConservationStatus::Depleted => "D",
            ConservationStatus::LeastConcern => "LC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConservationStatus::Endangered => "Endangered",
            ConservationStatus::Vulnerable => "Vulnerable",
            ConservationStatus::Depleted => "Depleted",
            ConservationStatus::LeastConcern => "Least Concern",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ConservationStatus::Endangered => "#d32f2f",
            ConservationStatus::Vulnerable => "#f57c00",
            ConservationStatus::Depleted => "#fbc02d",
            ConservationStatus::LeastConcern => "#388e3c",
        }
    }
}

/// The currently chosen vegetation district and its display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// EVC code
    pub code: VegetationCode,
    /// EVC name
    pub evc_name: Option<String>,
    /// Bioregion the polygon lies in
    pub bioregion: Option<String>,
    /// Raw bioregional conservation status code (e.g. "E")
    pub conservation_code: Option<String>,
    /// Conservation status description
    pub conservation_description: Option<String>,
    /// Vegetation type label carried by the map layer
    pub vegetation_label: Option<String>,
    /// EVC group name
    pub group_name: Option<String>,
    /// EVC subgroup name
    pub subgroup_name: Option<String>,
}

impl Selection {
    /// Selection with only a code
    ///
    /// The EVC name is filled from the static table when known.
    pub fn new(code: impl Into<VegetationCode>) -> Self {
        let code = code.into();
        let evc_name = mapping::evc_name(&code).map(str::to_string);
        Self {
            code,
            evc_name,
            bioregion: None,
            conservation_code: None,
            conservation_description: None,
            vegetation_label: None,
            group_name: None,
            subgroup_name: None,
        }
    }

    pub fn with_evc_name(mut self, name: impl Into<String>) -> Self {
        self.evc_name = Some(name.into());
        self
    }

    pub fn with_bioregion(mut self, bioregion: impl Into<String>) -> Self {
        self.bioregion = Some(bioregion.into());
        self
    }

    pub fn with_conservation(
        mut self,
        code: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.conservation_code = Some(code.into());
        self.conservation_description = Some(description.into());
        self
    }

    /// Vegetation type from the static table
    pub fn vegetation_type(&self) -> Option<VegetationType> {
        mapping::lookup(&self.code)
    }

    /// Conservation status to display
    pub fn conservation_status(&self) -> ConservationStatus {
        ConservationStatus::for_display(self.conservation_code.as_deref().unwrap_or(""))
    }

    /// Panel heading, e.g. "EVC 132: Plains Grassland"
    pub fn title(&self) -> String {
        match &self.evc_name {
            Some(name) => format!("EVC {}: {}", self.code, name),
            None => format!("EVC {}", self.code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ConservationStatus::from_code("E"),
            Some(ConservationStatus::Endangered)
        );
        assert_eq!(ConservationStatus::from_code("X"), None);
        assert_eq!(
            ConservationStatus::for_display("X"),
            ConservationStatus::LeastConcern
        );
        assert_eq!(ConservationStatus::Vulnerable.color(), "#f57c00");
    }

    #[test]
    fn test_selection_defaults_name_from_table() {
        let selection = Selection::new("132");
        assert_eq!(selection.evc_name.as_deref(), Some("Plains Grassland"));
        assert_eq!(selection.title(), "EVC 132: Plains Grassland");
        assert_eq!(
            selection.vegetation_type(),
            Some(VegetationType::GrasslandsAndWoodlands)
        );

        let unknown = Selection::new("4242");
        assert_eq!(unknown.title(), "EVC 4242");
        assert_eq!(unknown.vegetation_type(), None);
    }

    #[test]
    fn test_conservation_display() {
        let selection = Selection::new("125").with_conservation("D", "Depleted");
        assert_eq!(selection.conservation_status(), ConservationStatus::Depleted);
        assert_eq!(
            Selection::new("125").conservation_status(),
            ConservationStatus::LeastConcern
        );
    }
}
