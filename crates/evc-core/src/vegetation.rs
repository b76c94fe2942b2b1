//! Vegetation types
//!
//! A vegetation type is the coarse category that groups several EVC codes
//! together. The plant catalog keeps one likelihood column per type.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Fill color for features whose type has no dedicated color
pub const DEFAULT_VEGETATION_COLOR: &str = "#4CAF50";

/// Coarse grouping of EVC codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VegetationType {
    #[serde(rename = "Grasslands and Woodlands on fertile plains")]
    GrasslandsAndWoodlands,
    #[serde(rename = "Freshwater wetland")]
    FreshwaterWetland,
    #[serde(rename = "River banks and creeklines")]
    RiverBanksAndCreeklines,
    #[serde(rename = "Saltmarsh")]
    Saltmarsh,
    #[serde(rename = "Coastal marshlands and brackish flats")]
    CoastalMarshlands,
    #[serde(rename = "Swamp scrub")]
    SwampScrub,
    #[serde(rename = "Woodlands and heathlands on sand")]
    WoodlandsOnSand,
    #[serde(rename = "Wet heathland")]
    WetHeathland,
    #[serde(rename = "Beach and Dunes")]
    BeachAndDunes,
    #[serde(rename = "Saltwater wetland")]
    SaltwaterWetland,
    #[serde(rename = "Cliffs and escarpments")]
    CliffsAndEscarpments,
    #[serde(rename = "Woodlands and forests on sedimentary hills, valleys and ridges")]
    SedimentaryHills,
}

impl VegetationType {
    /// Every mapped vegetation type
    pub const ALL: [VegetationType; 12] = [
        VegetationType::GrasslandsAndWoodlands,
        VegetationType::FreshwaterWetland,
        VegetationType::RiverBanksAndCreeklines,
        VegetationType::Saltmarsh,
        VegetationType::CoastalMarshlands,
        VegetationType::SwampScrub,
        VegetationType::WoodlandsOnSand,
        VegetationType::WetHeathland,
        VegetationType::BeachAndDunes,
        VegetationType::SaltwaterWetland,
        VegetationType::CliffsAndEscarpments,
        VegetationType::SedimentaryHills,
    ];

    /// Human-readable label, as used by the catalog and the map layer
    pub fn label(&self) -> &'static str {
        match self {
            VegetationType::GrasslandsAndWoodlands => "Grasslands and Woodlands on fertile plains",
            VegetationType::FreshwaterWetland => "Freshwater wetland",
            VegetationType::RiverBanksAndCreeklines => "River banks and creeklines",
            VegetationType::Saltmarsh => "Saltmarsh",
            VegetationType::CoastalMarshlands => "Coastal marshlands and brackish flats",
            VegetationType::SwampScrub => "Swamp scrub",
            VegetationType::WoodlandsOnSand => "Woodlands and heathlands on sand",
            VegetationType::WetHeathland => "Wet heathland",
            VegetationType::BeachAndDunes => "Beach and Dunes",
            VegetationType::SaltwaterWetland => "Saltwater wetland",
            VegetationType::CliffsAndEscarpments => "Cliffs and escarpments",
            VegetationType::SedimentaryHills => {
                "Woodlands and forests on sedimentary hills, valleys and ridges"
            }
        }
    }

    /// Look a type up by its exact label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Map layer fill color
    pub fn color(&self) -> &'static str {
        vegetation_color(self.label())
    }
}

impl Display for VegetationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map layer fill color for a free-form vegetation label
///
/// The map layer also carries labels that have no catalog column
/// ("Water body", "Unknown"), so this works on strings.
pub fn vegetation_color(label: &str) -> &'static str {
    match label {
        "Grasslands and Woodlands on fertile plains" => "#8BC34A",
        "River banks and creeklines" => "#2E7D32",
        "Freshwater wetland" => "#1565C0",
        "Coastal marshlands and brackish flats" => "#0288D1",
        "Saltmarsh" => "#F57F17",
        "Swamp scrub" => "#00695C",
        "Woodlands and heathlands on sand" => "#558B2F",
        "Cliffs and escarpments" => "#6D4C41",
        "Water body" => "#0D47A1",
        "Unknown" => "#9E9E9E",
        _ => DEFAULT_VEGETATION_COLOR,
    }
}
