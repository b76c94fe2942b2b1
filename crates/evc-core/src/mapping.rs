//! EVC code to vegetation type table
//!
//! Based on the "Pre-colonial plant list for the City of Melbourne" report.
//! Several EVC codes share one vegetation type; the plant catalog only has
//! data per type.

use crate::code::VegetationCode;
use crate::vegetation::VegetationType;

use VegetationType::*;

/// A single row of the EVC table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvcEntry {
    /// EVC number as it appears in map feature properties
    pub code: &'static str,
    /// Vegetation type the EVC belongs to
    pub vegetation_type: VegetationType,
    /// Official EVC name
    pub name: &'static str,
}

const fn entry(code: &'static str, vegetation_type: VegetationType, name: &'static str) -> EvcEntry {
    EvcEntry {
        code,
        vegetation_type,
        name,
    }
}

/// Every EVC code the atlas knows about
pub const EVC_TABLE: &[EvcEntry] = &[
    entry("132", GrasslandsAndWoodlands, "Plains Grassland"),
    entry("55", GrasslandsAndWoodlands, "Plains Grassy Woodland"),
    entry("175", GrasslandsAndWoodlands, "Grassy Woodland"),
    entry("649", GrasslandsAndWoodlands, "Stony Knoll Shrubland"),
    entry("125", FreshwaterWetland, "Plains Grassy Wetland"),
    entry("647", FreshwaterWetland, "Plains Sedgy Wetland"),
    entry("136", FreshwaterWetland, "Sedge Wetland"),
    entry("653", FreshwaterWetland, "Aquatic Herbland"),
    entry("821", FreshwaterWetland, "Tall Marsh"),
    entry("932", FreshwaterWetland, "Wet Verge Sedgeland"),
    entry("68", RiverBanksAndCreeklines, "Creekline Grassy Woodland"),
    entry("83", RiverBanksAndCreeklines, "Swampy Riparian Woodland"),
    entry("164", RiverBanksAndCreeklines, "Creekline Herb-rich Woodland"),
    entry("641", RiverBanksAndCreeklines, "Riparian Woodland"),
    entry("654", RiverBanksAndCreeklines, "Creekline Tussock Grassland"),
    entry("707", RiverBanksAndCreeklines, "Sedgy Swamp Woodland"),
    entry("851", RiverBanksAndCreeklines, "Stream Bank Shrubland"),
    entry("9", Saltmarsh, "Coastal Saltmarsh"),
    entry("10", CoastalMarshlands, "Estuarine Wetland"),
    entry("13", CoastalMarshlands, "Brackish Sedgeland"),
    entry("537", CoastalMarshlands, "Brackish Aquatic Herbland"),
    entry("538", CoastalMarshlands, "Brackish Herbland"),
    entry("656", CoastalMarshlands, "Brackish Wetland"),
    entry("914", CoastalMarshlands, "Estuarine Flats Grassland"),
    entry("934", CoastalMarshlands, "Brackish Grassland"),
    entry("952", CoastalMarshlands, "Estuarine Reedbed"),
    entry("53", SwampScrub, "Swamp Scrub"),
    entry("953", SwampScrub, "Estuarine Scrub"),
    entry("3", WoodlandsOnSand, "Damp Sands Herb-rich Woodland"),
    entry("6", WoodlandsOnSand, "Sand Heathland"),
    entry("48", WoodlandsOnSand, "Heathy Woodland"),
    entry("710", WoodlandsOnSand, "Damp Heathland"),
    entry("793", WoodlandsOnSand, "Damp Heathy Woodland"),
    entry("8", WetHeathland, "Wet Heathland"),
    entry("191", WetHeathland, "Riparian Scrub"),
    entry("2", BeachAndDunes, "Coast Banksia Woodland"),
    entry("160", BeachAndDunes, "Coastal Dune Scrub"),
    entry("163", BeachAndDunes, "Coastal Tussock Grassland"),
    entry("311", BeachAndDunes, "Berm Grassy Shrubland"),
    entry("879", BeachAndDunes, "Coastal Dune Grassland"),
    entry("140", SaltwaterWetland, "Mangrove Shrubland"),
    entry("842", SaltwaterWetland, "Saline Aquatic Meadow"),
    entry("895", CliffsAndEscarpments, "Escarpment Shrubland"),
    entry("47", SedimentaryHills, "Valley Grassy Forest"),
];

fn find(code: &VegetationCode) -> Option<&'static EvcEntry> {
    EVC_TABLE.iter().find(|e| e.code == code.as_str())
}

/// Resolve an EVC code to its vegetation type
///
/// Unmapped codes return `None`.
pub fn lookup(code: &VegetationCode) -> Option<VegetationType> {
    find(code).map(|e| e.vegetation_type)
}

/// Official EVC name for a code
pub fn evc_name(code: &VegetationCode) -> Option<&'static str> {
    find(code).map(|e| e.name)
}

/// All codes that belong to a vegetation type, in table order
pub fn codes_for(vegetation_type: VegetationType) -> Vec<VegetationCode> {
    EVC_TABLE
        .iter()
        .filter(|e| e.vegetation_type == vegetation_type)
        .map(|e| VegetationCode::new(e.code))
        .collect()
}
