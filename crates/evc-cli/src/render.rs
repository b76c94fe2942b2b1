//! Text output

use std::fmt::Write;

use evc_core::{AnnotatedPlant, EvcEntry, Selection, VegetationCode, VegetationType};
use evc_store::{Diorama, PlantsStatus, StoreState};

/// One line per plant: likelihood, scientific and common name
pub fn plant_list(plants: &[AnnotatedPlant]) -> String {
    let mut out = String::new();
    for plant in plants {
        let likelihood = plant.likelihood();
        let _ = write!(
            out,
            "{:<4} {:<34} {}",
            likelihood.as_str(),
            likelihood.label(),
            plant.species().unwrap_or("(unnamed)")
        );
        if let Some(common) = plant.common_name() {
            let _ = write!(out, " ({common})");
        }
        out.push('\n');
    }
    out
}

/// Detail panel for a selection and its plants
pub fn info_panel(state: &StoreState) -> String {
    let Some(selection) = &state.selection else {
        return "Click on the map to select a vegetation district\n".to_string();
    };

    let mut out = selection_details(selection);
    out.push('\n');
    match state.plants_status {
        PlantsStatus::NotRequested => out.push_str("Plants: not requested (use --plants)\n"),
        PlantsStatus::Loading => out.push_str("Plants: loading...\n"),
        PlantsStatus::Loaded if state.plants.is_empty() => {
            out.push_str("Plants: none recorded for this vegetation type\n")
        }
        PlantsStatus::Loaded => {
            let _ = writeln!(out, "Plants ({}):", state.plants.len());
            out.push_str(&plant_list(&state.plants));
        }
        PlantsStatus::Unavailable => out.push_str("Plants: none shown\n"),
    }
    out
}

fn selection_details(selection: &Selection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", selection.title());

    let vegetation = selection
        .vegetation_type()
        .map(|t| t.label().to_string())
        .or_else(|| selection.vegetation_label.clone());
    let status = selection.conservation_status();

    let rows = [
        ("Vegetation type", vegetation),
        ("Bioregion", selection.bioregion.clone()),
        (
            "Conservation status",
            Some(format!("{} ({})", status.label(), status.code())),
        ),
        ("Group", selection.group_name.clone()),
        ("Subgroup", selection.subgroup_name.clone()),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            let _ = writeln!(out, "  {label:<20} {value}");
        }
    }
    out
}

/// Lookup result for a single code
pub fn lookup(code: &VegetationCode, vegetation_type: Option<VegetationType>) -> String {
    match vegetation_type {
        Some(t) => {
            let mut out = Selection::new(code.clone()).title();
            let _ = write!(out, "\n  Vegetation type: {}\n  Color: {}\n", t.label(), t.color());
            out
        }
        None => format!("EVC {code} is not in the vegetation table\n"),
    }
}

/// The whole mapping table, grouped by vegetation type
pub fn table(entries: &[EvcEntry]) -> String {
    let mut out = String::new();
    for vegetation_type in VegetationType::ALL {
        let _ = writeln!(out, "{} [{}]", vegetation_type.label(), vegetation_type.color());
        for entry in entries.iter().filter(|e| e.vegetation_type == vegetation_type) {
            let _ = writeln!(out, "  {:>4}  {}", entry.code, entry.name);
        }
    }
    out
}

pub fn diorama(diorama: &Diorama) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} trees (keystone species), {} shrubs",
        diorama.trees.len(),
        diorama.shrubs.len()
    );
    for placement in diorama.trees.iter().chain(&diorama.shrubs) {
        let _ = writeln!(
            out,
            "  {:<5} x={:>6.2} z={:>6.2}  {}",
            format!("{:?}", placement.form).to_lowercase(),
            placement.x,
            placement.z,
            placement.common_name.as_deref().unwrap_or("")
        );
    }
    out
}
