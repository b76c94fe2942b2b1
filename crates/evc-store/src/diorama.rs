//! Diorama layout
//!
//! Keystone plants ("-" and "3.2") are drawn as trees, everything else as
//! shrubs. Positions are random within a square ground plane centred on the
//! origin; pass a seeded RNG for a reproducible scene.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use evc_core::AnnotatedPlant;

/// Most trees and most shrubs placed in a scene
pub const MAX_PER_KIND: usize = 10;

/// Half the side of the ground square
pub const HALF_WIDTH: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantForm {
    Tree,
    Shrub,
}

/// One plant placed on the ground plane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub form: PlantForm,
    pub x: f64,
    pub z: f64,
    pub common_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diorama {
    pub trees: Vec<Placement>,
    pub shrubs: Vec<Placement>,
}

impl Diorama {
    /// Lay out `plants` using `rng`
    pub fn compose<R: Rng + ?Sized>(plants: &[AnnotatedPlant], rng: &mut R) -> Self {
        let (keystone, other): (Vec<&AnnotatedPlant>, Vec<&AnnotatedPlant>) =
            plants.iter().partition(|p| p.likelihood().is_keystone());

        Self {
            trees: place(&keystone, PlantForm::Tree, rng),
            shrubs: place(&other, PlantForm::Shrub, rng),
        }
    }

    /// Lay out `plants` reproducibly
    pub fn seeded(plants: &[AnnotatedPlant], seed: u64) -> Self {
        Self::compose(plants, &mut StdRng::seed_from_u64(seed))
    }

    pub fn len(&self) -> usize {
        self.trees.len() + self.shrubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty() && self.shrubs.is_empty()
    }
}

fn place<R: Rng + ?Sized>(plants: &[&AnnotatedPlant], form: PlantForm, rng: &mut R) -> Vec<Placement> {
    plants
        .iter()
        .take(MAX_PER_KIND)
        .map(|plant| Placement {
            form,
            x: rng.random_range(-HALF_WIDTH..HALF_WIDTH),
            z: rng.random_range(-HALF_WIDTH..HALF_WIDTH),
            common_name: plant.common_name().map(str::to_string),
        })
        .collect()
}
