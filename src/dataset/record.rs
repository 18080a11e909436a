use serde::{Serialize, Deserialize};

use super::species::Species;

/// One labelled flower: four measurements and the one-hot species vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    flower_dimensions: Vec<f64>,
    species_vector: Vec<f64>,
}

impl Record {
    /// Encodes `species_name` with [`Species::encode`]; unknown names give an
    /// all-zero vector.
    pub fn new(flower_dimensions: Vec<f64>, species_name: &str) -> Record {
        Record { flower_dimensions, species_vector: Species::encode(species_name) }
    }

    pub fn flower_dimensions(&self) -> &[f64] {
        &self.flower_dimensions
    }

    pub fn species_vector(&self) -> &[f64] {
        &self.species_vector
    }

    pub fn species(&self) -> Option<Species> {
        Species::from_output(&self.species_vector)
    }
}
