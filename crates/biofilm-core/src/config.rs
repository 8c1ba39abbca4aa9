//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::Dimensions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on the diffusion rate that keeps the diffusion update a convex combination
pub const MAX_DIFFUSION_RATE: f64 = 0.125;

/// Grid size, unpadded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows in the regular grid
    pub rows: usize,
    /// Number of columns in the regular grid
    pub columns: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 400,
            columns: 100,
        }
    }
}

impl GridConfig {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.columns)
    }
}

/// Seeding and division parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacteriaConfig {
    /// Probability that a first-column cell starts with a live bacterium (0.0 to 1.0)
    pub probability_init: f64,
    /// Base probability that a live bacterium divides, scaled by local nutrient (0.0 to 1.0)
    pub probability_divide: f64,
}

impl Default for BacteriaConfig {
    fn default() -> Self {
        Self {
            probability_init: 0.5,
            probability_divide: 0.3,
        }
    }
}

/// Nutrient field parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientConfig {
    /// Initial fill value, also the reservoir value on the east edge
    pub max_nutrient: f64,
    /// Fraction exchanged with each Moore neighbor per step (0.0 to 0.125)
    pub diffusion_rate: f64,
    /// Amount a live bacterium consumes per step
    pub consume_amount: f64,
}

impl Default for NutrientConfig {
    fn default() -> Self {
        Self {
            max_nutrient: 1.0,
            diffusion_rate: 0.1,
            consume_amount: 0.1,
        }
    }
}

/// Full run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of time steps to simulate
    pub num_steps: u64,
    /// Random seed for reproducibility
    pub seed: u32,
    pub grid: GridConfig,
    pub bacteria: BacteriaConfig,
    pub nutrient: NutrientConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_steps: 1000,
            seed: 0,
            grid: GridConfig::default(),
            bacteria: BacteriaConfig::default(),
            nutrient: NutrientConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file. Missing fields take default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Check every parameter against its allowed range.
    ///
    /// The engine itself never calls this; callers validate before building a simulation.
    pub fn validate(&self) -> Result<()> {
        if self.grid.rows < 1 {
            return Err(Error::Validation("rows must be at least 1".to_string()));
        }
        if self.grid.columns < 1 {
            return Err(Error::Validation("columns must be at least 1".to_string()));
        }

        check_range("probability_init", self.bacteria.probability_init, 0.0, 1.0)?;
        check_range("probability_divide", self.bacteria.probability_divide, 0.0, 1.0)?;
        check_range("consume_amount", self.nutrient.consume_amount, 0.0, 1.0)?;
        check_range(
            "diffusion_rate",
            self.nutrient.diffusion_rate,
            0.0,
            MAX_DIFFUSION_RATE,
        )?;
        check_range("max_nutrient", self.nutrient.max_nutrient, 0.0, 1.0)?;

        Ok(())
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    // NaN fails both comparisons and is rejected here as well
    if !(value >= min && value <= max) {
        return Err(Error::Validation(format!(
            "{} must be within [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}
