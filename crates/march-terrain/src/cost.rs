//! Terrain cost model: slope and vegetation speed penalties.
//!
//! A factor above 1 slows a column, below 1 speeds it up (descents).
//! A factor of 0 means the terrain cannot be crossed; callers receive
//! it as an `Impassable` error so it never turns into an infinite time.

use march_core::constants::*;
use march_core::enums::VegetationType;

/// Terrain that no column can cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impassable {
    pub slope_percent: f64,
    pub vegetation: VegetationType,
}

/// Slope speed factor. 0 when |slope| reaches the impassable limit.
pub fn slope_factor(slope_percent: f64) -> f64 {
    let magnitude = slope_percent.abs();
    if magnitude >= IMPASSABLE_SLOPE_PERCENT || magnitude.is_nan() {
        return 0.0;
    }

    let table = if slope_percent >= 0.0 {
        &ASCENT_SLOPE_FACTORS
    } else {
        &DESCENT_SLOPE_FACTORS
    };

    // Largest threshold not exceeding the magnitude.
    table
        .iter()
        .rev()
        .find(|(threshold, _)| *threshold <= magnitude)
        .map_or(1.0, |&(_, factor)| factor)
}

/// Vegetation speed factor. 0 for impassable cover.
pub fn vegetation_factor(vegetation: VegetationType) -> f64 {
    match vegetation {
        VegetationType::BareGround => VEGETATION_FACTOR_BARE_GROUND,
        VegetationType::SparseVegetation => VEGETATION_FACTOR_SPARSE,
        VegetationType::GrassOrShrub => VEGETATION_FACTOR_GRASS_SHRUB,
        VegetationType::LightForest => VEGETATION_FACTOR_LIGHT_FOREST,
        VegetationType::DenseForest | VegetationType::WaterOrCloud => 0.0,
        VegetationType::Unclassified => 1.0,
    }
}

/// Combined terrain factor, or `Impassable` when either component is 0.
pub fn terrain_factor(slope_percent: f64, vegetation: VegetationType) -> Result<f64, Impassable> {
    let factor = slope_factor(slope_percent) * vegetation_factor(vegetation);
    if factor > 0.0 {
        Ok(factor)
    } else {
        Err(Impassable {
            slope_percent,
            vegetation,
        })
    }
}

/// Upper bound of any passable terrain factor.
pub const MAX_TERRAIN_FACTOR: f64 = MAX_SLOPE_FACTOR * MAX_VEGETATION_FACTOR;
