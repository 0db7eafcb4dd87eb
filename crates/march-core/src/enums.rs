//! Enumeration types used throughout planning.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Land cover classification along the route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VegetationType {
    /// Bare soil or urban surface.
    BareGround,
    SparseVegetation,
    /// Grassland or low shrubs.
    GrassOrShrub,
    /// Open woodland, passable with penalty.
    LightForest,
    /// Dense forest (impassable for columns).
    DenseForest,
    /// Open water, or imagery obscured by cloud (impassable).
    WaterOrCloud,
    /// No classification available; no penalty applied.
    #[default]
    Unclassified,
}

impl VegetationType {
    /// Classify a normalized NDVI value (-1.0 to 1.0).
    pub fn from_ndvi(ndvi: f64) -> Self {
        if !ndvi.is_finite() {
            return VegetationType::Unclassified;
        }
        if ndvi < NDVI_WATER_MAX {
            VegetationType::WaterOrCloud
        } else if ndvi < NDVI_BARE_MAX {
            VegetationType::BareGround
        } else if ndvi < NDVI_SPARSE_MAX {
            VegetationType::SparseVegetation
        } else if ndvi < NDVI_GRASS_MAX {
            VegetationType::GrassOrShrub
        } else if ndvi < NDVI_LIGHT_FOREST_MAX {
            VegetationType::LightForest
        } else {
            VegetationType::DenseForest
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            VegetationType::BareGround => "bare ground or urban",
            VegetationType::SparseVegetation => "sparse vegetation",
            VegetationType::GrassOrShrub => "grassland or shrubs",
            VegetationType::LightForest => "light forest",
            VegetationType::DenseForest => "dense forest",
            VegetationType::WaterOrCloud => "water or cloud",
            VegetationType::Unclassified => "unclassified",
        }
    }
}

/// Control point role along the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ControlPointKind {
    /// Initial point: where the march formally begins.
    Pi,
    /// Terminal point: where the march ends.
    Pt,
    /// Intermediate control point.
    Pc,
}

impl ControlPointKind {
    /// Ordering rank: PI first, PCs in the middle, PT last.
    pub fn rank(&self) -> u8 {
        match self {
            ControlPointKind::Pi => 0,
            ControlPointKind::Pc => 1,
            ControlPointKind::Pt => 2,
        }
    }
}

/// Kind of event in a column timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Arrival at a control point (PI, PT or PC).
    #[serde(rename = "PC")]
    Pc,
    /// Scheduled march halt.
    Halt,
}
