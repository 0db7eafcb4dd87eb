//! Error and warning kinds.
//!
//! Structural problems abort the affected computation and surface as
//! `MarchError`. Data quality problems never abort; they are recorded
//! on the route as `DataQualityWarning`s.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::VegetationType;

pub type Result<T> = std::result::Result<T, MarchError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarchError {
    #[error("a route needs at least 2 samples, got {supplied}")]
    NoRouteSelected { supplied: usize },

    #[error(
        "column '{column}' cannot pass point {point_index} at {cumulative_distance:.0} m \
         (slope {slope_percent:.1}%, {})",
        .vegetation.label()
    )]
    ImpassableSegment {
        column: String,
        point_index: usize,
        cumulative_distance: f64,
        slope_percent: f64,
        vegetation: VegetationType,
    },

    #[error("no route has been built; profile a route before scheduling")]
    UninitializedRoute,

    #[error("series '{series}' has no columns")]
    EmptySeries { series: String },

    #[error("march plan has no series")]
    EmptySchedule,

    #[error("control point '{label}' cannot be projected onto a route of {route_points} point(s)")]
    InvalidControlPoint { label: String, route_points: usize },

    #[error("column '{column}' is invalid: {reason}")]
    InvalidColumn { column: String, reason: String },

    #[error("halt policy is invalid: {reason}")]
    InvalidHaltPolicy { reason: String },
}

/// Non-fatal data quality finding attached to a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DataQualityWarning {
    /// Too few samples had a valid elevation before gap filling.
    LowValidity { valid_percent: f64, threshold: f64 },
    /// Elevation changed by more than the jump threshold between neighbours.
    AnomalousJump {
        index: usize,
        delta_m: f64,
        cumulative_distance: f64,
    },
    /// Samples were gap-filled from their neighbours.
    FilledHoles { count: usize },
}
