//! Route, column and series types.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{ControlPointKind, VegetationType};
use crate::error::DataQualityWarning;

/// Geographic coordinate in degrees (WGS84).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One acquired sample along a drawn route, before profiling.
///
/// A missing or non-finite `elevation` marks the sample as a hole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub vegetation: Option<VegetationType>,
}

impl RawSample {
    pub fn new(lat: f64, lng: f64, elevation: Option<f64>, vegetation: Option<VegetationType>) -> Self {
        Self {
            lat,
            lng,
            elevation,
            vegetation,
        }
    }

    /// Sample at a coordinate with no terrain data.
    pub fn hole(point: GeoPoint) -> Self {
        Self::new(point.lat, point.lng, None, None)
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// True when the elevation is present and a finite number.
    pub fn has_valid_elevation(&self) -> bool {
        self.elevation.is_some_and(f64::is_finite)
    }
}

/// A profiled point of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    /// Elevation in meters (always finite after profiling).
    pub elevation: f64,
    pub vegetation: VegetationType,
    /// Signed slope from the previous point (percent). 0 at index 0.
    pub slope_percent: f64,
    /// Great-circle distance from the previous point (meters). 0 at index 0.
    pub segment_distance: f64,
    /// Distance from the route start (meters).
    pub cumulative_distance: f64,
}

impl RoutePoint {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Data quality statistics gathered while profiling a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub total_points: usize,
    /// Samples whose elevation was valid before gap filling.
    pub valid_points: usize,
    pub valid_percent: f64,
    /// Samples whose elevation or vegetation was filled in.
    pub filled_points: usize,
    pub anomalous_jumps: usize,
    /// Largest adjacent elevation change after gap filling (meters).
    pub max_elevation_delta: f64,
    pub warnings: Vec<DataQualityWarning>,
}

impl QualityReport {
    /// True when the share of originally valid samples meets the threshold.
    pub fn meets_threshold(&self) -> bool {
        self.valid_percent >= MIN_VALID_PERCENT
    }
}

/// A validated, distance- and terrain-annotated march route.
///
/// Built once per planning session and never mutated; an edited route
/// is rebuilt from fresh samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    points: Vec<RoutePoint>,
    total_distance: f64,
    quality: QualityReport,
}

impl Route {
    /// Wrap profiled points. Total distance is taken from the last point.
    pub fn new(points: Vec<RoutePoint>, quality: QualityReport) -> Self {
        let total_distance = points.last().map_or(0.0, |p| p.cumulative_distance);
        Self {
            points,
            total_distance,
            quality,
        }
    }

    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total route length in meters.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn quality(&self) -> &QualityReport {
        &self.quality
    }
}

/// Control point marker as supplied by the map client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPointInput {
    pub kind: ControlPointKind,
    #[serde(default)]
    pub label: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

/// A control point projected onto a route.
///
/// Holds the projected distance by value; re-project if the route changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub kind: ControlPointKind,
    pub label: String,
    pub raw: GeoPoint,
    /// Nearest point on the route polyline.
    pub projected: GeoPoint,
    /// Route distance from the start to the projected point (meters).
    pub projected_cumulative_distance: f64,
    /// Distance from the raw coordinate to the route (meters).
    pub projected_offset_distance: f64,
}

/// Recurring halt schedule shared by every column of a calculation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaltPolicy {
    /// Minutes of movement between halts. Non-positive disables halts.
    pub interval_minutes: f64,
    pub duration_minutes: f64,
    /// Minutes of movement before the halt cycle begins.
    pub start_offset_minutes: f64,
}

impl Default for HaltPolicy {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_HALT_INTERVAL_MIN,
            duration_minutes: DEFAULT_HALT_DURATION_MIN,
            start_offset_minutes: 0.0,
        }
    }
}

impl HaltPolicy {
    /// A policy that never inserts halts.
    pub fn none() -> Self {
        Self {
            interval_minutes: 0.0,
            duration_minutes: 0.0,
            start_offset_minutes: 0.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_minutes > 0.0
    }
}

/// A group of vehicles marching as one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub vehicle_count: u32,
    pub intervehicular_distance_m: f64,
    pub march_speed_kmh: f64,
    /// Gap between this column's tail clearing the start and the next column starting.
    #[serde(default)]
    pub interval_to_next_column_minutes: f64,
}

impl Column {
    pub fn new(name: impl Into<String>, vehicle_count: u32, intervehicular_distance_m: f64, march_speed_kmh: f64) -> Self {
        Self {
            name: name.into(),
            vehicle_count,
            intervehicular_distance_m,
            march_speed_kmh,
            interval_to_next_column_minutes: 0.0,
        }
    }

    pub fn with_interval_to_next(mut self, minutes: f64) -> Self {
        self.interval_to_next_column_minutes = minutes;
        self
    }

    /// Minutes for the tail to clear a point after the head passes it.
    pub fn temporal_depth(&self) -> f64 {
        let spacing_km = self.vehicle_count.saturating_sub(1) as f64 * self.intervehicular_distance_m / 1000.0;
        spacing_km / self.march_speed_kmh * 60.0
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new(
            "Column 1",
            DEFAULT_VEHICLE_COUNT,
            DEFAULT_INTERVEHICULAR_M,
            DEFAULT_MARCH_SPEED_KMH,
        )
    }
}

/// An ordered group of columns marching as a larger formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    /// Gap after the previous series's last column clears the start.
    #[serde(default)]
    pub interval_to_previous_series_minutes: f64,
    pub columns: Vec<Column>,
}

impl Series {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            interval_to_previous_series_minutes: 0.0,
            columns,
        }
    }

    pub fn with_interval_to_previous(mut self, minutes: f64) -> Self {
        self.interval_to_previous_series_minutes = minutes;
        self
    }
}

impl Default for Series {
    fn default() -> Self {
        Self::new("Series 1", vec![Column::default()])
    }
}
