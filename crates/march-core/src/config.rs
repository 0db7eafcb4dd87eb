//! March plan configuration: the typed input boundary of the engine.
//!
//! The map client and configuration forms translate their state into a
//! `MarchPlan`; the engine never reads UI state directly.

use serde::{Deserialize, Serialize};

use crate::types::{ControlPointInput, GeoPoint, HaltPolicy, Series};

/// Everything needed to plan a march, apart from terrain data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchPlan {
    /// Drawn route vertices in march order.
    pub route: Vec<GeoPoint>,
    pub control_points: Vec<ControlPointInput>,
    pub halts: HaltPolicy,
    pub series: Vec<Series>,
    /// Wall clock time of minute 0, `HH:MM`. Presentation only.
    pub h_hour: Option<String>,
}

impl MarchPlan {
    /// Parse a plan from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Fill in a default series with one default column when none is configured.
    pub fn with_defaults(mut self) -> Self {
        if self.series.is_empty() {
            self.series.push(Series::default());
        }
        self
    }
}
