//! Schedule output: the time/distance record of every column.

use serde::{Deserialize, Serialize};

use crate::enums::EventKind;

/// Head and tail passage times at one distance along the route.
///
/// Times are minutes relative to the start of the march (H-hour).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSample {
    pub cumulative_distance: f64,
    pub head_time: f64,
    pub tail_time: f64,
    pub terrain_factor: f64,
    pub adjusted_speed_kmh: f64,
    /// True for the arrival/departure samples bracketing a halt.
    pub is_halt: bool,
}

/// A halt inserted into a column's march.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HaltRecord {
    /// Head arrival time at the halt (minutes).
    pub time: f64,
    /// Route distance where the halt begins (meters).
    pub distance: f64,
    pub duration_minutes: f64,
}

/// Computed progression of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchedule {
    pub name: String,
    pub start_time: f64,
    /// Tail lag behind the head (minutes).
    pub temporal_depth: f64,
    pub samples: Vec<TimeSample>,
    pub halts: Vec<HaltRecord>,
    pub movement_minutes: f64,
    pub halt_minutes: f64,
    pub total_minutes: f64,
    pub average_speed_kmh: f64,
}

impl ColumnSchedule {
    /// Tail passage of the route start; gates the next column or series.
    pub fn first_tail_time(&self) -> f64 {
        self.samples.first().map_or(self.start_time, |s| s.tail_time)
    }

    /// Tail passage of the route end.
    pub fn last_tail_time(&self) -> f64 {
        self.samples.last().map_or(self.start_time, |s| s.tail_time)
    }
}

/// Computed progression of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSchedule {
    pub name: String,
    pub start_time: f64,
    /// From series start until the last column's tail clears the end.
    pub total_minutes: f64,
    pub columns: Vec<ColumnSchedule>,
}

impl SeriesSchedule {
    /// The series head timeline: its first column's samples.
    pub fn head_timeline(&self) -> &[TimeSample] {
        self.columns.first().map(|c| c.samples.as_slice()).unwrap_or_default()
    }

    /// The series tail timeline: its last column's samples.
    pub fn tail_timeline(&self) -> &[TimeSample] {
        self.columns.last().map(|c| c.samples.as_slice()).unwrap_or_default()
    }
}

/// The complete march schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarchSchedule {
    /// Route length (meters).
    pub total_distance: f64,
    /// Minutes until the last column of the last series clears the end.
    pub total_duration: f64,
    pub series: Vec<SeriesSchedule>,
}

/// One reportable event in a column's march.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub kind: EventKind,
    pub label: String,
    pub distance: f64,
    /// Head time at the event (minutes).
    pub time: f64,
    /// Tail time for control points; halt end for halts.
    pub tail_time: f64,
    pub duration_minutes: Option<f64>,
}

/// Time-ordered events for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTimeline {
    pub series: String,
    pub column: String,
    pub events: Vec<TimelineEvent>,
}
