//! Report shaping: summaries, durations, H-hour clock times and
//! per-point observations.
//!
//! Everything here is presentation. Schedule times stay relative to
//! H-hour; wall clock conversion happens only in this module.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use march_core::constants::{DIFFICULT_TERRAIN_FACTOR, STEEP_SLOPE_PERCENT};
use march_core::schedule::{ColumnSchedule, MarchSchedule};
use march_core::types::Route;

/// `Xh Ym`, rounded to the nearest minute.
pub fn format_duration(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as i64;
    format!("{}h {}m", total / 60, total % 60)
}

/// Parse an `HH:MM` H-hour.
pub fn parse_h_hour(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").ok()
}

/// Wall clock `HH:MM` at `minutes` after H-hour, wrapping past midnight.
///
/// None when `minutes` is not finite or out of chrono's range.
pub fn format_clock(h_hour: NaiveTime, minutes: f64) -> Option<String> {
    let seconds = (minutes * 60.0).round();
    if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return None;
    }
    let offset = Duration::try_seconds(seconds as i64)?;
    let (time, _) = h_hour.overflowing_add_signed(offset);
    Some(time.format("%H:%M").to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub start_time: f64,
    pub start_clock: Option<String>,
    pub movement_minutes: f64,
    pub halt_minutes: f64,
    pub total_minutes: f64,
    pub duration_label: String,
    pub average_speed_kmh: f64,
    pub halt_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub name: String,
    pub start_time: f64,
    pub start_clock: Option<String>,
    pub total_minutes: f64,
    pub duration_label: String,
    pub columns: Vec<ColumnSummary>,
}

/// Headline figures of a march schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarchSummary {
    pub distance_km: f64,
    pub total_duration: f64,
    pub duration_label: String,
    pub h_hour: Option<String>,
    pub end_clock: Option<String>,
    pub series: Vec<SeriesSummary>,
}

pub fn summarize(schedule: &MarchSchedule, h_hour: Option<NaiveTime>) -> MarchSummary {
    let clock = |minutes: f64| h_hour.and_then(|h| format_clock(h, minutes));

    let series = schedule
        .series
        .iter()
        .map(|s| SeriesSummary {
            name: s.name.clone(),
            start_time: s.start_time,
            start_clock: clock(s.start_time),
            total_minutes: s.total_minutes,
            duration_label: format_duration(s.total_minutes),
            columns: s
                .columns
                .iter()
                .map(|c| ColumnSummary {
                    name: c.name.clone(),
                    start_time: c.start_time,
                    start_clock: clock(c.start_time),
                    movement_minutes: c.movement_minutes,
                    halt_minutes: c.halt_minutes,
                    total_minutes: c.total_minutes,
                    duration_label: format_duration(c.total_minutes),
                    average_speed_kmh: c.average_speed_kmh,
                    halt_count: c.halts.len(),
                })
                .collect(),
        })
        .collect();

    MarchSummary {
        distance_km: schedule.total_distance / 1000.0,
        total_duration: schedule.total_duration,
        duration_label: format_duration(schedule.total_duration),
        h_hour: h_hour.map(|h| h.format("%H:%M").to_string()),
        end_clock: clock(schedule.total_duration),
        series,
    }
}

/// Something worth pointing out at a route distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    SteepSlope { distance: f64, slope_percent: f64 },
    DifficultTerrain { distance: f64, terrain_factor: f64 },
    Halt { distance: f64, time: f64, duration_minutes: f64 },
}

impl Observation {
    pub fn distance(&self) -> f64 {
        match *self {
            Observation::SteepSlope { distance, .. }
            | Observation::DifficultTerrain { distance, .. }
            | Observation::Halt { distance, .. } => distance,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Observation::SteepSlope { slope_percent, .. } => format!("steep slope ({slope_percent:+.1}%)"),
            Observation::DifficultTerrain { terrain_factor, .. } => {
                format!("difficult terrain (factor {terrain_factor:.2})")
            }
            Observation::Halt { duration_minutes, .. } => format!("scheduled halt ({duration_minutes:.0} min)"),
        }
    }
}

/// Observations for one column, ordered by route distance.
///
/// Steep slopes come from the route, terrain factors and halts from the
/// column's samples. Non-halt samples line up one-to-one with route points.
pub fn observations(route: &Route, column: &ColumnSchedule) -> Vec<Observation> {
    let mut out = Vec::new();

    let regular = column.samples.iter().filter(|s| !s.is_halt);
    for (point, sample) in route.points().iter().zip(regular) {
        if point.slope_percent.abs() > STEEP_SLOPE_PERCENT {
            out.push(Observation::SteepSlope {
                distance: point.cumulative_distance,
                slope_percent: point.slope_percent,
            });
        }
        if sample.terrain_factor > DIFFICULT_TERRAIN_FACTOR {
            out.push(Observation::DifficultTerrain {
                distance: sample.cumulative_distance,
                terrain_factor: sample.terrain_factor,
            });
        }
    }

    out.extend(column.halts.iter().map(|h| Observation::Halt {
        distance: h.distance,
        time: h.time,
        duration_minutes: h.duration_minutes,
    }));

    out.sort_by(|a, b| a.distance().total_cmp(&b.distance()));
    out
}
