//! Column timing: one column's head and tail progression along a route.
//!
//! The route is walked once. Each segment is crossed at the column's
//! march speed divided by the terrain factor of its end point. Halts are
//! inserted as arrival/departure sample pairs whenever the movement
//! clock crosses the next halt time.

use tracing::debug;

use march_core::error::{MarchError, Result};
use march_core::schedule::{ColumnSchedule, HaltRecord, TimeSample};
use march_core::types::{Column, HaltPolicy, Route, RoutePoint};
use march_terrain::cost::terrain_factor;

/// Tolerance when deciding whether a halt lands on arrival at the final point.
const HALT_EPSILON_MIN: f64 = 1e-9;

fn validate(column: &Column) -> Result<()> {
    let reason = if column.vehicle_count == 0 {
        "vehicle count must be at least 1"
    } else if !(column.intervehicular_distance_m >= 0.0) || !column.intervehicular_distance_m.is_finite() {
        "intervehicular distance must be a finite, non-negative number"
    } else if !(column.march_speed_kmh > 0.0) || !column.march_speed_kmh.is_finite() {
        "march speed must be positive"
    } else if !column.temporal_depth().is_finite() {
        "march speed is too low for the column's length"
    } else {
        return Ok(());
    };

    Err(MarchError::InvalidColumn {
        column: column.name.clone(),
        reason: reason.to_string(),
    })
}

fn validate_halts(halts: &HaltPolicy) -> Result<()> {
    let reason = if !halts.interval_minutes.is_finite() {
        "interval must be a finite number"
    } else if !halts.start_offset_minutes.is_finite() {
        "start offset must be a finite number"
    } else if halts.is_enabled() && !(halts.duration_minutes >= 0.0 && halts.duration_minutes.is_finite()) {
        "duration must be a finite, non-negative number"
    } else {
        return Ok(());
    };

    Err(MarchError::InvalidHaltPolicy {
        reason: reason.to_string(),
    })
}

/// Terrain factor at a route point, as a column-scoped error when impassable.
fn factor_at(column: &Column, index: usize, point: &RoutePoint) -> Result<f64> {
    terrain_factor(point.slope_percent, point.vegetation).map_err(|e| MarchError::ImpassableSegment {
        column: column.name.clone(),
        point_index: index,
        cumulative_distance: point.cumulative_distance,
        slope_percent: e.slope_percent,
        vegetation: e.vegetation,
    })
}

/// Compute one column's schedule starting at `start_time` (minutes).
///
/// Fails without a route, for an invalid column or halt policy, or on
/// the first impassable point; no partial schedule is returned.
pub fn compute_column(
    route: Option<&Route>,
    column: &Column,
    start_time: f64,
    halts: &HaltPolicy,
) -> Result<ColumnSchedule> {
    let route = route.ok_or(MarchError::UninitializedRoute)?;
    validate(column)?;
    validate_halts(halts)?;

    let points = route.points();
    let first = points.first().ok_or(MarchError::NoRouteSelected { supplied: 0 })?;

    let depth = column.temporal_depth();
    let speed = column.march_speed_kmh;
    let sample = |distance: f64, head: f64, factor: f64, adjusted: f64, is_halt: bool| TimeSample {
        cumulative_distance: distance,
        head_time: head,
        tail_time: head + depth,
        terrain_factor: factor,
        adjusted_speed_kmh: adjusted,
        is_halt,
    };

    let mut samples = Vec::with_capacity(points.len());
    let mut halt_records = Vec::new();

    let first_factor = factor_at(column, 0, first)?;
    let first_speed = speed / first_factor;
    samples.push(sample(first.cumulative_distance, start_time, first_factor, first_speed, false));
    let mut speed_sum = first_speed;

    let mut elapsed = 0.0;
    let mut halt_accumulated = 0.0;
    let mut next_halt = halts.start_offset_minutes.max(0.0) + halts.interval_minutes;
    let last_index = points.len() - 1;

    for (i, pair) in points.windows(2).enumerate() {
        let (prev, point) = (&pair[0], &pair[1]);
        let index = i + 1;

        let factor = factor_at(column, index, point)?;
        let adjusted = speed / factor;
        let segment_minutes = point.segment_distance / 1000.0 / adjusted * 60.0;

        let before = elapsed;
        let after = elapsed + segment_minutes;

        while halts.is_enabled() && next_halt > before && next_halt <= after {
            if index == last_index && after - next_halt <= HALT_EPSILON_MIN {
                break;
            }

            let frac = (next_halt - before) / segment_minutes;
            let distance = prev.cumulative_distance + (point.cumulative_distance - prev.cumulative_distance) * frac;
            let arrival = start_time + next_halt + halt_accumulated;
            let departure = arrival + halts.duration_minutes;

            samples.push(sample(distance, arrival, factor, adjusted, true));
            halt_records.push(HaltRecord {
                time: arrival,
                distance,
                duration_minutes: halts.duration_minutes,
            });
            samples.push(sample(distance, departure, factor, adjusted, true));

            halt_accumulated += halts.duration_minutes;
            next_halt += halts.interval_minutes;
        }

        elapsed = after;
        samples.push(sample(
            point.cumulative_distance,
            start_time + elapsed + halt_accumulated,
            factor,
            adjusted,
            false,
        ));
        speed_sum += adjusted;
    }

    let schedule = ColumnSchedule {
        name: column.name.clone(),
        start_time,
        temporal_depth: depth,
        samples,
        halts: halt_records,
        movement_minutes: elapsed,
        halt_minutes: halt_accumulated,
        total_minutes: elapsed + halt_accumulated,
        average_speed_kmh: speed_sum / points.len() as f64,
    };

    debug!(
        column = %column.name,
        start = start_time,
        movement = schedule.movement_minutes,
        halts = schedule.halts.len(),
        avg_speed = schedule.average_speed_kmh,
        "column scheduled"
    );

    Ok(schedule)
}
