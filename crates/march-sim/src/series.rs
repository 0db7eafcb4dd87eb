//! Series scheduling: chains columns and series in declaration order.
//!
//! A column may not start until the tail of the column ahead of it has
//! cleared the route start, plus a gap. Series chain the same way off the
//! last column of the previous series. Start times are minutes from H-hour.

use tracing::info;

use march_core::error::{MarchError, Result};
use march_core::schedule::{ColumnSchedule, MarchSchedule, SeriesSchedule};
use march_core::types::{HaltPolicy, Route, Series};

use crate::column::compute_column;

fn schedule_series(route: &Route, series: &Series, start_time: f64, halts: &HaltPolicy) -> Result<SeriesSchedule> {
    if series.columns.is_empty() {
        return Err(MarchError::EmptySeries {
            series: series.name.clone(),
        });
    }

    let mut columns: Vec<ColumnSchedule> = Vec::with_capacity(series.columns.len());
    let mut column_start = start_time;

    for column in &series.columns {
        let schedule = compute_column(Some(route), column, column_start, halts)?;
        column_start = schedule.first_tail_time() + column.interval_to_next_column_minutes;
        columns.push(schedule);
    }

    let total_minutes = columns.last().map_or(0.0, |c| c.last_tail_time() - start_time);

    Ok(SeriesSchedule {
        name: series.name.clone(),
        start_time,
        total_minutes,
        columns,
    })
}

/// Schedule every series over the route.
///
/// The first series starts at minute 0. Fails on the first column or
/// series that cannot be scheduled.
pub fn schedule_march(route: Option<&Route>, series: &[Series], halts: &HaltPolicy) -> Result<MarchSchedule> {
    let route = route.ok_or(MarchError::UninitializedRoute)?;
    if series.is_empty() {
        return Err(MarchError::EmptySchedule);
    }

    let mut scheduled: Vec<SeriesSchedule> = Vec::with_capacity(series.len());

    for s in series {
        let start_time = match scheduled.last().and_then(|prev| prev.columns.last()) {
            Some(prev_tail) => prev_tail.first_tail_time() + s.interval_to_previous_series_minutes,
            None => 0.0,
        };
        scheduled.push(schedule_series(route, s, start_time, halts)?);
    }

    let total_duration = scheduled
        .last()
        .and_then(|s| s.columns.last())
        .map_or(0.0, ColumnSchedule::last_tail_time);

    info!(
        series = scheduled.len(),
        distance_m = route.total_distance(),
        duration_min = total_duration,
        "march scheduled"
    );

    Ok(MarchSchedule {
        total_distance: route.total_distance(),
        total_duration,
        series: scheduled,
    })
}
