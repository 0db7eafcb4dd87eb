//! Per-column event timelines for reporting.
//!
//! Control point arrivals are read off a column's samples by route
//! distance; halts come straight from the column's halt records.

use march_core::enums::EventKind;
use march_core::schedule::{ColumnSchedule, ColumnTimeline, MarchSchedule, TimeSample, TimelineEvent};
use march_core::types::ControlPoint;

/// Head and tail times at a route distance.
///
/// Exact sample matches use the first matching sample; distances
/// between samples are interpolated; distances outside the samples
/// clamp to the nearest end.
pub fn times_at_distance(samples: &[TimeSample], distance: f64) -> Option<(f64, f64)> {
    let first = samples.first()?;
    let j = samples.partition_point(|s| s.cumulative_distance < distance);

    let Some(next) = samples.get(j) else {
        let last = samples.last()?;
        return Some((last.head_time, last.tail_time));
    };
    if j == 0 {
        return Some((first.head_time, first.tail_time));
    }
    if next.cumulative_distance == distance {
        return Some((next.head_time, next.tail_time));
    }

    let prev = &samples[j - 1];
    let frac = (distance - prev.cumulative_distance) / (next.cumulative_distance - prev.cumulative_distance);
    Some((
        prev.head_time + (next.head_time - prev.head_time) * frac,
        prev.tail_time + (next.tail_time - prev.tail_time) * frac,
    ))
}

fn column_events(column: &ColumnSchedule, control_points: &[ControlPoint]) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = control_points
        .iter()
        .filter_map(|cp| {
            let (time, tail_time) = times_at_distance(&column.samples, cp.projected_cumulative_distance)?;
            Some(TimelineEvent {
                kind: EventKind::Pc,
                label: cp.label.clone(),
                distance: cp.projected_cumulative_distance,
                time,
                tail_time,
                duration_minutes: None,
            })
        })
        .collect();

    events.extend(column.halts.iter().enumerate().map(|(i, halt)| TimelineEvent {
        kind: EventKind::Halt,
        label: format!("Halt {}", i + 1),
        distance: halt.distance,
        time: halt.time,
        tail_time: halt.time + halt.duration_minutes,
        duration_minutes: Some(halt.duration_minutes),
    }));

    events.sort_by(|a, b| a.time.total_cmp(&b.time).then(a.distance.total_cmp(&b.distance)));
    events
}

/// One time-ordered timeline per column, in schedule order.
pub fn aggregate(schedule: &MarchSchedule, control_points: &[ControlPoint]) -> Vec<ColumnTimeline> {
    schedule
        .series
        .iter()
        .flat_map(|series| {
            series.columns.iter().map(move |column| ColumnTimeline {
                series: series.name.clone(),
                column: column.name.clone(),
                events: column_events(column, control_points),
            })
        })
        .collect()
}
