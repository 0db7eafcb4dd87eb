//! `plan_march`: the single entry point from a profiled route and a plan
//! to the complete, serializable planning result.

use serde::{Deserialize, Serialize};
use tracing::warn;

use march_core::config::MarchPlan;
use march_core::error::Result;
use march_core::schedule::{ColumnTimeline, MarchSchedule};
use march_core::types::{ControlPoint, QualityReport, Route};
use march_terrain::control::place_control_points;

use crate::report::{observations, parse_h_hour, summarize, MarchSummary, Observation};
use crate::series::schedule_march;
use crate::timeline::aggregate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnObservations {
    pub series: String,
    pub column: String,
    pub observations: Vec<Observation>,
}

/// Everything the reporting layer needs, serialized as-is on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutput {
    pub summary: MarchSummary,
    pub schedule: MarchSchedule,
    pub control_points: Vec<ControlPoint>,
    pub timelines: Vec<ColumnTimeline>,
    pub observations: Vec<ColumnObservations>,
    pub quality: QualityReport,
}

/// Plan a march over a profiled route.
///
/// A plan without series gets the default series. An unparseable H-hour
/// is logged and dropped; it only affects clock labels.
pub fn plan_march(route: &Route, plan: &MarchPlan) -> Result<PlanOutput> {
    let plan = plan.clone().with_defaults();

    let control_points = place_control_points(&plan.control_points, route)?;
    let schedule = schedule_march(Some(route), &plan.series, &plan.halts)?;
    let timelines = aggregate(&schedule, &control_points);

    let h_hour = plan.h_hour.as_deref().and_then(|text| {
        let parsed = parse_h_hour(text);
        if parsed.is_none() {
            warn!(h_hour = text, "ignoring H-hour, expected HH:MM");
        }
        parsed
    });

    let column_observations = schedule
        .series
        .iter()
        .flat_map(|s| {
            s.columns.iter().map(move |c| ColumnObservations {
                series: s.name.clone(),
                column: c.name.clone(),
                observations: observations(route, c),
            })
        })
        .collect();

    Ok(PlanOutput {
        summary: summarize(&schedule, h_hour),
        schedule,
        control_points,
        timelines,
        observations: column_observations,
        quality: route.quality().clone(),
    })
}
