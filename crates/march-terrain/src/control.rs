//! Control point projection onto a route.
//!
//! Each marker is snapped to the nearest point of the route polyline and
//! located by its distance from the route start.

use march_core::enums::ControlPointKind;
use march_core::error::{MarchError, Result};
use march_core::types::{ControlPoint, ControlPointInput, GeoPoint, Route};

use crate::projection::{haversine, project_on_segment};

/// Nearest point of a route to a query coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteProjection {
    pub point: GeoPoint,
    /// Route distance from the start to `point` (meters).
    pub cumulative_distance: f64,
    /// Distance from the query to `point` (meters).
    pub offset_distance: f64,
    /// Index of the segment start vertex.
    pub segment_index: usize,
    pub t: f64,
}

/// Project a coordinate onto the nearest route segment.
///
/// None for routes with fewer than 2 points.
pub fn project_onto_route(query: GeoPoint, route: &Route) -> Option<RouteProjection> {
    let points = route.points();
    let mut best: Option<RouteProjection> = None;

    for (i, pair) in points.windows(2).enumerate() {
        let start = pair[0].position();
        let seg = project_on_segment(query, start, pair[1].position());
        let offset = haversine(query, seg.point);

        if best.map_or(true, |b| offset < b.offset_distance) {
            best = Some(RouteProjection {
                point: seg.point,
                cumulative_distance: pair[0].cumulative_distance + haversine(start, seg.point),
                offset_distance: offset,
                segment_index: i,
                t: seg.t,
            });
        }
    }

    best
}

fn default_label(kind: ControlPointKind) -> &'static str {
    match kind {
        ControlPointKind::Pi => "PI",
        ControlPointKind::Pt => "PT",
        ControlPointKind::Pc => "PC",
    }
}

/// Project every marker and order them for reporting.
///
/// PI comes first, PT last, PCs in between by route distance. Unlabelled
/// PCs are numbered `PC 1`, `PC 2`, ... in that order.
pub fn place_control_points(inputs: &[ControlPointInput], route: &Route) -> Result<Vec<ControlPoint>> {
    let mut placed = Vec::with_capacity(inputs.len());

    for input in inputs {
        let raw = GeoPoint::new(input.lat, input.lng);
        let proj = project_onto_route(raw, route).ok_or_else(|| MarchError::InvalidControlPoint {
            label: input
                .label
                .clone()
                .unwrap_or_else(|| default_label(input.kind).to_string()),
            route_points: route.len(),
        })?;

        placed.push((input, raw, proj));
    }

    placed.sort_by(|a, b| {
        a.0.kind
            .rank()
            .cmp(&b.0.kind.rank())
            .then(a.2.cumulative_distance.total_cmp(&b.2.cumulative_distance))
    });

    let mut pc_count = 0;
    Ok(placed
        .into_iter()
        .map(|(input, raw, proj)| {
            let label = match (&input.label, input.kind) {
                (Some(label), _) => label.clone(),
                (None, ControlPointKind::Pc) => {
                    pc_count += 1;
                    format!("PC {pc_count}")
                }
                (None, kind) => default_label(kind).to_string(),
            };

            ControlPoint {
                kind: input.kind,
                label,
                raw,
                projected: proj.point,
                projected_cumulative_distance: proj.cumulative_distance,
                projected_offset_distance: proj.offset_distance,
            }
        })
        .collect())
}
