//! Route profiling: raw samples to a distance- and slope-annotated `Route`.
//!
//! Holes (samples without a finite elevation) are filled from their
//! nearest valid neighbours before distances and slopes are derived.
//! Quality problems are recorded on the route and logged, never fatal.

use tracing::{debug, warn};

use march_core::constants::{ANOMALOUS_JUMP_M, MIN_VALID_PERCENT};
use march_core::enums::VegetationType;
use march_core::error::{DataQualityWarning, MarchError, Result};
use march_core::types::{QualityReport, RawSample, Route, RoutePoint};

use crate::projection::haversine;

/// Elevation and vegetation after gap filling.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Filled {
    elevation: f64,
    vegetation: VegetationType,
}

/// Fill holes from the nearest valid samples on either side.
///
/// Both neighbours: elevation interpolated by index, vegetation from the
/// backward one. One neighbour: copied. None: sea level, bare ground.
fn fill_gaps(samples: &[RawSample]) -> Vec<Filled> {
    let valid: Vec<Option<f64>> = samples
        .iter()
        .map(|s| s.elevation.filter(|e| e.is_finite()))
        .collect();

    let own_vegetation = |s: &RawSample| s.vegetation.unwrap_or_default();

    (0..samples.len())
        .map(|i| {
            if let Some(elevation) = valid[i] {
                return Filled {
                    elevation,
                    vegetation: own_vegetation(&samples[i]),
                };
            }

            let prev = (0..i).rev().find_map(|j| valid[j].map(|e| (j, e)));
            let next = (i + 1..samples.len()).find_map(|j| valid[j].map(|e| (j, e)));

            let (elevation, neighbour_vegetation) = match (prev, next) {
                (Some((pj, pe)), Some((nj, ne))) => {
                    let frac = (i - pj) as f64 / (nj - pj) as f64;
                    (pe + (ne - pe) * frac, own_vegetation(&samples[pj]))
                }
                (Some((j, e)), None) | (None, Some((j, e))) => (e, own_vegetation(&samples[j])),
                (None, None) => (0.0, VegetationType::BareGround),
            };

            Filled {
                elevation,
                vegetation: samples[i].vegetation.unwrap_or(neighbour_vegetation),
            }
        })
        .collect()
}

/// Build a `Route` from acquired samples in march order.
///
/// Fails only when fewer than 2 samples are supplied.
pub fn build_route(samples: &[RawSample]) -> Result<Route> {
    if samples.len() < 2 {
        return Err(MarchError::NoRouteSelected {
            supplied: samples.len(),
        });
    }

    let total_points = samples.len();
    let valid_points = samples.iter().filter(|s| s.has_valid_elevation()).count();
    let filled_points = total_points - valid_points;
    let valid_percent = valid_points as f64 / total_points as f64 * 100.0;

    let filled = fill_gaps(samples);

    let mut quality = QualityReport {
        total_points,
        valid_points,
        valid_percent,
        filled_points,
        ..Default::default()
    };

    if valid_percent < MIN_VALID_PERCENT {
        warn!(
            valid_percent,
            threshold = MIN_VALID_PERCENT,
            "route elevation data below validity threshold"
        );
        quality.warnings.push(DataQualityWarning::LowValidity {
            valid_percent,
            threshold: MIN_VALID_PERCENT,
        });
    }
    if filled_points > 0 {
        quality
            .warnings
            .push(DataQualityWarning::FilledHoles { count: filled_points });
    }

    let mut points: Vec<RoutePoint> = Vec::with_capacity(total_points);
    let mut cumulative = 0.0;

    for (i, (sample, fill)) in samples.iter().zip(&filled).enumerate() {
        let (segment_distance, slope_percent) = match points.last() {
            None => (0.0, 0.0),
            Some(prev) => {
                let d = haversine(prev.position(), sample.position());
                let delta = fill.elevation - prev.elevation;

                if delta.abs() > quality.max_elevation_delta {
                    quality.max_elevation_delta = delta.abs();
                }
                if delta.abs() > ANOMALOUS_JUMP_M {
                    quality.anomalous_jumps += 1;
                    warn!(index = i, delta_m = delta, "anomalous elevation jump");
                    quality.warnings.push(DataQualityWarning::AnomalousJump {
                        index: i,
                        delta_m: delta,
                        cumulative_distance: cumulative + d,
                    });
                }

                let slope = if d > 0.0 { delta / d * 100.0 } else { 0.0 };
                (d, slope)
            }
        };

        cumulative += segment_distance;
        points.push(RoutePoint {
            lat: sample.lat,
            lng: sample.lng,
            elevation: fill.elevation,
            vegetation: fill.vegetation,
            slope_percent,
            segment_distance,
            cumulative_distance: cumulative,
        });
    }

    debug!(
        points = total_points,
        valid_percent,
        filled = filled_points,
        distance_m = cumulative,
        "route profiled"
    );

    Ok(Route::new(points, quality))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn sample(lng: f64, elevation: Option<f64>) -> RawSample {
        RawSample::new(0.0, lng, elevation, Some(VegetationType::BareGround))
    }

    #[test]
    fn test_too_few_samples() {
        assert_eq!(build_route(&[]), Err(MarchError::NoRouteSelected { supplied: 0 }));
        let one = [sample(0.0, Some(10.0))];
        assert_eq!(build_route(&one), Err(MarchError::NoRouteSelected { supplied: 1 }));
    }

    #[test]
    fn test_distance_and_slope() {
        // 0.009° of longitude at the equator ≈ 1000.75 m
        let route = build_route(&[sample(0.0, Some(100.0)), sample(0.009, Some(220.0))]).unwrap();
        let p = route.points();

        assert_eq!(p[0].slope_percent, 0.0);
        assert_eq!(p[0].segment_distance, 0.0);
        assert!((p[1].segment_distance - 1000.75).abs() < 0.1);
        assert!((p[1].slope_percent - 120.0 / p[1].segment_distance * 100.0).abs() < 1e-12);
        assert_eq!(route.total_distance(), p[1].cumulative_distance);
        assert!(route.quality().warnings.iter().any(|w| matches!(w, DataQualityWarning::AnomalousJump { index: 1, .. })));
    }

    #[test]
    fn test_interior_hole_interpolated() {
        let samples = [
            sample(0.0, Some(100.0)),
            sample(0.001, None),
            sample(0.002, Some(f64::NAN)),
            sample(0.003, Some(130.0)),
        ];
        let route = build_route(&samples).unwrap();
        let e: Vec<f64> = route.points().iter().map(|p| p.elevation).collect();

        assert!((e[1] - 110.0).abs() < 1e-9);
        assert!((e[2] - 120.0).abs() < 1e-9);
        assert_eq!(route.quality().valid_points, 2);
        assert_eq!(route.quality().filled_points, 2);
        assert!(!route.quality().meets_threshold());
    }

    #[test]
    fn test_edge_holes_copy_neighbour() {
        let samples = [
            RawSample::new(0.0, 0.0, None, None),
            RawSample::new(0.0, 0.001, Some(50.0), Some(VegetationType::GrassOrShrub)),
            RawSample::new(0.0, 0.002, None, None),
        ];
        let route = build_route(&samples).unwrap();
        for p in route.points() {
            assert_eq!(p.elevation, 50.0);
            assert_eq!(p.vegetation, VegetationType::GrassOrShrub);
        }
    }

    #[test]
    fn test_all_invalid_defaults_to_sea_level() {
        let samples = [RawSample::new(0.0, 0.0, None, None), RawSample::new(0.0, 0.001, None, None)];
        let route = build_route(&samples).unwrap();

        for p in route.points() {
            assert_eq!(p.elevation, 0.0);
            assert_eq!(p.vegetation, VegetationType::BareGround);
            assert_eq!(p.slope_percent, 0.0);
        }
        assert_eq!(route.quality().valid_percent, 0.0);
        assert!(matches!(
            route.quality().warnings[0],
            DataQualityWarning::LowValidity { .. }
        ));
    }

    #[test]
    fn test_valid_sample_without_vegetation_is_unclassified() {
        let samples = [RawSample::new(0.0, 0.0, Some(1.0), None), sample(0.001, Some(1.0))];
        let route = build_route(&samples).unwrap();
        assert_eq!(route.points()[0].vegetation, VegetationType::Unclassified);
    }

    #[test]
    fn test_duplicate_points_have_zero_slope() {
        let route = build_route(&[sample(0.0, Some(10.0)), sample(0.0, Some(30.0))]).unwrap();
        assert_eq!(route.points()[1].segment_distance, 0.0);
        assert_eq!(route.points()[1].slope_percent, 0.0);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let samples: Vec<RawSample> = (0..200)
            .map(|i| {
                let elevation = if rng.gen_bool(0.2) { None } else { Some(rng.gen_range(0.0..800.0)) };
                RawSample::new(-31.0 + i as f64 * 0.0008, -64.0, elevation, None)
            })
            .collect();

        let first = build_route(&samples).unwrap();
        let resampled: Vec<RawSample> = first
            .points()
            .iter()
            .map(|p| RawSample::new(p.lat, p.lng, Some(p.elevation), Some(p.vegetation)))
            .collect();
        let second = build_route(&resampled).unwrap();

        assert_eq!(first.points(), second.points());
        assert_eq!(second.quality().filled_points, 0);

        for pair in second.points().windows(2) {
            assert!(pair[1].cumulative_distance >= pair[0].cumulative_distance);
        }
    }
}
