//! Tests for core types, enums and plan configuration.

use crate::config::MarchPlan;
use crate::constants::*;
use crate::enums::*;
use crate::error::{DataQualityWarning, MarchError};
use crate::types::*;

// ---- Serde ----

#[test]
fn test_vegetation_type_serde() {
    let variants = vec![
        VegetationType::BareGround,
        VegetationType::SparseVegetation,
        VegetationType::GrassOrShrub,
        VegetationType::LightForest,
        VegetationType::DenseForest,
        VegetationType::WaterOrCloud,
        VegetationType::Unclassified,
    ];
    for v in variants {
        let json = serde_json::to_string(&v).unwrap();
        let back: VegetationType = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
    assert_eq!(
        serde_json::to_string(&VegetationType::BareGround).unwrap(),
        "\"bare_ground\""
    );
}

#[test]
fn test_control_point_kind_wire_names() {
    assert_eq!(serde_json::to_string(&ControlPointKind::Pi).unwrap(), "\"PI\"");
    assert_eq!(serde_json::to_string(&ControlPointKind::Pt).unwrap(), "\"PT\"");
    let back: ControlPointKind = serde_json::from_str("\"PC\"").unwrap();
    assert_eq!(back, ControlPointKind::Pc);
}

#[test]
fn test_quality_warning_tagged() {
    let w = DataQualityWarning::LowValidity {
        valid_percent: 50.0,
        threshold: MIN_VALID_PERCENT,
    };
    let json = serde_json::to_string(&w).unwrap();
    assert!(json.contains("\"type\":\"LowValidity\""), "got {json}");
}

// ---- Vegetation ----

#[test]
fn test_ndvi_classification() {
    assert_eq!(VegetationType::from_ndvi(-0.5), VegetationType::WaterOrCloud);
    assert_eq!(VegetationType::from_ndvi(0.0), VegetationType::BareGround);
    assert_eq!(VegetationType::from_ndvi(0.2), VegetationType::SparseVegetation);
    assert_eq!(VegetationType::from_ndvi(0.45), VegetationType::GrassOrShrub);
    assert_eq!(VegetationType::from_ndvi(0.7), VegetationType::LightForest);
    assert_eq!(VegetationType::from_ndvi(0.95), VegetationType::DenseForest);
    assert_eq!(VegetationType::from_ndvi(f64::NAN), VegetationType::Unclassified);
}

#[test]
fn test_ndvi_bounds_are_exclusive_upper() {
    assert_eq!(VegetationType::from_ndvi(NDVI_BARE_MAX), VegetationType::SparseVegetation);
    assert_eq!(VegetationType::from_ndvi(NDVI_WATER_MAX), VegetationType::BareGround);
}

// ---- Columns ----

#[test]
fn test_temporal_depth() {
    // 10 vehicles, 50 m apart → 450 m; at 27 km/h → 1 minute.
    let col = Column::new("A", 10, 50.0, 27.0);
    assert!((col.temporal_depth() - 1.0).abs() < 1e-9);

    // A single vehicle has no depth.
    let single = Column::new("B", 1, 100.0, 30.0);
    assert_eq!(single.temporal_depth(), 0.0);
}

#[test]
fn test_control_point_rank_order() {
    assert!(ControlPointKind::Pi.rank() < ControlPointKind::Pc.rank());
    assert!(ControlPointKind::Pc.rank() < ControlPointKind::Pt.rank());
}

// ---- Route ----

#[test]
fn test_route_total_from_last_point() {
    let p = |d: f64| RoutePoint {
        lat: 0.0,
        lng: 0.0,
        elevation: 0.0,
        vegetation: VegetationType::BareGround,
        slope_percent: 0.0,
        segment_distance: 0.0,
        cumulative_distance: d,
    };
    let route = Route::new(vec![p(0.0), p(400.0), p(1250.0)], QualityReport::default());
    assert_eq!(route.len(), 3);
    assert_eq!(route.total_distance(), 1250.0);
}

#[test]
fn test_raw_sample_validity() {
    assert!(RawSample::new(0.0, 0.0, Some(12.0), None).has_valid_elevation());
    assert!(!RawSample::new(0.0, 0.0, Some(f64::NAN), None).has_valid_elevation());
    assert!(!RawSample::new(0.0, 0.0, Some(f64::INFINITY), None).has_valid_elevation());
    assert!(!RawSample::hole(GeoPoint::new(1.0, 2.0)).has_valid_elevation());
}

// ---- Plan configuration ----

#[test]
fn test_plan_defaults_from_empty_json() {
    let plan = MarchPlan::from_json("{}").unwrap();
    assert!(plan.series.is_empty());
    assert_eq!(plan.halts, HaltPolicy::default());
    assert_eq!(plan.halts.interval_minutes, DEFAULT_HALT_INTERVAL_MIN);

    let plan = plan.with_defaults();
    assert_eq!(plan.series.len(), 1);
    assert_eq!(plan.series[0].columns.len(), 1);
    assert_eq!(plan.series[0].columns[0].vehicle_count, DEFAULT_VEHICLE_COUNT);
}

#[test]
fn test_plan_parses_series_and_control_points() {
    let json = r#"{
        "route": [{"lat": 40.0, "lng": -3.0}, {"lat": 40.01, "lng": -3.0}],
        "control_points": [{"kind": "PI", "lat": 40.0, "lng": -3.0}],
        "halts": {"interval_minutes": 30, "duration_minutes": 5},
        "series": [{
            "name": "S1",
            "interval_to_previous_series_minutes": 15,
            "columns": [{"name": "C1", "vehicle_count": 4,
                         "intervehicular_distance_m": 25, "march_speed_kmh": 20}]
        }]
    }"#;
    let plan = MarchPlan::from_json(json).unwrap().with_defaults();
    assert_eq!(plan.route.len(), 2);
    assert_eq!(plan.control_points[0].kind, ControlPointKind::Pi);
    assert_eq!(plan.halts.interval_minutes, 30.0);
    assert_eq!(plan.halts.start_offset_minutes, 0.0);
    assert_eq!(plan.series.len(), 1);
    assert_eq!(plan.series[0].interval_to_previous_series_minutes, 15.0);
    assert_eq!(plan.series[0].columns[0].interval_to_next_column_minutes, 0.0);
}

// ---- Errors ----

#[test]
fn test_impassable_message_names_distance() {
    let err = MarchError::ImpassableSegment {
        column: "Recce".into(),
        point_index: 7,
        cumulative_distance: 1234.4,
        slope_percent: 41.0,
        vegetation: VegetationType::BareGround,
    };
    let msg = err.to_string();
    assert!(msg.contains("Recce"), "{msg}");
    assert!(msg.contains("1234 m"), "{msg}");
    assert!(msg.contains("41.0%"), "{msg}");
}
