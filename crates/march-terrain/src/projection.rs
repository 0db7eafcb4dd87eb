//! Geographic projection and great-circle geometry.
//!
//! Route distances use the haversine formula. Planar work (projecting a
//! point onto a route segment) uses an equirectangular projection
//! anchored near the segment, accurate to <0.1% within a few hundred km.

use glam::DVec2;

use march_core::constants::{EARTH_RADIUS_M, METERS_PER_DEGREE};
use march_core::types::GeoPoint;

/// Local equirectangular projection anchored at a reference point.
///
/// The reference point maps to the plane origin. x = East, y = North, meters.
#[derive(Debug, Clone)]
pub struct GeoProjection {
    /// Reference latitude in degrees.
    pub ref_lat: f64,
    /// Reference longitude in degrees.
    pub ref_lng: f64,
    /// Cached cos(ref_lat) for longitude scaling.
    cos_ref_lat: f64,
}

impl GeoProjection {
    /// Create a projection centered at the given lat/lng (degrees).
    pub fn new(ref_lat: f64, ref_lng: f64) -> Self {
        Self {
            ref_lat,
            ref_lng,
            cos_ref_lat: ref_lat.to_radians().cos(),
        }
    }

    /// Geographic point to plane coordinates (meters).
    pub fn to_local(&self, point: GeoPoint) -> DVec2 {
        DVec2::new(
            (point.lng - self.ref_lng) * self.lng_scale(),
            (point.lat - self.ref_lat) * self.lat_scale(),
        )
    }

    /// Meters per degree of longitude at the reference latitude.
    pub fn lng_scale(&self) -> f64 {
        METERS_PER_DEGREE * self.cos_ref_lat
    }

    /// Meters per degree of latitude.
    pub fn lat_scale(&self) -> f64 {
        METERS_PER_DEGREE
    }
}

/// Great-circle distance between two points in meters.
pub fn haversine(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Result of projecting a point onto one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    pub point: GeoPoint,
    /// Parametric position along the segment, always within [0, 1].
    pub t: f64,
}

/// Project `p` onto segment `a`→`b`, clamped so the result stays on the segment.
///
/// A zero-length segment projects to its endpoint.
pub fn project_on_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> SegmentProjection {
    let proj = GeoProjection::new((a.lat + b.lat) / 2.0, a.lng);
    let origin = proj.to_local(a);
    let ab = proj.to_local(b) - origin;
    let ap = proj.to_local(p) - origin;

    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return SegmentProjection { point: a, t: 0.0 };
    }

    let t = (ap.dot(ab) / len_sq).clamp(0.0, 1.0);
    SegmentProjection {
        point: lerp(a, b, t),
        t,
    }
}

/// Insert intermediate vertices so no segment is longer than `max_spacing_m`.
///
/// Input vertices are kept. A non-positive spacing returns the input unchanged.
pub fn densify(vertices: &[GeoPoint], max_spacing_m: f64) -> Vec<GeoPoint> {
    if vertices.len() < 2 || !(max_spacing_m > 0.0) {
        return vertices.to_vec();
    }

    let mut out = Vec::with_capacity(vertices.len());
    for pair in vertices.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let steps = (haversine(a, b) / max_spacing_m).ceil().max(1.0) as usize;
        for k in 0..steps {
            out.push(lerp(a, b, k as f64 / steps as f64));
        }
    }
    if let Some(&last) = vertices.last() {
        out.push(last);
    }
    out
}

fn lerp(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
    GeoPoint::new(a.lat + (b.lat - a.lat) * t, a.lng + (b.lng - a.lng) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_axes() {
        let proj = GeoProjection::new(60.0, 10.0);

        let north = proj.to_local(GeoPoint::new(60.01, 10.0));
        assert!(north.x.abs() < 1e-9);
        assert!((north.y - 0.01 * METERS_PER_DEGREE).abs() < 1e-6);

        // Longitude shrinks with cos(60°) = 0.5.
        let east = proj.to_local(GeoPoint::new(60.0, 10.02));
        assert!(east.y.abs() < 1e-9);
        assert!((east.x - 0.01 * METERS_PER_DEGREE).abs() < 1e-6, "east: {}", east.x);
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let proj = GeoProjection::new(40.4, -3.7);
        let v = proj.to_local(GeoPoint::new(40.4, -3.7));
        assert!(v.length() < 1e-9);
    }

    #[test]
    fn test_haversine_known_distances() {
        let p = GeoPoint::new(-34.6, -58.4);
        assert!(haversine(p, p).abs() < 1e-9);

        // One degree of latitude ≈ 111.2 km on a 6371 km sphere.
        let d = haversine(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 111_194.9).abs() < 1.0, "1 degree lat: {d}");

        // Buenos Aires to Montevideo ≈ 200 km.
        let ba = GeoPoint::new(-34.6037, -58.3816);
        let mvd = GeoPoint::new(-34.9011, -56.1645);
        let d = haversine(ba, mvd);
        assert!(d > 195_000.0 && d < 210_000.0, "expected ~205 km, got {d:.0} m");
    }

    #[test]
    fn test_project_on_segment_midpoint() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.02);
        let p = GeoPoint::new(0.005, 0.01);

        let r = project_on_segment(p, a, b);
        assert!((r.t - 0.5).abs() < 1e-9);
        assert!(r.point.lat.abs() < 1e-12);
        assert!((r.point.lng - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_project_on_segment_clamps() {
        let a = GeoPoint::new(10.0, 10.0);
        let b = GeoPoint::new(10.0, 10.1);

        let before = project_on_segment(GeoPoint::new(10.0, 9.5), a, b);
        assert_eq!(before.t, 0.0);
        assert_eq!(before.point, a);

        let after = project_on_segment(GeoPoint::new(10.01, 11.0), a, b);
        assert_eq!(after.t, 1.0);
        assert_eq!(after.point, b);
    }

    #[test]
    fn test_project_on_degenerate_segment() {
        let a = GeoPoint::new(5.0, 5.0);
        let r = project_on_segment(GeoPoint::new(6.0, 6.0), a, a);
        assert_eq!(r.point, a);
        assert_eq!(r.t, 0.0);
    }

    #[test]
    fn test_densify_respects_spacing() {
        let route = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01), GeoPoint::new(0.01, 0.01)];
        let dense = densify(&route, 100.0);

        assert_eq!(dense.first(), route.first());
        assert_eq!(dense.last(), route.last());
        assert!(dense.contains(&route[1]), "input vertices are kept");
        for pair in dense.windows(2) {
            let d = haversine(pair[0], pair[1]);
            assert!(d <= 100.0 + 1e-6, "segment of {d} m exceeds spacing");
        }
        // ~1112 m per leg → 12 steps each.
        assert_eq!(dense.len(), 25);
    }

    #[test]
    fn test_densify_passthrough() {
        let route = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01)];
        assert_eq!(densify(&route, 0.0), route);
        assert_eq!(densify(&route[..1], 10.0), route[..1].to_vec());
    }
}
