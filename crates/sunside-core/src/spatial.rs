//! Spherical geometry for great-circle routes.

use crate::models::{GeoPoint, PathSegment};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Central angles below this (radians) are treated as coincident points.
pub const DEGENERATE_EPSILON_RAD: f64 = 1e-10;

/// Wrap a longitude into (-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Wrap an angle into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Central angle between two points in radians (haversine formula).
pub fn central_angle(p1: GeoPoint, p2: GeoPoint) -> f64 {
    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let dphi = (p2.lat - p1.lat).to_radians();
    let dlambda = (p2.lon - p1.lon).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt())
}

/// Great-circle distance between two points in kilometres.
pub fn great_circle_distance_km(p1: GeoPoint, p2: GeoPoint) -> f64 {
    EARTH_RADIUS_KM * central_angle(p1, p2)
}

/// True when the two points are too close for a direction to be defined.
pub fn is_degenerate(p1: GeoPoint, p2: GeoPoint) -> bool {
    central_angle(p1, p2) < DEGENERATE_EPSILON_RAD
}

/// True when the points are (nearly) antipodal and no unique minor arc exists.
pub fn is_antipodal(p1: GeoPoint, p2: GeoPoint) -> bool {
    (std::f64::consts::PI - central_angle(p1, p2)) < 1e-9
}

/// Point at `fraction` of the way along the minor great-circle arc from `p1` to `p2`.
///
/// Interpolates unit vectors with spherical weights rather than averaging
/// latitude and longitude, so routes bend poleward the way aircraft fly them
/// and cross the antimeridian correctly. `fraction` is clamped to [0, 1].
/// Coincident points return `p1`. Antipodal endpoints have no unique minor
/// arc; callers are expected to reject them first (see [`is_antipodal`]).
pub fn great_circle_point(p1: GeoPoint, p2: GeoPoint, fraction: f64) -> GeoPoint {
    let delta = central_angle(p1, p2);
    let sin_delta = delta.sin();
    if delta < DEGENERATE_EPSILON_RAD || sin_delta.abs() < DEGENERATE_EPSILON_RAD {
        return p1;
    }
    let t = fraction.clamp(0.0, 1.0);
    if t == 0.0 {
        return p1;
    }
    if t == 1.0 {
        return p2;
    }

    let a = ((1.0 - t) * delta).sin() / sin_delta;
    let b = (t * delta).sin() / sin_delta;

    let (x1, y1, z1) = to_unit_vector(p1);
    let (x2, y2, z2) = to_unit_vector(p2);
    let x = a * x1 + b * x2;
    let y = a * y1 + b * y2;
    let z = a * z1 + b * z2;

    let norm = (x * x + y * y + z * z).sqrt();
    let (x, y, z) = (x / norm, y / norm, z / norm);

    GeoPoint {
        lat: z.atan2((x * x + y * y).sqrt()).to_degrees(),
        lon: normalize_longitude(y.atan2(x).to_degrees()),
    }
}

fn to_unit_vector(p: GeoPoint) -> (f64, f64, f64) {
    let lat = p.lat.to_radians();
    let lon = p.lon.to_radians();
    (lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Initial bearing from `p1` toward `p2` in degrees [0, 360), 0 = north, 90 = east.
///
/// Coincident points have no direction; they return 0.0 so that no NaN
/// reaches the side tally.
pub fn initial_bearing(p1: GeoPoint, p2: GeoPoint) -> f64 {
    if is_degenerate(p1, p2) {
        return 0.0;
    }
    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let delta_lambda = (p2.lon - p1.lon).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let bearing = x.atan2(y).to_degrees();
    if bearing.is_finite() {
        normalize_degrees(bearing)
    } else {
        0.0
    }
}

/// Sun azimuth relative to the aircraft heading, in [0, 360).
pub fn relative_bearing(sun_azimuth: f64, heading: f64) -> f64 {
    normalize_degrees(sun_azimuth - heading + 360.0)
}

/// `count` points evenly spaced along the great circle, endpoints included.
///
/// Coincident endpoints collapse to a single point.
pub fn route_points(origin: GeoPoint, destination: GeoPoint, count: usize) -> Vec<GeoPoint> {
    if is_degenerate(origin, destination) || count < 2 {
        return vec![origin];
    }
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| great_circle_point(origin, destination, i as f64 / last))
        .collect()
}

/// Split a polyline wherever consecutive points jump more than 180 degrees of
/// longitude, so a renderer never draws the route the long way round.
///
/// Only the grouping changes; concatenating the segments gives back `points`.
pub fn segment_route(points: &[GeoPoint]) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current: Vec<GeoPoint> = Vec::new();

    for point in points {
        if let Some(prev) = current.last() {
            if (point.lon - prev.lon).abs() > 180.0 {
                segments.push(PathSegment {
                    points: std::mem::take(&mut current),
                });
            }
        }
        current.push(*point);
    }

    if !current.is_empty() {
        segments.push(PathSegment { points: current });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint { lat, lon }
    }

    fn assert_close(a: GeoPoint, b: GeoPoint) {
        assert!(
            (a.lat - b.lat).abs() < 1e-9 && (a.lon - b.lon).abs() < 1e-9,
            "expected {b:?}, got {a:?}"
        );
    }

    #[test]
    fn test_great_circle_distance_one_degree() {
        // ~111km per degree of latitude
        let dist = great_circle_distance_km(pt(0.0, 0.0), pt(1.0, 0.0));
        assert!((dist - 111.19).abs() < 0.1);
    }

    #[test]
    fn test_jfk_lax_distance() {
        let dist = great_circle_distance_km(pt(40.64, -73.78), pt(33.94, -118.41));
        assert!((dist - 3974.0).abs() < 20.0, "got {dist}");
    }

    #[test]
    fn test_coincident_points_interpolate_to_self() {
        let p = pt(51.47, -0.45);
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(great_circle_point(p, p, t), p);
        }
    }

    #[test]
    fn test_endpoints_are_reproduced() {
        let a = pt(40.64, -73.78);
        let b = pt(33.94, -118.41);
        assert_close(great_circle_point(a, b, 0.0), a);
        assert_close(great_circle_point(a, b, 1.0), b);
        assert_close(great_circle_point(a, b, 1e-15), a);
    }

    #[test]
    fn test_midpoint_on_equator() {
        let mid = great_circle_point(pt(0.0, 0.0), pt(0.0, 90.0), 0.5);
        assert_close(mid, pt(0.0, 45.0));
    }

    #[test]
    fn test_great_circle_bends_poleward() {
        // London to Los Angeles passes well north of either endpoint's latitude
        let mid = great_circle_point(pt(51.47, -0.45), pt(33.94, -118.41), 0.5);
        assert!(mid.lat > 55.0, "got {mid:?}");
    }

    #[test]
    fn test_distance_from_origin_is_monotonic() {
        let a = pt(35.55, 139.78);
        let b = pt(37.62, -122.38);
        let mut last = -1.0;
        for i in 0..=100 {
            let p = great_circle_point(a, b, i as f64 / 100.0);
            let d = central_angle(a, p);
            assert!(d >= last, "distance decreased at step {i}");
            last = d;
        }
    }

    #[test]
    fn test_interpolation_across_antimeridian_stays_in_range() {
        let tokyo = pt(35.55, 139.78);
        let sfo = pt(37.62, -122.38);
        for i in 0..=50 {
            let p = great_circle_point(tokyo, sfo, i as f64 / 50.0);
            assert!(p.lon > -180.0 && p.lon <= 180.0);
            assert!(p.lat > 30.0, "pacific route should arc north, got {p:?}");
        }
    }

    #[test]
    fn test_normalize_longitude_maps_minus_180_to_180() {
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert!((normalize_longitude(190.0) - (-170.0)).abs() < 1e-12);
        assert!((normalize_longitude(-190.0) - 170.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_degrees_never_returns_360() {
        assert_eq!(normalize_degrees(-1e-17), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-12);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = pt(0.0, 0.0);
        assert!((initial_bearing(origin, pt(10.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((initial_bearing(origin, pt(0.0, 10.0)) - 90.0).abs() < 1e-9);
        assert!((initial_bearing(origin, pt(-10.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((initial_bearing(origin, pt(0.0, -10.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_degenerate_falls_back_to_north() {
        let p = pt(12.0, 34.0);
        assert_eq!(initial_bearing(p, p), 0.0);
    }

    #[test]
    fn test_bearing_across_antimeridian_is_eastward() {
        let b = initial_bearing(pt(0.0, 179.0), pt(0.0, -179.0));
        assert!((b - 90.0).abs() < 1e-6, "got {b}");
    }

    #[test]
    fn test_relative_bearing_wraps() {
        assert!((relative_bearing(10.0, 350.0) - 20.0).abs() < 1e-12);
        assert!((relative_bearing(350.0, 10.0) - 340.0).abs() < 1e-12);
        assert_eq!(relative_bearing(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_route_points_include_endpoints() {
        let a = pt(40.64, -73.78);
        let b = pt(33.94, -118.41);
        let points = route_points(a, b, 16);
        assert_eq!(points.len(), 16);
        assert_close(points[0], a);
        assert_close(points[15], b);
    }

    #[test]
    fn test_route_points_degenerate_is_single_point() {
        let p = pt(1.0, 2.0);
        assert_eq!(route_points(p, p, 64), vec![p]);
    }

    #[test]
    fn test_segment_route_splits_at_antimeridian() {
        let points = route_points(pt(35.55, 139.78), pt(37.62, -122.38), 64);
        let segments = segment_route(&points);
        assert_eq!(segments.len(), 2);

        for segment in &segments {
            for pair in segment.points.windows(2) {
                assert!((pair[1].lon - pair[0].lon).abs() <= 180.0);
            }
        }

        let rejoined: Vec<GeoPoint> = segments.into_iter().flat_map(|s| s.points).collect();
        assert_eq!(rejoined, points);
    }

    #[test]
    fn test_segment_route_keeps_continental_route_whole() {
        let points = route_points(pt(40.64, -73.78), pt(33.94, -118.41), 32);
        let segments = segment_route(&points);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 32);
    }

    #[test]
    fn test_segment_route_empty_input() {
        assert!(segment_route(&[]).is_empty());
    }

    #[test]
    fn test_antipodal_detection() {
        assert!(is_antipodal(pt(0.0, 0.0), pt(0.0, 180.0)));
        assert!(!is_antipodal(pt(0.0, 0.0), pt(0.0, 179.0)));
    }
}
