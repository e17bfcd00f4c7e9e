//! Great-circle distance and bearing on a spherical earth

use super::LatLng;

/// Mean earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

pub const FEET_PER_METER: f64 = 3.28084;
pub const MILES_PER_METER: f64 = 0.000621371;

/// Haversine distance between two positions in meters
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial compass bearing from `from` to `to`
///
/// # Returns
/// * Degrees in [0, 360), 0 = north, 90 = east
pub fn bearing_degrees(from: LatLng, to: LatLng) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Sum of the segment lengths of an open polyline
pub fn path_length_meters(points: &[LatLng]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance_meters(pair[0], pair[1]))
        .sum()
}

/// A distance expressed in the units the quoting UI displays
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct DistanceMeasure {
    pub meters: f64,
    pub feet: f64,
    pub miles: f64,
}

impl DistanceMeasure {
    pub fn from_meters(meters: f64) -> Self {
        Self {
            meters,
            feet: meters * FEET_PER_METER,
            miles: meters * MILES_PER_METER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_one_degree_latitude() {
        let d = distance_meters(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 10.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = LatLng::new(44.8356, -69.2733);
        let b = LatLng::new(44.8400, -69.2700);
        assert!((distance_meters(a, b) - distance_meters(b, a)).abs() < 1e-9);
        assert_eq!(distance_meters(a, a), 0.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = LatLng::new(10.0, 10.0);
        assert!(bearing_degrees(origin, LatLng::new(10.01, 10.0)).abs() < 1e-6);
        assert!((bearing_degrees(origin, LatLng::new(10.0, 10.01)) - 90.0).abs() < 0.01);
        assert!((bearing_degrees(origin, LatLng::new(9.99, 10.0)) - 180.0).abs() < 1e-6);
        assert!((bearing_degrees(origin, LatLng::new(10.0, 9.99)) - 270.0).abs() < 0.01);
    }

    #[test]
    fn test_path_length() {
        let pts = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.001),
            LatLng::new(0.0, 0.002),
        ];
        let total = path_length_meters(&pts);
        let direct = distance_meters(pts[0], pts[2]);
        assert!((total - direct).abs() < 1e-6);
        assert_eq!(path_length_meters(&pts[..1]), 0.0);
    }

    #[test]
    fn test_distance_measure_units() {
        let m = DistanceMeasure::from_meters(1000.0);
        assert!((m.feet - 3280.84).abs() < 1e-6);
        assert!((m.miles - 0.621371).abs() < 1e-9);
    }
}
