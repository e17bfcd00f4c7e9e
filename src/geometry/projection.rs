use super::LatLng;

/// Meters spanned by one degree of latitude (and of longitude at the equator)
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Distance from the projection origin beyond which the flat-earth
/// approximation drifts past roughly 0.1% of the great-circle distance.
pub const MAX_LOCAL_EXTENT_M: f64 = 10_000.0;

/// Meters per degree of latitude (constant in the equirectangular model)
pub fn meters_per_degree_lat() -> f64 {
    METERS_PER_DEGREE
}

/// Meters per degree of longitude at the given latitude
pub fn meters_per_degree_lng(lat: f64) -> f64 {
    METERS_PER_DEGREE * lat.to_radians().cos()
}

/// Shift a position by a metric offset, using the meters-per-degree
/// at the position's own latitude.
pub fn offset_by_meters(origin: LatLng, east_m: f64, north_m: f64) -> LatLng {
    LocalProjection::new(origin).unproject(east_m, north_m)
}

/// Equirectangular projection from WGS84 to local meters
///
/// Uses the approximation:
/// - x = (lng - origin_lng) * cos(origin_lat) * 111320
/// - y = (lat - origin_lat) * 111320
///
/// Only valid for property-scale extents (see [`MAX_LOCAL_EXTENT_M`]);
/// regional distances need a real geodesic.
#[derive(Debug, Clone, Copy)]
pub struct LocalProjection {
    origin: LatLng,
    meters_per_lng: f64,
}

impl LocalProjection {
    /// Create a projection centered at `origin`
    pub fn new(origin: LatLng) -> Self {
        Self {
            origin,
            meters_per_lng: meters_per_degree_lng(origin.lat),
        }
    }

    pub fn origin(&self) -> LatLng {
        self.origin
    }

    /// Project a position to (x east, y north) meters from the origin
    pub fn project(&self, point: LatLng) -> (f64, f64) {
        let x = (point.lng - self.origin.lng) * self.meters_per_lng;
        let y = (point.lat - self.origin.lat) * METERS_PER_DEGREE;
        (x, y)
    }

    /// Project a slice of positions
    pub fn project_points(&self, points: &[LatLng]) -> Vec<(f64, f64)> {
        points.iter().map(|&p| self.project(p)).collect()
    }

    /// Inverse of [`LocalProjection::project`]
    ///
    /// At the poles a degree of longitude has no length, so the
    /// longitude stays at the origin's.
    pub fn unproject(&self, x: f64, y: f64) -> LatLng {
        let lat = self.origin.lat + y / METERS_PER_DEGREE;
        let lng = if self.meters_per_lng.abs() > f64::EPSILON {
            self.origin.lng + x / self.meters_per_lng
        } else {
            self.origin.lng
        };
        LatLng::new(lat, lng)
    }

    /// Whether `point` is close enough to the origin for the approximation to hold
    pub fn is_within_valid_extent(&self, point: LatLng) -> bool {
        let (x, y) = self.project(point);
        x.hypot(y) <= MAX_LOCAL_EXTENT_M
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance_meters;

    #[test]
    fn test_projection_origin() {
        let proj = LocalProjection::new(LatLng::new(44.8356, -69.2733));
        let (x, y) = proj.project(LatLng::new(44.8356, -69.2733));
        assert!(x.abs() < 0.01);
        assert!(y.abs() < 0.01);
    }

    #[test]
    fn test_projection_100m() {
        let origin = LatLng::new(44.8356, -69.2733);
        let proj = LocalProjection::new(origin);

        // 0.0009 degrees latitude ≈ 100 m
        let (_, y) = proj.project(LatLng::new(origin.lat + 0.0009, origin.lng));
        assert!((y - 100.188).abs() < 0.01);
    }

    #[test]
    fn test_round_trip() {
        let proj = LocalProjection::new(LatLng::new(37.7749, -122.4194));
        let p = proj.unproject(123.4, -56.7);
        let (x, y) = proj.project(p);
        assert!((x - 123.4).abs() < 1e-6);
        assert!((y + 56.7).abs() < 1e-6);
    }

    #[test]
    fn test_meters_per_degree_lng_shrinks_with_latitude() {
        assert!((meters_per_degree_lng(0.0) - METERS_PER_DEGREE).abs() < 1e-9);
        assert!((meters_per_degree_lng(60.0) - METERS_PER_DEGREE / 2.0).abs() < 1e-6);
        assert!(meters_per_degree_lng(80.0) < meters_per_degree_lng(45.0));
    }

    #[test]
    fn test_offset_matches_great_circle_at_property_scale() {
        let origin = LatLng::new(44.8356, -69.2733);
        let moved = offset_by_meters(origin, 30.0, 40.0);
        let d = distance_meters(origin, moved);
        // within 0.5% of the 50 m planar offset
        assert!((d - 50.0).abs() < 0.25);
    }

    #[test]
    fn test_valid_extent() {
        let origin = LatLng::new(10.0, 10.0);
        let proj = LocalProjection::new(origin);
        assert!(proj.is_within_valid_extent(offset_by_meters(origin, 500.0, 500.0)));
        assert!(!proj.is_within_valid_extent(LatLng::new(11.0, 10.0)));
    }
}
