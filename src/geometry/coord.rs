use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Finite and inside the WGS84 latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.is_finite() && (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Component-wise comparison in degrees
    pub fn approx_eq(&self, other: &LatLng, epsilon: f64) -> bool {
        (self.lat - other.lat).abs() < epsilon && (self.lng - other.lng).abs() < epsilon
    }

    /// geo coordinate (x = longitude, y = latitude)
    pub fn to_coord(self) -> geo::Coord<f64> {
        geo::coord! { x: self.lng, y: self.lat }
    }

    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::from(self.to_coord())
    }

    pub fn from_point(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_axis_order() {
        let p = LatLng::new(44.8, -69.2);
        let coord = p.to_coord();
        assert_eq!(coord.x, -69.2);
        assert_eq!(coord.y, 44.8);
        assert_eq!(LatLng::from_point(p.to_point()), p);
    }

    #[test]
    fn test_validity() {
        assert!(LatLng::new(44.8, -69.2).is_valid());
        assert!(!LatLng::new(95.0, 0.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }
}
