use geo::{BoundingRect, LineString};

use super::{LatLng, distance_meters};

/// Bounding box in geographic coordinates (degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from a set of positions
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let line: LineString<f64> = points.iter().map(|p| p.to_coord()).collect();
        let rect = line.bounding_rect()?;

        Some(Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        })
    }

    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.min_lat, self.min_lng)
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// East-west extent in meters, measured along the southern edge
    pub fn width_meters(&self) -> f64 {
        distance_meters(self.south_west(), LatLng::new(self.min_lat, self.max_lng))
    }

    /// North-south extent in meters, measured along the western edge
    pub fn height_meters(&self) -> f64 {
        distance_meters(self.south_west(), LatLng::new(self.max_lat, self.min_lng))
    }
}
