use serde::{Deserialize, Serialize};

use crate::geometry::{LatLng, distinct_vertices, offset_by_meters};

/// Number of vertices used to approximate a circular boundary
pub const CIRCLE_SEGMENTS: usize = 64;

/// A property boundary as drawn on the map
///
/// Every shape is reduced to a vertex ring by [`Boundary::to_ring`]
/// before it reaches the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Boundary {
    Polygon {
        points: Vec<LatLng>,
    },
    Rectangle {
        south_west: LatLng,
        north_east: LatLng,
    },
    Circle {
        center: LatLng,
        radius_m: f64,
    },
}

impl Boundary {
    /// Open vertex ring (no repeated closing vertex)
    pub fn to_ring(&self) -> Vec<LatLng> {
        match self {
            Boundary::Polygon { points } => distinct_vertices(points),
            Boundary::Rectangle {
                south_west,
                north_east,
            } => vec![
                *south_west,
                LatLng::new(north_east.lat, south_west.lng),
                *north_east,
                LatLng::new(south_west.lat, north_east.lng),
            ],
            Boundary::Circle { center, radius_m } => (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = (i as f64 / CIRCLE_SEGMENTS as f64) * std::f64::consts::TAU;
                    offset_by_meters(*center, radius_m * angle.sin(), radius_m * angle.cos())
                })
                .collect(),
        }
    }

    /// Shape name as shown in the drawing toolbar
    pub fn shape_name(&self) -> &'static str {
        match self {
            Boundary::Polygon { .. } => "Polygon",
            Boundary::Rectangle { .. } => "Rectangle",
            Boundary::Circle { .. } => "Circle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance_meters;

    #[test]
    fn test_polygon_ring_is_opened() {
        let a = LatLng::new(44.0, -69.0);
        let b = LatLng::new(44.001, -69.0);
        let c = LatLng::new(44.001, -68.999);
        let boundary = Boundary::Polygon {
            points: vec![a, b, c, a],
        };
        assert_eq!(boundary.to_ring(), vec![a, b, c]);
    }

    #[test]
    fn test_rectangle_ring() {
        let boundary = Boundary::Rectangle {
            south_west: LatLng::new(44.0, -69.0),
            north_east: LatLng::new(44.001, -68.999),
        };
        let ring = boundary.to_ring();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[1], LatLng::new(44.001, -69.0));
        assert_eq!(ring[3], LatLng::new(44.0, -68.999));
    }

    #[test]
    fn test_circle_ring() {
        let center = LatLng::new(44.8356, -69.2733);
        let boundary = Boundary::Circle {
            center,
            radius_m: 50.0,
        };
        let ring = boundary.to_ring();
        assert_eq!(ring.len(), CIRCLE_SEGMENTS);
        for p in &ring {
            assert!((distance_meters(center, *p) - 50.0).abs() < 0.5);
        }
        // first vertex due north
        assert!(ring[0].lat > center.lat);
        assert!((ring[0].lng - center.lng).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"{"type": "circle", "center": {"lat": 44.0, "lng": -69.0}, "radius_m": 25.0}"#;
        let boundary: Boundary = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.shape_name(), "Circle");
    }
}
