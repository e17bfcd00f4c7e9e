use geo::{Centroid, ChamberlainDuquetteArea, Contains, LineString, Polygon};
use serde::Serialize;

use super::{LatLng, distance_meters};

/// Tolerance (degrees) for treating the last vertex as a repeat of the first
const CLOSED_RING_EPSILON: f64 = 1e-12;

pub const SQ_FEET_PER_SQ_METER: f64 = 10.764;
pub const ACRES_PER_SQ_METER: f64 = 0.000247105;
pub const HECTARES_PER_SQ_METER: f64 = 0.0001;

fn is_closed(points: &[LatLng]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => first.approx_eq(last, CLOSED_RING_EPSILON),
        _ => false,
    }
}

/// Ring with the first vertex repeated at the end (unchanged if already closed)
pub fn close_ring(points: &[LatLng]) -> Vec<LatLng> {
    let mut ring = points.to_vec();
    if !ring.is_empty() && !is_closed(points) {
        ring.push(ring[0]);
    }
    ring
}

/// Ring without a trailing repeat of the first vertex
pub fn open_ring(points: &[LatLng]) -> Vec<LatLng> {
    let mut ring = points.to_vec();
    if is_closed(points) {
        ring.pop();
    }
    ring
}

/// Open ring with consecutive duplicate vertices removed
pub fn distinct_vertices(points: &[LatLng]) -> Vec<LatLng> {
    let mut out: Vec<LatLng> = Vec::with_capacity(points.len());
    for &p in points {
        if out
            .last()
            .is_none_or(|last| !last.approx_eq(&p, CLOSED_RING_EPSILON))
        {
            out.push(p);
        }
    }
    open_ring(&out)
}

/// Build a geo polygon (x = lng, y = lat); geo closes the exterior itself
pub fn to_polygon(ring: &[LatLng]) -> Polygon<f64> {
    let exterior: LineString<f64> = ring.iter().map(|p| p.to_coord()).collect();
    Polygon::new(exterior, vec![])
}

/// Spherical area of the ring in square meters (0 for fewer than 3 vertices)
pub fn area_sq_meters(ring: &[LatLng]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    to_polygon(ring).chamberlain_duquette_unsigned_area()
}

/// Perimeter in meters, including the closing edge
pub fn perimeter_meters(ring: &[LatLng]) -> f64 {
    let open = open_ring(ring);
    if open.len() < 2 {
        return 0.0;
    }
    (0..open.len())
        .map(|i| distance_meters(open[i], open[(i + 1) % open.len()]))
        .sum()
}

/// Strict point-in-polygon test (points on the boundary are outside)
pub fn contains(polygon: &Polygon<f64>, point: LatLng) -> bool {
    polygon.contains(&point.to_point())
}

pub fn centroid(ring: &[LatLng]) -> Option<LatLng> {
    if ring.is_empty() {
        return None;
    }
    to_polygon(ring).centroid().map(LatLng::from_point)
}

/// An area expressed in the units the quoting UI displays
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AreaMeasure {
    pub sq_meters: f64,
    pub sq_feet: f64,
    pub acres: f64,
    pub hectares: f64,
}

impl AreaMeasure {
    pub fn from_sq_meters(sq_meters: f64) -> Self {
        Self {
            sq_meters,
            sq_feet: sq_meters * SQ_FEET_PER_SQ_METER,
            acres: sq_meters * ACRES_PER_SQ_METER,
            hectares: sq_meters * HECTARES_PER_SQ_METER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::offset_by_meters;

    fn square(origin: LatLng, side_m: f64) -> Vec<LatLng> {
        vec![
            origin,
            offset_by_meters(origin, side_m, 0.0),
            offset_by_meters(origin, side_m, side_m),
            offset_by_meters(origin, 0.0, side_m),
        ]
    }

    #[test]
    fn test_close_and_open_ring() {
        let sq = square(LatLng::new(44.0, -69.0), 100.0);
        let closed = close_ring(&sq);
        assert_eq!(closed.len(), 5);
        assert_eq!(closed[0], closed[4]);
        assert_eq!(close_ring(&closed).len(), 5);
        assert_eq!(open_ring(&closed), sq);
        assert_eq!(open_ring(&sq), sq);
    }

    #[test]
    fn test_distinct_vertices_drops_repeats() {
        let a = LatLng::new(1.0, 1.0);
        let b = LatLng::new(1.0, 2.0);
        let c = LatLng::new(2.0, 2.0);
        assert_eq!(distinct_vertices(&[a, a, b, c, c, a]), vec![a, b, c]);
    }

    #[test]
    fn test_hectare_area() {
        let sq = square(LatLng::new(44.8356, -69.2733), 100.0);
        let area = area_sq_meters(&sq);
        // Projection and spherical area use slightly different radii
        assert!((area - 10_000.0).abs() < 50.0, "area was {area}");
        assert_eq!(area_sq_meters(&sq[..2]), 0.0);
    }

    #[test]
    fn test_perimeter() {
        let sq = square(LatLng::new(44.8356, -69.2733), 100.0);
        let p = perimeter_meters(&sq);
        assert!((p - 400.0).abs() < 2.0);
        assert!((perimeter_meters(&close_ring(&sq)) - p).abs() < 1e-9);
    }

    #[test]
    fn test_contains_and_centroid() {
        let origin = LatLng::new(44.8356, -69.2733);
        let sq = square(origin, 100.0);
        let polygon = to_polygon(&sq);
        let center = centroid(&sq).unwrap();

        assert!(contains(&polygon, center));
        assert!(!contains(&polygon, offset_by_meters(origin, -5.0, 50.0)));
        assert!(center.approx_eq(&offset_by_meters(origin, 50.0, 50.0), 1e-7));
    }

    #[test]
    fn test_area_measure() {
        let m = AreaMeasure::from_sq_meters(10_000.0);
        assert!((m.hectares - 1.0).abs() < 1e-12);
        assert!((m.acres - 2.47105).abs() < 1e-9);
    }
}
