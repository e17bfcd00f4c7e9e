use geo::{Area, LineString, Polygon};
use serde::Serialize;

use crate::geometry::{
    LatLng, LocalProjection, bearing_degrees, centroid, distance_meters, distinct_vertices,
};

/// Outward distance of the property orbit from the boundary in meters
pub const DEFAULT_STANDOFF_M: f64 = 10.0;

/// Passes spent pulling a point out of a concave notch
const MAX_CLEARANCE_PASSES: usize = 8;

type Edge = ((f64, f64), (f64, f64), f64);

/// One stop on the orbit around the whole property
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitPoint {
    pub position: LatLng,
    /// Bearing from this point to the property centroid
    pub bearing_to_center: f64,
    pub distance_to_center: f64,
}

/// Place `count` points evenly along the boundary, pushed `standoff`
/// meters outward
///
/// Point `k` sits `spacing / 2 + k * spacing` along the boundary where
/// `spacing = perimeter / count`, so no point lands on the starting vertex.
///
/// # Returns
/// * `None` if `count` is 0, the ring has fewer than 3 distinct vertices,
///   the standoff is not finite or the perimeter is empty
pub fn plan_perimeter_orbit(ring: &[LatLng], count: usize, standoff: f64) -> Option<Vec<OrbitPoint>> {
    let vertices = distinct_vertices(ring);
    if count == 0 || vertices.len() < 3 || !standoff.is_finite() {
        return None;
    }
    if !vertices.iter().all(LatLng::is_finite) {
        return None;
    }

    let center = centroid(&vertices)?;
    let projection = LocalProjection::new(center);
    let local = projection.project_points(&vertices);

    let edges: Vec<Edge> = (0..local.len())
        .map(|i| {
            let a = local[i];
            let b = local[(i + 1) % local.len()];
            (a, b, (b.0 - a.0).hypot(b.1 - a.1))
        })
        .collect();
    let perimeter: f64 = edges.iter().map(|e| e.2).sum();
    if !(perimeter > 0.0) || !perimeter.is_finite() {
        return None;
    }

    // Counter-clockwise rings have the interior on the left of each edge
    let exterior: LineString<f64> = local.iter().copied().collect();
    let winding = if Polygon::new(exterior, vec![]).signed_area() >= 0.0 {
        1.0
    } else {
        -1.0
    };

    let spacing = perimeter / count as f64;
    let mut points = Vec::with_capacity(count);
    let mut edge_index = 0;
    let mut edge_start = 0.0;

    for k in 0..count {
        let along = spacing / 2.0 + k as f64 * spacing;
        while edge_index < edges.len() - 1 && edge_start + edges[edge_index].2 < along {
            edge_start += edges[edge_index].2;
            edge_index += 1;
        }

        let (a, b, length) = edges[edge_index];
        if !(length > 0.0) {
            continue;
        }
        let t = ((along - edge_start) / length).clamp(0.0, 1.0);
        let dx = (b.0 - a.0) / length;
        let dy = (b.1 - a.1) / length;
        let x = a.0 + t * (b.0 - a.0) + winding * dy * standoff;
        let y = a.1 + t * (b.1 - a.1) - winding * dx * standoff;
        let (x, y) = clear_boundary(&edges, (x, y), standoff);

        let position = projection.unproject(x, y);
        points.push(OrbitPoint {
            position,
            bearing_to_center: bearing_degrees(position, center),
            distance_to_center: distance_meters(position, center),
        });
    }

    if points.is_empty() { None } else { Some(points) }
}

/// Closest point to `p` on the segment `a`-`b` of the given length
fn nearest_on_edge(p: (f64, f64), (a, b, length): Edge) -> (f64, f64) {
    if !(length > 0.0) {
        return a;
    }
    let t = (((p.0 - a.0) * (b.0 - a.0) + (p.1 - a.1) * (b.1 - a.1)) / (length * length))
        .clamp(0.0, 1.0);
    (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1))
}

/// Move `p` away from the nearest boundary point until every edge is at
/// least `standoff` away
///
/// Offsetting along one edge's normal lands inside the notch of a reflex
/// vertex, too close to the neighbouring edge. Each pass puts the point
/// exactly `standoff` from whichever edge is currently nearest.
fn clear_boundary(edges: &[Edge], mut p: (f64, f64), standoff: f64) -> (f64, f64) {
    let tolerance = standoff * 1e-6;
    for _ in 0..MAX_CLEARANCE_PASSES {
        let Some((near, dist)) = edges
            .iter()
            .map(|&edge| {
                let q = nearest_on_edge(p, edge);
                (q, (p.0 - q.0).hypot(p.1 - q.1))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
        else {
            return p;
        };
        if dist >= standoff - tolerance || !(dist > 0.0) {
            break;
        }
        let scale = standoff / dist;
        p = (near.0 + (p.0 - near.0) * scale, near.1 + (p.1 - near.1) * scale);
    }
    p
}
