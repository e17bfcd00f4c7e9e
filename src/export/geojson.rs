use serde_json::{Value, json};

use crate::geometry::{LatLng, close_ring};
use crate::planner::FlightPath;

fn position(p: &LatLng) -> Value {
    json!([p.lng, p.lat])
}

/// GeoJSON FeatureCollection for map display
///
/// Features, in order:
/// - the property boundary as a Polygon
/// - one LineString per waypoint line
/// - one Point per shot, carrying category, pitch and bearing
pub fn to_geojson(plan: &FlightPath, boundary: &[LatLng]) -> Value {
    let mut features = Vec::with_capacity(1 + plan.waypoint_lines.len() + plan.shots.len());

    if boundary.len() >= 3 {
        let ring: Vec<Value> = close_ring(boundary).iter().map(position).collect();
        features.push(json!({
            "type": "Feature",
            "properties": {
                "kind": "boundary",
                "package": plan.package_id,
                "area_sq_meters": plan.area.sq_meters,
                "acres": plan.area.acres
            },
            "geometry": {
                "type": "Polygon",
                "coordinates": [ring]
            }
        }));
    }

    for (i, line) in plan.waypoint_lines.iter().enumerate() {
        let coordinates: Vec<Value> = line.iter().map(position).collect();
        features.push(json!({
            "type": "Feature",
            "properties": {
                "kind": "waypoint_line",
                "index": i
            },
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates
            }
        }));
    }

    for (i, shot) in plan.shots.iter().enumerate() {
        features.push(json!({
            "type": "Feature",
            "properties": {
                "kind": "shot",
                "index": i,
                "category": shot.category,
                "description": shot.description,
                "degrees_from_horizontal": shot.camera.degrees_from_horizontal,
                "pitch": shot.camera.pitch,
                "compass_bearing": shot.compass_bearing,
                "obstacle_id": shot.obstacle_id
            },
            "geometry": {
                "type": "Point",
                "coordinates": position(&shot.position)
            }
        }));
    }

    json!({
        "type": "FeatureCollection",
        "features": features
    })
}
