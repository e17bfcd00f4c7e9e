pub mod bounds;
pub mod coord;
pub mod geodesic;
pub mod polygon;
pub mod projection;

pub use bounds::Bounds;
pub use coord::LatLng;
pub use geodesic::{DistanceMeasure, bearing_degrees, distance_meters, path_length_meters};
pub use polygon::{
    AreaMeasure, area_sq_meters, centroid, close_ring, contains, distinct_vertices, open_ring,
    perimeter_meters, to_polygon,
};
pub use projection::{
    LocalProjection, meters_per_degree_lat, meters_per_degree_lng, offset_by_meters,
};
