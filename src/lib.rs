//! shotplan - Plan drone photo coverage, shot positions and flight time for aerial photography quotes

pub mod config;
pub mod coverage;
pub mod domain;
pub mod export;
pub mod geometry;
pub mod planner;
pub mod survey;

pub use config::{FileConfig, Overlap, PlannerSettings};
pub use domain::{Boundary, DroneSpecs, Obstacle, PackageConfig};
pub use geometry::LatLng;
pub use planner::{FlightPath, plan_coverage};
