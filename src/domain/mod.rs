pub mod boundary;
pub mod drone;
pub mod obstacle;
pub mod package;
pub mod shot;

pub use boundary::{Boundary, CIRCLE_SEGMENTS};
pub use drone::DroneSpecs;
pub use obstacle::{Obstacle, ObstacleKind};
pub use package::{BuildingLimit, PackageConfig, PackageError, PackageTier};
pub use shot::{Shot, ShotCategory};
