pub mod budget;
pub mod building;
pub mod flight;
pub mod grid;
pub mod perimeter;
pub mod sampling;
pub mod validation;

pub use budget::{BudgetRequest, PhotoBudget, allocate_photo_budget};
pub use building::{
    BuildingOrbit, allocate_building_shots, building_demand, plan_building_orbits,
    select_obstacles,
};
pub use flight::{FlightPath, FlightTime, PhotoCounts, plan_coverage};
pub use grid::{
    Grid, GridFit, GridSelection, MAX_GRID_POINTS, MAX_REFINE_ATTEMPTS, REFINE_FACTOR, build_grid,
    fit_grid, select_evenly,
};
pub use perimeter::{DEFAULT_STANDOFF_M, OrbitPoint, plan_perimeter_orbit};
pub use sampling::pick_even_indices;
pub use validation::{ValidationResult, validate_flight_path};
