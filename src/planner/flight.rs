//! Flight path assembly
//!
//! Combines the photo budget, the top-down lattice, the property orbit and
//! the structure orbits into one [`FlightPath`]. Every call builds a fresh
//! value from its arguments; nothing is cached between calls.

use serde::Serialize;

use crate::config::{Overlap, PlannerSettings};
use crate::coverage::{
    Footprint, PhotoEstimate, Spacing, estimate_photos_needed, photo_spacing,
    predict_shot_coverage,
};
use crate::domain::{DroneSpecs, Obstacle, PackageConfig, Shot, ShotCategory};
use crate::geometry::{
    AreaMeasure, DistanceMeasure, LatLng, area_sq_meters, bearing_degrees, centroid,
    distinct_vertices, path_length_meters, perimeter_meters,
};

use super::budget::{BudgetRequest, PhotoBudget, allocate_photo_budget};
use super::building::{BuildingOrbit, building_demand, plan_building_orbits, select_obstacles};
use super::grid::{GridSelection, fit_grid, select_evenly};
use super::perimeter::{OrbitPoint, plan_perimeter_orbit};

/// Photos actually placed, per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhotoCounts {
    pub total: u32,
    pub land: u32,
    pub top_down: u32,
    pub angled: u32,
    pub building: u32,
    pub point_of_interest: u32,
}

impl PhotoCounts {
    fn from_shots(shots: &[Shot]) -> Self {
        let mut counts = PhotoCounts::default();
        for shot in shots {
            match shot.category {
                ShotCategory::TopDown => counts.top_down += 1,
                ShotCategory::Angled => counts.angled += 1,
                ShotCategory::Building => counts.building += 1,
                ShotCategory::PointOfInterest => counts.point_of_interest += 1,
            }
        }
        counts.land = counts.top_down + counts.angled;
        counts.total = counts.land + counts.building + counts.point_of_interest;
        counts
    }
}

/// Estimated time on station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightTime {
    pub total_seconds: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub formatted: String,
}

impl FlightTime {
    pub fn from_photos(photos: u32, seconds_per_photo: f64) -> Self {
        let raw = photos as f64 * seconds_per_photo;
        let total_seconds = if raw.is_finite() && raw > 0.0 {
            raw.round() as u64
        } else {
            0
        };
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        Self {
            total_seconds,
            minutes,
            seconds,
            formatted: format!("{}m {}s", minutes, seconds),
        }
    }
}

/// Complete photo plan for one property and package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightPath {
    pub package_id: String,
    pub altitude_m: f64,
    pub gsd_cm_per_px: f64,
    pub footprint: Footprint,
    pub spacing: Spacing,
    pub center: LatLng,
    pub area: AreaMeasure,
    pub perimeter: DistanceMeasure,
    pub photo_estimate: PhotoEstimate,
    pub budget: PhotoBudget,
    /// Top-down grid rows flown as continuous lines
    pub waypoint_lines: Vec<Vec<LatLng>>,
    /// Every shot: top-down, then property orbit, then structures, then
    /// points of interest
    pub shots: Vec<Shot>,
    pub property_orbit: Vec<OrbitPoint>,
    pub building_orbits: Vec<BuildingOrbit>,
    pub photo_counts: PhotoCounts,
    pub total_distance: DistanceMeasure,
    pub flight_time: FlightTime,
    pub grid_attempts: u32,
    pub grid_reached_target: bool,
}

impl FlightPath {
    /// Copy of this plan with one oblique shot per point of interest, each
    /// aimed at the property center
    ///
    /// Non-finite positions are skipped.
    pub fn with_points_of_interest(
        &self,
        points: &[LatLng],
        drone: &DroneSpecs,
        settings: &PlannerSettings,
    ) -> FlightPath {
        let mut plan = self.clone();
        for &position in points.iter().filter(|p| p.is_finite()) {
            plan.shots.push(aimed_shot(
                position,
                self.center,
                ShotCategory::PointOfInterest,
                self.altitude_m,
                drone,
            ));
        }
        plan.photo_counts = PhotoCounts::from_shots(&plan.shots);
        plan.flight_time =
            FlightTime::from_photos(plan.photo_counts.total, settings.seconds_per_photo);
        plan
    }
}

/// Oblique shot from `position` toward a ground-level target
fn aimed_shot(
    position: LatLng,
    target: LatLng,
    category: ShotCategory,
    altitude: f64,
    drone: &DroneSpecs,
) -> Shot {
    let prediction = predict_shot_coverage(position, target, altitude, 0.0, drone);
    Shot::oblique(
        position,
        category,
        prediction.angle,
        bearing_degrees(position, target),
        prediction.field_of_view,
    )
}

/// Plan every photo for a property
///
/// # Arguments
/// * `boundary` - open or closed vertex ring of the property
/// * `obstacles` - structures marked on the property, in survey order
/// * `overlap` - forward/side overlap percentages
/// * `package` - photo package being quoted
///
/// # Returns
/// * `None` when the boundary is degenerate, the drone cannot produce a
///   usable footprint, the overlap leaves no spacing, or no shot layout fits
pub fn plan_coverage(
    boundary: &[LatLng],
    obstacles: &[Obstacle],
    drone: &DroneSpecs,
    overlap: &Overlap,
    package: &PackageConfig,
    settings: &PlannerSettings,
) -> Option<FlightPath> {
    if !drone.is_valid() {
        return None;
    }
    let ring = distinct_vertices(boundary);
    if ring.len() < 3 || !ring.iter().all(LatLng::is_finite) {
        return None;
    }
    let area = area_sq_meters(&ring);
    if !(area > 0.0) || !area.is_finite() {
        return None;
    }
    let center = centroid(&ring)?;

    let altitude = drone.altitude_for(package.altitude_multiplier);
    let footprint = drone.footprint_at(altitude);
    let gsd = drone.gsd_at(altitude);
    if !footprint.is_valid() || !(gsd > 0.0) {
        return None;
    }
    let spacing = photo_spacing(&footprint, overlap.front_pct, overlap.side_pct)?
        .scaled(package.spacing_multiplier);
    tracing::debug!(
        altitude,
        gsd,
        footprint_w = footprint.width,
        footprint_h = footprint.height,
        front = spacing.front,
        side = spacing.side,
        "derived coverage"
    );

    let selected = select_obstacles(obstacles, package);
    let budget = allocate_photo_budget(BudgetRequest {
        total: package.total_photos,
        top_down_target: package.top_down_shots,
        land_demand: package.total_photos,
        building_demand: building_demand(&selected, &settings.buildings),
        economy: package.is_economy(),
    });
    tracing::debug!(?budget, structures = selected.len(), "photo budget");

    let mut shots = Vec::new();

    let (selection, grid_attempts, grid_reached_target) = if budget.top_down > 0 {
        let fit = fit_grid(&ring, spacing, budget.top_down as usize)?;
        if !fit.reached_target {
            tracing::debug!(
                attempts = fit.attempts,
                available = fit.grid.point_count(),
                wanted = budget.top_down,
                "grid refinement exhausted"
            );
        }
        (
            select_evenly(&fit.grid, budget.top_down as usize),
            fit.attempts,
            fit.reached_target,
        )
    } else {
        (GridSelection::default(), 0, true)
    };
    shots.extend(
        selection
            .points
            .iter()
            .map(|&p| Shot::nadir(p, &footprint, altitude)),
    );

    let property_orbit = if budget.angled > 0 {
        plan_perimeter_orbit(&ring, budget.angled as usize, settings.orbit_standoff_m)?
    } else {
        Vec::new()
    };
    shots.extend(
        property_orbit
            .iter()
            .map(|o| aimed_shot(o.position, center, ShotCategory::Angled, altitude, drone)),
    );

    let building_orbits =
        plan_building_orbits(&selected, budget.building, altitude, drone, &settings.buildings);
    shots.extend(building_orbits.iter().flat_map(|o| o.shots.iter().cloned()));

    let orbit_positions: Vec<LatLng> = property_orbit.iter().map(|o| o.position).collect();
    let distance = selection
        .lines
        .iter()
        .map(|line| path_length_meters(line))
        .sum::<f64>()
        + path_length_meters(&orbit_positions)
        + building_orbits
            .iter()
            .map(|o| {
                let positions: Vec<LatLng> = o.shots.iter().map(|s| s.position).collect();
                path_length_meters(&positions)
            })
            .sum::<f64>();

    let photo_counts = PhotoCounts::from_shots(&shots);
    Some(FlightPath {
        package_id: package.id.clone(),
        altitude_m: altitude,
        gsd_cm_per_px: gsd,
        footprint,
        spacing,
        center,
        area: AreaMeasure::from_sq_meters(area),
        perimeter: DistanceMeasure::from_meters(perimeter_meters(&ring)),
        photo_estimate: estimate_photos_needed(area, &spacing),
        budget,
        waypoint_lines: selection.lines,
        shots,
        property_orbit,
        building_orbits,
        flight_time: FlightTime::from_photos(photo_counts.total, settings.seconds_per_photo),
        photo_counts,
        total_distance: DistanceMeasure::from_meters(distance),
        grid_attempts,
        grid_reached_target,
    })
}
