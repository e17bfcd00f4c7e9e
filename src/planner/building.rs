use serde::Serialize;

use crate::config::BuildingProfiles;
use crate::coverage::predict_shot_coverage;
use crate::domain::{DroneSpecs, Obstacle, ObstacleKind, PackageConfig, Shot, ShotCategory};
use crate::geometry::{LatLng, offset_by_meters};

/// Ring of shots around one structure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingOrbit {
    pub obstacle_id: String,
    pub name: String,
    pub kind: ObstacleKind,
    pub center: LatLng,
    pub radius_m: f64,
    /// Height the camera was aimed at
    pub height_m: f64,
    pub shots: Vec<Shot>,
}

fn economy_rank(kind: ObstacleKind) -> u8 {
    match kind {
        ObstacleKind::House => 0,
        ObstacleKind::Garage => 1,
        _ => 2,
    }
}

/// Structures the package pays for
///
/// Economy packages keep houses first, then garages, then everything else in
/// survey order. Other tiers keep the first structures surveyed.
pub fn select_obstacles(obstacles: &[Obstacle], package: &PackageConfig) -> Vec<Obstacle> {
    let keep = package.included_buildings.cap(obstacles.len());
    let mut ordered: Vec<&Obstacle> = obstacles.iter().collect();
    if package.is_economy() {
        ordered.sort_by_key(|o| economy_rank(o.kind));
    }
    ordered.into_iter().take(keep).cloned().collect()
}

/// Base shot counts for each structure
pub fn building_bases(obstacles: &[Obstacle], profiles: &BuildingProfiles) -> Vec<u32> {
    obstacles.iter().map(|o| profiles.get(o.kind).shots).collect()
}

/// Shots the structures would take with an unconstrained budget
pub fn building_demand(obstacles: &[Obstacle], profiles: &BuildingProfiles) -> u32 {
    building_bases(obstacles, profiles).iter().sum()
}

/// Scale base shot counts down to `budget` so the result sums to it exactly
///
/// Each structure gets the floor of its proportional share; leftover shots go
/// to the largest remainders, earlier structures winning ties.
pub fn allocate_building_shots(bases: &[u32], budget: u32) -> Vec<u32> {
    let demand: u64 = bases.iter().map(|&b| b as u64).sum();
    if demand <= budget as u64 {
        return bases.to_vec();
    }
    if budget == 0 {
        return vec![0; bases.len()];
    }

    let budget = budget as u64;
    let mut shares: Vec<u32> = Vec::with_capacity(bases.len());
    let mut remainders: Vec<(usize, u64)> = Vec::with_capacity(bases.len());
    for (i, &base) in bases.iter().enumerate() {
        let scaled = base as u64 * budget;
        shares.push((scaled / demand) as u32);
        remainders.push((i, scaled % demand));
    }

    let assigned: u64 = shares.iter().map(|&s| s as u64).sum();
    let leftover = (budget - assigned) as usize;
    // sort_by is stable, so equal remainders keep survey order
    remainders.sort_by(|a, b| b.1.cmp(&a.1));
    for &(i, _) in remainders.iter().take(leftover) {
        shares[i] += 1;
    }
    shares
}

/// Place oblique shots around each structure, sharing `budget` shots
pub fn plan_building_orbits(
    obstacles: &[Obstacle],
    budget: u32,
    altitude: f64,
    drone: &DroneSpecs,
    profiles: &BuildingProfiles,
) -> Vec<BuildingOrbit> {
    let bases = building_bases(obstacles, profiles);
    let counts = allocate_building_shots(&bases, budget);

    obstacles
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(obstacle, count)| {
            let profile = profiles.get(obstacle.kind);
            let shots = (0..count)
                .map(|i| {
                    let angle = i as f64 / count as f64 * std::f64::consts::TAU;
                    let position = offset_by_meters(
                        obstacle.position,
                        profile.radius_m * angle.sin(),
                        profile.radius_m * angle.cos(),
                    );
                    building_shot(obstacle, position, angle, altitude, profile.height_m, drone)
                })
                .collect();

            BuildingOrbit {
                obstacle_id: obstacle.id.clone(),
                name: obstacle.name.clone(),
                kind: obstacle.kind,
                center: obstacle.position,
                radius_m: profile.radius_m,
                height_m: profile.height_m,
                shots,
            }
        })
        .collect()
}

fn building_shot(
    obstacle: &Obstacle,
    position: LatLng,
    angle: f64,
    altitude: f64,
    height: f64,
    drone: &DroneSpecs,
) -> Shot {
    let prediction = predict_shot_coverage(position, obstacle.position, altitude, height, drone);
    let bearing = (angle.to_degrees() + 90.0).rem_euclid(360.0);

    Shot::oblique(
        position,
        ShotCategory::Building,
        prediction.angle,
        bearing,
        prediction.field_of_view,
    )
    .with_obstacle(&obstacle.id)
}
