//! Flight path sanity checks
//!
//! Run on a finished plan before it is handed to a pilot:
//! - Check for NaN/Inf shot positions
//! - Detect shots stacked on the same position
//! - Verify photo counts agree with the shot list

use std::collections::HashSet;

use super::FlightPath;

/// Positions closer than this (degrees, about 1 cm) count as duplicates
const DUPLICATE_EPSILON_DEG: f64 = 1e-7;

/// Result of flight path validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Total number of shots validated
    pub total: usize,
    /// Shots with NaN/Inf coordinates
    pub invalid_coords: usize,
    /// Shots sharing a position with an earlier shot
    pub duplicates: usize,
    /// Photo counts disagree with the shot list
    pub count_mismatch: bool,
    /// Warning messages for issues found
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Plans with bad coordinates or inconsistent counts must not be flown
    pub fn is_valid(&self) -> bool {
        self.invalid_coords == 0 && !self.count_mismatch
    }

    pub fn has_issues(&self) -> bool {
        self.invalid_coords > 0 || self.duplicates > 0 || self.count_mismatch
    }

    pub fn summary(&self) -> String {
        if !self.has_issues() {
            format!("Plan valid: {} shots, no issues", self.total)
        } else {
            format!(
                "Plan issues: {} shots, {} invalid coords, {} duplicates{}",
                self.total,
                self.invalid_coords,
                self.duplicates,
                if self.count_mismatch {
                    ", photo counts mismatch"
                } else {
                    ""
                }
            )
        }
    }
}

fn grid_key(lat: f64, lng: f64) -> (i64, i64) {
    (
        (lat / DUPLICATE_EPSILON_DEG).round() as i64,
        (lng / DUPLICATE_EPSILON_DEG).round() as i64,
    )
}

/// Validate a flight path and return a detailed report
pub fn validate_flight_path(plan: &FlightPath) -> ValidationResult {
    let mut result = ValidationResult {
        total: plan.shots.len(),
        ..Default::default()
    };

    let mut seen = HashSet::new();
    for (i, shot) in plan.shots.iter().enumerate() {
        if !shot.position.is_finite() {
            result.invalid_coords += 1;
            result
                .warnings
                .push(format!("Shot {} has NaN/Inf coordinates", i));
            continue;
        }
        if !seen.insert(grid_key(shot.position.lat, shot.position.lng)) {
            result.duplicates += 1;
        }
    }

    if result.duplicates > 0 {
        result.warnings.push(format!(
            "{} shots share a position with another shot",
            result.duplicates
        ));
    }

    if plan.photo_counts.total as usize != plan.shots.len() {
        result.count_mismatch = true;
        result.warnings.push(format!(
            "Photo count {} does not match {} planned shots",
            plan.photo_counts.total,
            plan.shots.len()
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Overlap, PlannerSettings};
    use crate::domain::{DroneSpecs, PackageConfig, PackageTier};
    use crate::geometry::{LatLng, offset_by_meters};
    use crate::planner::plan_coverage;

    fn plan() -> FlightPath {
        let origin = LatLng::new(44.8356, -69.2733);
        let ring = vec![
            origin,
            offset_by_meters(origin, 120.0, 0.0),
            offset_by_meters(origin, 120.0, 80.0),
            offset_by_meters(origin, 0.0, 80.0),
        ];
        plan_coverage(
            &ring,
            &[],
            &DroneSpecs::default(),
            &Overlap::default(),
            &PackageConfig::new("standard", "", PackageTier::Standard, 30, 10),
            &PlannerSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_clean_plan_is_valid() {
        let result = validate_flight_path(&plan());
        assert!(result.is_valid());
        assert!(!result.has_issues());
        assert_eq!(result.total, 30);
    }

    #[test]
    fn test_detects_problems() {
        let mut plan = plan();
        let first = plan.shots[0].clone();
        plan.shots.push(first);
        plan.shots[1].position = LatLng::new(f64::NAN, 0.0);

        let result = validate_flight_path(&plan);
        assert_eq!(result.invalid_coords, 1);
        assert_eq!(result.duplicates, 1);
        assert!(result.count_mismatch);
        assert!(!result.is_valid());
        assert_eq!(result.warnings.len(), 3);
    }
}
