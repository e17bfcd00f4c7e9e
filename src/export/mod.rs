pub mod geojson;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::geometry::LatLng;
use crate::planner::FlightPath;

pub use geojson::to_geojson;

/// Write the full plan as pretty-printed JSON
pub fn write_plan_json(path: &Path, plan: &FlightPath) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create plan file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, plan).context("Failed to serialize flight plan")?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write the plan as a GeoJSON FeatureCollection
///
/// # Arguments
/// * `path` - Output file path
/// * `plan` - Plan to export
/// * `boundary` - Property ring, drawn as the first feature
pub fn write_geojson(path: &Path, plan: &FlightPath, boundary: &[LatLng]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create GeoJSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &to_geojson(plan, boundary))
        .context("Failed to serialize GeoJSON")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Overlap, PlannerSettings};
    use crate::domain::{DroneSpecs, Obstacle, ObstacleKind, PackageConfig, PackageTier};
    use crate::geometry::offset_by_meters;
    use crate::planner::plan_coverage;

    fn ring() -> Vec<LatLng> {
        let origin = LatLng::new(44.8356, -69.2733);
        vec![
            origin,
            offset_by_meters(origin, 150.0, 0.0),
            offset_by_meters(origin, 150.0, 100.0),
            offset_by_meters(origin, 0.0, 100.0),
        ]
    }

    fn plan() -> FlightPath {
        let house = Obstacle::new(
            "obstacle_1",
            ObstacleKind::House,
            "House 1",
            offset_by_meters(ring()[0], 60.0, 40.0),
        );
        plan_coverage(
            &ring(),
            &[house],
            &DroneSpecs::default(),
            &Overlap::default(),
            &PackageConfig::new("premium", "Premium", PackageTier::Premium, 60, 25),
            &PlannerSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_geojson_has_feature_per_shot_and_line() {
        let plan = plan();
        let geojson = to_geojson(&plan, &ring());
        let features = geojson["features"].as_array().unwrap();
        assert_eq!(
            features.len(),
            1 + plan.waypoint_lines.len() + plan.shots.len()
        );
        assert_eq!(features[0]["geometry"]["type"], "Polygon");
        assert_eq!(
            features[0]["geometry"]["coordinates"][0].as_array().unwrap().len(),
            5
        );
        let building_shots = features
            .iter()
            .filter(|f| f["properties"]["category"] == "building")
            .count();
        assert_eq!(building_shots, plan.photo_counts.building as usize);
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan();

        let json_path = dir.path().join("plan.json");
        write_plan_json(&json_path, &plan).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(written["photo_counts"]["total"], plan.photo_counts.total);
        assert_eq!(written["shots"][0]["category"], "top-down");

        let geojson_path = dir.path().join("plan.geojson");
        write_geojson(&geojson_path, &plan, &ring()).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&geojson_path).unwrap()).unwrap();
        assert_eq!(written["type"], "FeatureCollection");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("plan.json");
        assert!(write_plan_json(&path, &plan()).is_err());
    }
}
