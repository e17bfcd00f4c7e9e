use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::domain::{Boundary, Obstacle, ObstacleKind};
use crate::geometry::LatLng;

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("malformed survey document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("boundary needs at least 3 distinct points, found {0}")]
    TooFewPoints(usize),
    #[error("invalid coordinate in {0}")]
    InvalidCoordinate(String),
    #[error("circle radius must be a positive number of meters, got {0}")]
    InvalidRadius(f64),
    #[error("duplicate obstacle id \"{0}\"")]
    DuplicateObstacleId(String),
}

/// Survey document as stored on disk
#[derive(Debug, Deserialize)]
struct SurveyFile {
    #[serde(default)]
    name: Option<String>,
    boundary: Boundary,
    #[serde(default)]
    obstacles: Vec<SurveyObstacle>,
    #[serde(default)]
    points_of_interest: Vec<LatLng>,
}

#[derive(Debug, Deserialize)]
struct SurveyObstacle {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    position: LatLng,
}

/// A surveyed property ready for planning
#[derive(Debug, Clone, PartialEq)]
pub struct Survey {
    pub name: Option<String>,
    pub boundary: Boundary,
    /// Boundary reduced to an open vertex ring
    pub ring: Vec<LatLng>,
    pub obstacles: Vec<Obstacle>,
    pub points_of_interest: Vec<LatLng>,
}

/// Parse a survey JSON document
///
/// # Algorithm
/// 1. Deserialize the raw document
/// 2. Normalise the boundary to a ring and check it
/// 3. Classify obstacles, filling in missing ids and names
/// 4. Check every point of interest
pub fn parse_survey(json: &str) -> Result<Survey, SurveyError> {
    let file: SurveyFile = serde_json::from_str(json)?;

    if let Boundary::Circle { radius_m, .. } = file.boundary
        && !(radius_m > 0.0 && radius_m.is_finite())
    {
        return Err(SurveyError::InvalidRadius(radius_m));
    }

    let ring = file.boundary.to_ring();
    if let Some(i) = ring.iter().position(|p| !p.is_valid()) {
        return Err(SurveyError::InvalidCoordinate(format!("boundary point {}", i + 1)));
    }
    if ring.len() < 3 {
        return Err(SurveyError::TooFewPoints(ring.len()));
    }

    let obstacles = build_obstacles(file.obstacles)?;

    if let Some(i) = file.points_of_interest.iter().position(|p| !p.is_valid()) {
        return Err(SurveyError::InvalidCoordinate(format!(
            "point of interest {}",
            i + 1
        )));
    }

    Ok(Survey {
        name: file.name,
        boundary: file.boundary,
        ring,
        obstacles,
        points_of_interest: file.points_of_interest,
    })
}

fn build_obstacles(raw: Vec<SurveyObstacle>) -> Result<Vec<Obstacle>, SurveyError> {
    let mut per_label: HashMap<&'static str, usize> = HashMap::new();
    let mut ids = HashSet::new();
    let mut obstacles = Vec::with_capacity(raw.len());

    for (i, entry) in raw.into_iter().enumerate() {
        let id = entry.id.unwrap_or_else(|| format!("obstacle_{}", i + 1));
        if !entry.position.is_valid() {
            return Err(SurveyError::InvalidCoordinate(format!("obstacle {}", id)));
        }
        if !ids.insert(id.clone()) {
            return Err(SurveyError::DuplicateObstacleId(id));
        }

        let kind = entry
            .kind
            .as_deref()
            .map(ObstacleKind::from_tag)
            .unwrap_or(ObstacleKind::Other);
        let label = kind.label();
        let seen = per_label.entry(label).or_insert(0);
        *seen += 1;
        let name = entry.name.unwrap_or_else(|| format!("{} {}", label, seen));

        obstacles.push(Obstacle::new(id, kind, name, entry.position));
    }

    Ok(obstacles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURVEY: &str = r#"{
        "name": "Lakeside lot",
        "boundary": {
            "type": "polygon",
            "points": [
                {"lat": 44.8356, "lng": -69.2733},
                {"lat": 44.8356, "lng": -69.2720},
                {"lat": 44.8365, "lng": -69.2720},
                {"lat": 44.8365, "lng": -69.2733},
                {"lat": 44.8356, "lng": -69.2733}
            ]
        },
        "obstacles": [
            {"type": "house", "position": {"lat": 44.8360, "lng": -69.2728}},
            {"id": "dock-a", "type": "dock", "name": "Boat dock", "position": {"lat": 44.8364, "lng": -69.2722}},
            {"type": "greenhouse", "position": {"lat": 44.8358, "lng": -69.2725}},
            {"type": "House", "position": {"lat": 44.8362, "lng": -69.2730}}
        ],
        "points_of_interest": [{"lat": 44.8370, "lng": -69.2727}]
    }"#;

    #[test]
    fn test_parse_survey() {
        let survey = parse_survey(SURVEY).unwrap();
        assert_eq!(survey.name.as_deref(), Some("Lakeside lot"));
        assert_eq!(survey.ring.len(), 4);
        assert_eq!(survey.points_of_interest.len(), 1);

        let names: Vec<&str> = survey.obstacles.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["House 1", "Boat dock", "Building 1", "House 2"]);
        let ids: Vec<&str> = survey.obstacles.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["obstacle_1", "dock-a", "obstacle_3", "obstacle_4"]);
        assert_eq!(survey.obstacles[2].kind, ObstacleKind::Other);
    }

    #[test]
    fn test_circle_survey() {
        let survey = parse_survey(
            r#"{"boundary": {"type": "circle", "center": {"lat": 44.0, "lng": -69.0}, "radius_m": 40.0}}"#,
        )
        .unwrap();
        assert_eq!(survey.ring.len(), 64);
        assert!(survey.obstacles.is_empty());

        let err = parse_survey(
            r#"{"boundary": {"type": "circle", "center": {"lat": 44.0, "lng": -69.0}, "radius_m": -5.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SurveyError::InvalidRadius(_)));
    }

    #[test]
    fn test_rejects_bad_surveys() {
        let err = parse_survey(
            r#"{"boundary": {"type": "polygon", "points": [{"lat": 1.0, "lng": 1.0}, {"lat": 1.0, "lng": 2.0}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SurveyError::TooFewPoints(2)));

        let err = parse_survey(
            r#"{"boundary": {"type": "polygon", "points": [{"lat": 95.0, "lng": 1.0}, {"lat": 1.0, "lng": 2.0}, {"lat": 2.0, "lng": 2.0}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SurveyError::InvalidCoordinate(_)));

        let err = parse_survey(
            r#"{"boundary": {"type": "rectangle", "south_west": {"lat": 1.0, "lng": 1.0}, "north_east": {"lat": 2.0, "lng": 2.0}},
                "obstacles": [
                    {"id": "a", "type": "shed", "position": {"lat": 1.5, "lng": 1.5}},
                    {"id": "a", "type": "barn", "position": {"lat": 1.6, "lng": 1.6}}
                ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SurveyError::DuplicateObstacleId(ref id) if id == "a"));

        assert!(matches!(
            parse_survey("{not json").unwrap_err(),
            SurveyError::Json(_)
        ));
    }
}
