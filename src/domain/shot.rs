use serde::Serialize;

use crate::coverage::{CameraAngle, FieldOfView, Footprint};
use crate::geometry::LatLng;

/// What a shot is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShotCategory {
    TopDown,
    Angled,
    Building,
    PointOfInterest,
}

impl ShotCategory {
    pub fn description(&self) -> &'static str {
        match self {
            ShotCategory::TopDown => "Nadir (straight down)",
            ShotCategory::Angled => "Oblique (angled)",
            ShotCategory::Building => "Oblique (building)",
            ShotCategory::PointOfInterest => "Oblique (point of interest)",
        }
    }
}

/// A single planned photograph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shot {
    pub position: LatLng,
    pub category: ShotCategory,
    pub camera: CameraAngle,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compass_bearing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_view: Option<FieldOfView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obstacle_id: Option<String>,
}

impl Shot {
    /// Straight-down land shot covering `footprint`
    pub fn nadir(position: LatLng, footprint: &Footprint, altitude: f64) -> Self {
        Self {
            position,
            category: ShotCategory::TopDown,
            camera: CameraAngle::nadir(),
            description: ShotCategory::TopDown.description(),
            compass_bearing: None,
            field_of_view: Some(FieldOfView {
                width: footprint.width,
                height: footprint.height,
                distance: 0.0,
                effective_distance: altitude,
            }),
            target_visible: None,
            obstacle_id: None,
        }
    }

    /// Angled shot aimed along `compass_bearing`
    pub fn oblique(
        position: LatLng,
        category: ShotCategory,
        camera: CameraAngle,
        compass_bearing: f64,
        field_of_view: FieldOfView,
    ) -> Self {
        Self {
            position,
            category,
            camera,
            description: category.description(),
            compass_bearing: Some(compass_bearing),
            field_of_view: Some(field_of_view),
            target_visible: Some(camera.target_visible()),
            obstacle_id: None,
        }
    }

    pub fn with_obstacle(mut self, obstacle_id: impl Into<String>) -> Self {
        self.obstacle_id = Some(obstacle_id.into());
        self
    }
}
