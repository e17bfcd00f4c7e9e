//! Camera footprint geometry
//!
//! Pinhole-camera relations between altitude, sensor size and lens:
//! - ground sample distance (cm/pixel)
//! - nadir ground footprint (m)
//! - oblique field of view toward a target
//! - camera tilt needed to frame a target of a given height

use serde::Serialize;

use crate::domain::DroneSpecs;
use crate::geometry::{LatLng, distance_meters};

/// Above this angle from horizontal a structure's facade is no longer in frame
pub const TARGET_VISIBLE_MAX_ANGLE_DEG: f64 = 75.0;

/// Frame height / width for oblique projections (4:3 frame)
const OBLIQUE_ASPECT: f64 = 0.75;

/// Below this cosine the oblique footprint runs off to the horizon
const MIN_TILT_COSINE: f64 = 1e-6;

const SIXTEEN_POINT_COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Ground area covered by one nadir frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Footprint {
    /// Across-track extent in meters
    pub width: f64,
    /// Along-track extent in meters
    pub height: f64,
    /// Square meters
    pub area: f64,
}

impl Footprint {
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Ground area visible from an oblique shot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FieldOfView {
    pub width: f64,
    pub height: f64,
    /// Horizontal distance from the shot to the target in meters
    pub distance: f64,
    /// Slant distance from the camera to the target in meters
    pub effective_distance: f64,
}

impl FieldOfView {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Camera orientation toward a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraAngle {
    /// Depression angle below the horizon (90 = straight down)
    pub degrees_from_horizontal: f64,
    /// `90 - degrees_from_horizontal`, the tilt used for oblique foreshortening
    pub pitch: f64,
    /// Horizontal distance to the target in meters
    pub horizontal_distance: f64,
}

impl CameraAngle {
    /// Camera pointed straight down
    pub fn nadir() -> Self {
        Self {
            degrees_from_horizontal: 90.0,
            pitch: 0.0,
            horizontal_distance: 0.0,
        }
    }

    pub fn target_visible(&self) -> bool {
        self.degrees_from_horizontal < TARGET_VISIBLE_MAX_ANGLE_DEG
    }
}

/// Predicted framing of one shot aimed at a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShotPrediction {
    pub angle: CameraAngle,
    pub field_of_view: FieldOfView,
    pub target_visible: bool,
    pub coverage_area: f64,
}

/// Ground sample distance in cm/pixel
///
/// GSD = (sensor height / focal length) * altitude * 100 / image height
///
/// Returns 0 when the lens or image size is unusable or the result is not finite.
pub fn ground_sample_distance(
    altitude: f64,
    focal_length: f64,
    sensor_height: f64,
    image_height: f64,
) -> f64 {
    if !(focal_length > 0.0) || !(image_height > 0.0) {
        return 0.0;
    }
    let gsd = (sensor_height / focal_length) * altitude * 100.0 / image_height;
    if gsd.is_finite() { gsd } else { 0.0 }
}

/// Nadir ground footprint in meters
///
/// footprint = (sensor dimension / focal length) * altitude, per axis
///
/// # Returns
/// * All-zero footprint when the lens or image size is unusable
pub fn ground_footprint(
    altitude: f64,
    focal_length: f64,
    sensor_width: f64,
    sensor_height: f64,
    image_width: f64,
    image_height: f64,
) -> Footprint {
    if !(focal_length > 0.0) || !(image_width > 0.0) || !(image_height > 0.0) {
        return Footprint::default();
    }

    let width = (sensor_width / focal_length) * altitude;
    let height = (sensor_height / focal_length) * altitude;
    let area = width * height;

    if !width.is_finite() || !height.is_finite() || !area.is_finite() {
        return Footprint::default();
    }

    Footprint {
        width,
        height,
        area,
    }
}

/// Field of view of an oblique shot from `shot` toward `target`
///
/// The slant distance replaces altitude in the footprint relation, the
/// frame is assumed 4:3, and both axes grow by `1 / cos(pitch)` as the
/// camera tilts away from nadir.
///
/// # Arguments
/// * `pitch` - tilt in degrees as returned by [`camera_pitch_for_target`]
pub fn oblique_field_of_view(
    shot: LatLng,
    target: LatLng,
    altitude: f64,
    pitch: f64,
    sensor_width: f64,
    focal_length: f64,
) -> FieldOfView {
    let distance = distance_meters(shot, target);
    let effective_distance = distance.hypot(altitude);

    let tilt_cos = pitch.to_radians().cos();
    if !(focal_length > 0.0) || !(tilt_cos > MIN_TILT_COSINE) {
        return FieldOfView {
            distance,
            effective_distance,
            ..Default::default()
        };
    }

    let base_width = (sensor_width / focal_length) * effective_distance;
    let base_height = base_width * OBLIQUE_ASPECT;

    FieldOfView {
        width: base_width / tilt_cos,
        height: base_height / tilt_cos,
        distance,
        effective_distance,
    }
}

/// Camera angle needed to frame a target of `target_height` meters
/// from `ground_distance` meters away at `altitude`.
pub fn camera_pitch_for_target(altitude: f64, ground_distance: f64, target_height: f64) -> CameraAngle {
    let degrees = (altitude + target_height).atan2(ground_distance).to_degrees();
    CameraAngle {
        degrees_from_horizontal: degrees,
        pitch: 90.0 - degrees,
        horizontal_distance: ground_distance,
    }
}

/// Predict what a shot from `shot` aimed at `target` will capture
pub fn predict_shot_coverage(
    shot: LatLng,
    target: LatLng,
    altitude: f64,
    target_height: f64,
    drone: &DroneSpecs,
) -> ShotPrediction {
    let ground_distance = distance_meters(shot, target);
    let angle = camera_pitch_for_target(altitude, ground_distance, target_height);
    let field_of_view = oblique_field_of_view(
        shot,
        target,
        altitude,
        angle.pitch,
        drone.sensor_width_mm,
        drone.focal_length_mm,
    );

    ShotPrediction {
        angle,
        field_of_view,
        target_visible: angle.target_visible(),
        coverage_area: field_of_view.area(),
    }
}

/// Sixteen-point compass name for a bearing in degrees
pub fn compass_direction(bearing: f64) -> &'static str {
    let index = (bearing.rem_euclid(360.0) / 22.5).round() as usize % 16;
    SIXTEEN_POINT_COMPASS[index]
}
