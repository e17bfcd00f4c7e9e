use serde::{Deserialize, Serialize};

use crate::coverage::{Footprint, ground_footprint, ground_sample_distance};

fn default_sensor_width_mm() -> f64 {
    13.2
}
fn default_sensor_height_mm() -> f64 {
    8.8
}
fn default_focal_length_mm() -> f64 {
    8.8
}
fn default_image_width_px() -> u32 {
    5472
}
fn default_image_height_px() -> u32 {
    3648
}
fn default_min_altitude_m() -> f64 {
    30.0
}
fn default_altitude_m() -> f64 {
    60.0
}
fn default_max_altitude_m() -> f64 {
    120.0
}

/// Camera and altitude envelope of the drone flying the job
///
/// Defaults describe a 1-inch-sensor survey camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneSpecs {
    #[serde(default = "default_sensor_width_mm")]
    pub sensor_width_mm: f64,
    #[serde(default = "default_sensor_height_mm")]
    pub sensor_height_mm: f64,
    #[serde(default = "default_focal_length_mm")]
    pub focal_length_mm: f64,
    #[serde(default = "default_image_width_px")]
    pub image_width_px: u32,
    #[serde(default = "default_image_height_px")]
    pub image_height_px: u32,
    #[serde(default = "default_min_altitude_m")]
    pub min_altitude_m: f64,
    #[serde(default = "default_altitude_m")]
    pub default_altitude_m: f64,
    #[serde(default = "default_max_altitude_m")]
    pub max_altitude_m: f64,
}

impl Default for DroneSpecs {
    fn default() -> Self {
        Self {
            sensor_width_mm: default_sensor_width_mm(),
            sensor_height_mm: default_sensor_height_mm(),
            focal_length_mm: default_focal_length_mm(),
            image_width_px: default_image_width_px(),
            image_height_px: default_image_height_px(),
            min_altitude_m: default_min_altitude_m(),
            default_altitude_m: default_altitude_m(),
            max_altitude_m: default_max_altitude_m(),
        }
    }
}

impl DroneSpecs {
    /// Focal length and image dimensions must be positive for any coverage math
    pub fn is_valid(&self) -> bool {
        self.focal_length_mm > 0.0 && self.image_width_px > 0 && self.image_height_px > 0
    }

    /// Flight altitude for a package: default altitude times `multiplier`,
    /// clamped to the drone's altitude envelope
    ///
    /// Non-positive or non-finite multipliers count as 1.
    pub fn altitude_for(&self, multiplier: f64) -> f64 {
        let multiplier = if multiplier > 0.0 && multiplier.is_finite() {
            multiplier
        } else {
            1.0
        };
        let altitude = self.default_altitude_m * multiplier;

        if self.min_altitude_m <= self.max_altitude_m {
            altitude.clamp(self.min_altitude_m, self.max_altitude_m)
        } else {
            altitude
        }
    }

    pub fn footprint_at(&self, altitude: f64) -> Footprint {
        ground_footprint(
            altitude,
            self.focal_length_mm,
            self.sensor_width_mm,
            self.sensor_height_mm,
            self.image_width_px as f64,
            self.image_height_px as f64,
        )
    }

    /// Ground sample distance at `altitude` in cm/pixel
    pub fn gsd_at(&self, altitude: f64) -> f64 {
        ground_sample_distance(
            altitude,
            self.focal_length_mm,
            self.sensor_height_mm,
            self.image_height_px as f64,
        )
    }
}
